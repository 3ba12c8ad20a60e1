//! 관리자 영역 데이터 액세스
//!
//! 관리자 계정, RBAC(역할/권한/연결), 작업 로그, 시스템 설정 컬렉션을 다룹니다.

pub mod admin_user_repo;
pub mod role_repo;
pub mod permission_repo;
pub mod role_permission_repo;
pub mod user_role_repo;
pub mod operation_log_repo;
pub mod system_config_repo;

pub use admin_user_repo::*;
pub use role_repo::*;
pub use permission_repo::*;
pub use role_permission_repo::*;
pub use user_role_repo::*;
pub use operation_log_repo::*;
pub use system_config_repo::*;
