//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! `#[repository]` 매크로로 레지스트리에 등록되는 싱글톤 리포지토리들을
//! 제공합니다. MongoDB 리포지토리의 인덱스는 서버 시작 시 [`ensure_indexes`]가
//! 한 번에 생성합니다.
//!
//! - [`users`] - 프런트 회원, 후원 주문
//! - [`admin`] - 관리자 계정, RBAC, 작업 로그, 시스템 설정
//! - [`tokens`] - 토큰 블랙리스트 (캐시 저장소)
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::repositories::users::UserRepository;
//!
//! let user_repo = UserRepository::instance();
//! let user = user_repo.find_by_email("user@example.com").await?;
//! ```

pub mod users;
pub mod admin;
pub mod tokens;

use crate::errors::AppResult;
use admin::{
    AdminUserRepository, OperationLogRepository, PermissionRepository, RolePermissionRepository,
    RoleRepository, SystemConfigRepository, UserRoleRepository,
};
use users::{SupportOrderRepository, UserRepository};

/// 모든 컬렉션의 인덱스를 생성합니다.
///
/// 레지스트리 초기화 이후에 호출해야 합니다.
pub async fn ensure_indexes() -> AppResult<()> {
    UserRepository::instance().create_indexes().await?;
    SupportOrderRepository::instance().create_indexes().await?;
    AdminUserRepository::instance().create_indexes().await?;
    RoleRepository::instance().create_indexes().await?;
    PermissionRepository::instance().create_indexes().await?;
    RolePermissionRepository::instance().create_indexes().await?;
    UserRoleRepository::instance().create_indexes().await?;
    OperationLogRepository::instance().create_indexes().await?;
    SystemConfigRepository::instance().create_indexes().await?;

    log::info!("✅ 컬렉션 인덱스 준비 완료");
    Ok(())
}
