//! 관리자 부가 기능 서비스
//!
//! - [`OperationLogService`](operation_log_service::OperationLogService) - 작업 로그 기록/조회
//! - [`SystemConfigService`](system_config_service::SystemConfigService) - 키-값 시스템 설정

pub mod operation_log_service;
pub mod system_config_service;

pub use operation_log_service::*;
pub use system_config_service::*;
