//! 관리자 플랫폼 핸들러 (`/api/admin/*`)
//!
//! 모든 핸들러는 관리자 가드를 통과한 요청만 받으며 [`AdminContext`]를
//! 추출자로 사용할 수 있습니다. 데이터를 바꾸는 요청은 작업 로그를 남깁니다.

pub mod auth;
pub mod roles;
pub mod permissions;
pub mod user_roles;
pub mod operation_logs;
pub mod system_configs;

use actix_web::HttpRequest;
use crate::domain::models::{auth::AdminContext, request_meta::RequestMeta};
use crate::services::admin::{OperationEntry, OperationLogService};

/// 성공한 관리 작업을 기록합니다.
pub(crate) fn record_operation(context: &AdminContext, req: &HttpRequest, entry: OperationEntry) {
    OperationLogService::instance().record(
        &context.admin_id(),
        &context.admin.username,
        &RequestMeta::from_request(req),
        entry,
        None,
    );
}
