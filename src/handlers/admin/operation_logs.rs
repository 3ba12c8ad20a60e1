//! 작업 로그 조회 핸들러

use actix_web::{get, web, HttpResponse};
use crate::domain::dto::admin::OperationLogQuery;
use crate::domain::dto::common::ApiResponse;
use crate::domain::models::lang::Lang;
use crate::errors::ApiResult;
use crate::services::admin::OperationLogService;

/// 관리자 ID/이름, 작업 종류, 모듈로 필터링한 최신순 목록
#[get("")]
pub async fn list_operation_logs(lang: Lang, query: web::Query<OperationLogQuery>) -> ApiResult<HttpResponse> {
    let page = OperationLogService::instance()
        .list(&query)
        .await
        .map_err(|e| e.localized(lang))?;

    Ok(ApiResponse::success(page))
}
