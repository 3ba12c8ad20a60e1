//! 권한 관리 핸들러 (`/api/admin/permissions`)

use actix_web::{delete, get, post, put, web, HttpRequest, HttpResponse};
use validator::Validate;
use crate::domain::dto::admin::{PermissionListQuery, PermissionRequest};
use crate::domain::dto::common::{ApiResponse, MessageResponse};
use crate::domain::models::{auth::AdminContext, lang::Lang};
use crate::errors::{ApiResult, AppError};
use crate::handlers::admin::record_operation;
use crate::services::admin::OperationEntry;
use crate::services::rbac::RbacService;

#[get("")]
pub async fn list_permissions(lang: Lang, query: web::Query<PermissionListQuery>) -> ApiResult<HttpResponse> {
    let page = RbacService::instance()
        .list_permissions(&query)
        .await
        .map_err(|e| e.localized(lang))?;

    Ok(ApiResponse::success(page))
}

#[get("/{permission_id}")]
pub async fn get_permission(lang: Lang, permission_id: web::Path<String>) -> ApiResult<HttpResponse> {
    let permission = RbacService::instance()
        .get_permission(&permission_id)
        .await
        .map_err(|e| e.localized(lang))?;

    Ok(ApiResponse::success(permission))
}

#[post("")]
pub async fn create_permission(
    req: HttpRequest,
    context: AdminContext,
    lang: Lang,
    payload: web::Json<PermissionRequest>,
) -> ApiResult<HttpResponse> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()).localized(lang))?;

    let payload = payload.into_inner();
    let entry = OperationEntry::new("create", "permission", "创建权限").params(&payload);
    let permission = RbacService::instance()
        .create_permission(payload)
        .await
        .map_err(|e| e.localized(lang))?;

    record_operation(&context, &req, entry.target("permission", permission.id.clone()));
    Ok(ApiResponse::success(permission))
}

#[put("/{permission_id}")]
pub async fn update_permission(
    req: HttpRequest,
    context: AdminContext,
    lang: Lang,
    permission_id: web::Path<String>,
    payload: web::Json<PermissionRequest>,
) -> ApiResult<HttpResponse> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()).localized(lang))?;

    let payload = payload.into_inner();
    let entry = OperationEntry::new("update", "permission", "更新权限")
        .target("permission", permission_id.as_str())
        .params(&payload);
    let permission = RbacService::instance()
        .update_permission(&permission_id, payload)
        .await
        .map_err(|e| e.localized(lang))?;

    record_operation(&context, &req, entry);
    Ok(ApiResponse::success(permission))
}

#[delete("/{permission_id}")]
pub async fn delete_permission(
    req: HttpRequest,
    context: AdminContext,
    lang: Lang,
    permission_id: web::Path<String>,
) -> ApiResult<HttpResponse> {
    RbacService::instance()
        .delete_permission(&permission_id)
        .await
        .map_err(|e| e.localized(lang))?;

    record_operation(
        &context,
        &req,
        OperationEntry::new("delete", "permission", "删除权限").target("permission", permission_id.as_str()),
    );
    Ok(ApiResponse::success(MessageResponse::new("删除成功")))
}
