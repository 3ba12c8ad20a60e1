//! 역할 관리 핸들러 (`/api/admin/roles`)

use actix_web::{delete, get, post, put, web, HttpRequest, HttpResponse};
use validator::Validate;
use crate::domain::dto::admin::{AssignPermissionsRequest, CreateRoleRequest, RoleListQuery, UpdateRoleRequest};
use crate::domain::dto::common::{ApiResponse, MessageResponse};
use crate::domain::models::{auth::AdminContext, lang::Lang};
use crate::errors::{ApiResult, AppError};
use crate::handlers::admin::record_operation;
use crate::services::admin::OperationEntry;
use crate::services::rbac::RbacService;

#[get("")]
pub async fn list_roles(lang: Lang, query: web::Query<RoleListQuery>) -> ApiResult<HttpResponse> {
    let page = RbacService::instance()
        .list_roles(&query)
        .await
        .map_err(|e| e.localized(lang))?;

    Ok(ApiResponse::success(page))
}

#[get("/{role_id}")]
pub async fn get_role(lang: Lang, role_id: web::Path<String>) -> ApiResult<HttpResponse> {
    let role = RbacService::instance()
        .get_role(&role_id)
        .await
        .map_err(|e| e.localized(lang))?;

    Ok(ApiResponse::success(role))
}

#[post("")]
pub async fn create_role(
    req: HttpRequest,
    context: AdminContext,
    lang: Lang,
    payload: web::Json<CreateRoleRequest>,
) -> ApiResult<HttpResponse> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()).localized(lang))?;

    let payload = payload.into_inner();
    let entry = OperationEntry::new("create", "role", "创建角色").params(&payload);
    let role = RbacService::instance()
        .create_role(payload)
        .await
        .map_err(|e| e.localized(lang))?;

    record_operation(&context, &req, entry.target("role", role.id.clone()));
    Ok(ApiResponse::success(role))
}

#[put("/{role_id}")]
pub async fn update_role(
    req: HttpRequest,
    context: AdminContext,
    lang: Lang,
    role_id: web::Path<String>,
    payload: web::Json<UpdateRoleRequest>,
) -> ApiResult<HttpResponse> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()).localized(lang))?;

    let payload = payload.into_inner();
    let entry = OperationEntry::new("update", "role", "更新角色")
        .target("role", role_id.as_str())
        .params(&payload);
    let role = RbacService::instance()
        .update_role(&role_id, payload)
        .await
        .map_err(|e| e.localized(lang))?;

    record_operation(&context, &req, entry);
    Ok(ApiResponse::success(role))
}

#[delete("/{role_id}")]
pub async fn delete_role(
    req: HttpRequest,
    context: AdminContext,
    lang: Lang,
    role_id: web::Path<String>,
) -> ApiResult<HttpResponse> {
    RbacService::instance()
        .delete_role(&role_id)
        .await
        .map_err(|e| e.localized(lang))?;

    record_operation(
        &context,
        &req,
        OperationEntry::new("delete", "role", "删除角色").target("role", role_id.as_str()),
    );
    Ok(ApiResponse::success(MessageResponse::new("删除成功")))
}

#[get("/{role_id}/permissions")]
pub async fn role_permissions(lang: Lang, role_id: web::Path<String>) -> ApiResult<HttpResponse> {
    let response = RbacService::instance()
        .role_permission_ids(&role_id)
        .await
        .map_err(|e| e.localized(lang))?;

    Ok(ApiResponse::success(response))
}

/// 역할의 권한 목록을 요청 내용으로 통째로 교체합니다.
#[post("/{role_id}/permissions")]
pub async fn assign_permissions(
    req: HttpRequest,
    context: AdminContext,
    lang: Lang,
    role_id: web::Path<String>,
    payload: web::Json<AssignPermissionsRequest>,
) -> ApiResult<HttpResponse> {
    let entry = OperationEntry::new("update", "role", "分配权限")
        .target("role", role_id.as_str())
        .params(&*payload);
    let response = RbacService::instance()
        .assign_permissions(&role_id, &payload.permission_ids)
        .await
        .map_err(|e| e.localized(lang))?;

    record_operation(&context, &req, entry);
    Ok(ApiResponse::success(response))
}

#[delete("/{role_id}/permissions/{permission_id}")]
pub async fn remove_permission(
    req: HttpRequest,
    context: AdminContext,
    lang: Lang,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let (role_id, permission_id) = path.into_inner();
    RbacService::instance()
        .remove_permission(&role_id, &permission_id)
        .await
        .map_err(|e| e.localized(lang))?;

    record_operation(
        &context,
        &req,
        OperationEntry::new("delete", "role", "移除权限")
            .target("role", role_id)
            .params(&serde_json::json!({ "permission_id": permission_id })),
    );
    Ok(ApiResponse::success(MessageResponse::new("移除成功")))
}
