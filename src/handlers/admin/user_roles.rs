//! 관리자 역할 배정 핸들러 (`/api/admin/users/{user_id}`)

use actix_web::{delete, get, post, web, HttpRequest, HttpResponse};
use serde_json::json;
use crate::domain::dto::admin::AssignRoleRequest;
use crate::domain::dto::common::{ApiResponse, MessageResponse};
use crate::domain::models::{auth::AdminContext, lang::Lang};
use crate::errors::ApiResult;
use crate::handlers::admin::record_operation;
use crate::services::admin::OperationEntry;
use crate::services::rbac::RbacService;

#[get("/{user_id}/roles")]
pub async fn user_roles(lang: Lang, user_id: web::Path<String>) -> ApiResult<HttpResponse> {
    let roles = RbacService::instance()
        .user_roles_detail(&user_id)
        .await
        .map_err(|e| e.localized(lang))?;

    Ok(ApiResponse::success(roles))
}

/// 이미 배정된 역할이면 아무것도 바꾸지 않습니다.
#[post("/{user_id}/roles")]
pub async fn assign_role(
    req: HttpRequest,
    context: AdminContext,
    lang: Lang,
    user_id: web::Path<String>,
    payload: web::Json<AssignRoleRequest>,
) -> ApiResult<HttpResponse> {
    RbacService::instance()
        .assign_role(&user_id, &payload.role_id)
        .await
        .map_err(|e| e.localized(lang))?;

    record_operation(
        &context,
        &req,
        OperationEntry::new("update", "user_role", "分配角色")
            .target("admin_user", user_id.as_str())
            .params(&*payload),
    );
    Ok(ApiResponse::success(MessageResponse::new("分配成功")))
}

#[delete("/{user_id}/roles/{role_id}")]
pub async fn remove_role(
    req: HttpRequest,
    context: AdminContext,
    lang: Lang,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let (user_id, role_id) = path.into_inner();
    RbacService::instance()
        .remove_role(&user_id, &role_id)
        .await
        .map_err(|e| e.localized(lang))?;

    record_operation(
        &context,
        &req,
        OperationEntry::new("delete", "user_role", "移除角色")
            .target("admin_user", user_id)
            .params(&json!({ "role_id": role_id })),
    );
    Ok(ApiResponse::success(MessageResponse::new("移除成功")))
}

#[delete("/{user_id}/roles")]
pub async fn remove_all_roles(
    req: HttpRequest,
    context: AdminContext,
    lang: Lang,
    user_id: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let removed = RbacService::instance()
        .remove_all_roles(&user_id)
        .await
        .map_err(|e| e.localized(lang))?;

    record_operation(
        &context,
        &req,
        OperationEntry::new("delete", "user_role", "清空角色").target("admin_user", user_id.as_str()),
    );
    Ok(ApiResponse::success(json!({ "removed": removed })))
}

#[get("/{user_id}/permissions")]
pub async fn user_permissions(lang: Lang, user_id: web::Path<String>) -> ApiResult<HttpResponse> {
    let permissions = RbacService::instance()
        .user_permission_list(&user_id)
        .await
        .map_err(|e| e.localized(lang))?;

    Ok(ApiResponse::success(permissions))
}
