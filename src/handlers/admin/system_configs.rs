//! 시스템 설정 핸들러 (`/api/admin/system-configs`)

use actix_web::{delete, get, post, put, web, HttpRequest, HttpResponse};
use serde_json::json;
use validator::Validate;
use crate::domain::dto::admin::{CreateSystemConfigRequest, SystemConfigValueResponse, UpdateSystemConfigRequest};
use crate::domain::dto::common::{ApiResponse, MessageResponse, PageQuery};
use crate::domain::models::{auth::AdminContext, lang::Lang};
use crate::errors::{ApiResult, AppError};
use crate::handlers::admin::record_operation;
use crate::services::admin::{OperationEntry, SystemConfigService};

#[get("")]
pub async fn list_configs(lang: Lang, query: web::Query<PageQuery>) -> ApiResult<HttpResponse> {
    let page = SystemConfigService::instance()
        .list(&query)
        .await
        .map_err(|e| e.localized(lang))?;

    Ok(ApiResponse::success(page))
}

/// 전체 설정을 `{key: value}` 맵으로 반환합니다.
#[get("/all")]
pub async fn all_configs(lang: Lang) -> ApiResult<HttpResponse> {
    let configs = SystemConfigService::instance()
        .get_all()
        .await
        .map_err(|e| e.localized(lang))?;

    Ok(ApiResponse::success(configs))
}

#[get("/key/{config_key}")]
pub async fn config_value(lang: Lang, config_key: web::Path<String>) -> ApiResult<HttpResponse> {
    let value = SystemConfigService::instance()
        .get_value(&config_key)
        .await
        .map_err(|e| e.localized(lang))?;

    Ok(ApiResponse::success(json!({
        "config_key": config_key.as_str(),
        "config_value": value,
    })))
}

#[get("/key/{config_key}/float")]
pub async fn config_float(lang: Lang, config_key: web::Path<String>) -> ApiResult<HttpResponse> {
    let value = SystemConfigService::instance()
        .get_float(&config_key)
        .await
        .map_err(|e| e.localized(lang))?;

    Ok(ApiResponse::success(SystemConfigValueResponse {
        config_key: config_key.into_inner(),
        value,
    }))
}

#[post("")]
pub async fn create_config(
    req: HttpRequest,
    context: AdminContext,
    lang: Lang,
    payload: web::Json<CreateSystemConfigRequest>,
) -> ApiResult<HttpResponse> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()).localized(lang))?;

    let payload = payload.into_inner();
    let entry = OperationEntry::new("create", "system_config", "创建配置").params(&payload);
    let config = SystemConfigService::instance()
        .create(payload)
        .await
        .map_err(|e| e.localized(lang))?;

    record_operation(&context, &req, entry.target("system_config", config.id.clone()));
    Ok(ApiResponse::success(config))
}

#[put("/{config_id}")]
pub async fn update_config(
    req: HttpRequest,
    context: AdminContext,
    lang: Lang,
    config_id: web::Path<String>,
    payload: web::Json<UpdateSystemConfigRequest>,
) -> ApiResult<HttpResponse> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()).localized(lang))?;

    let payload = payload.into_inner();
    let entry = OperationEntry::new("update", "system_config", "更新配置")
        .target("system_config", config_id.as_str())
        .params(&payload);
    let config = SystemConfigService::instance()
        .update(&config_id, payload)
        .await
        .map_err(|e| e.localized(lang))?;

    record_operation(&context, &req, entry);
    Ok(ApiResponse::success(config))
}

#[delete("/{config_id}")]
pub async fn delete_config(
    req: HttpRequest,
    context: AdminContext,
    lang: Lang,
    config_id: web::Path<String>,
) -> ApiResult<HttpResponse> {
    SystemConfigService::instance()
        .delete(&config_id)
        .await
        .map_err(|e| e.localized(lang))?;

    record_operation(
        &context,
        &req,
        OperationEntry::new("delete", "system_config", "删除配置").target("system_config", config_id.as_str()),
    );
    Ok(ApiResponse::success(MessageResponse::new("删除成功")))
}
