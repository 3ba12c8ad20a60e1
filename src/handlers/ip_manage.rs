//! IP 화이트리스트 관리 핸들러 (`POST /api/ip-manage`)
//!
//! 로그인 없이 호출되며 `IP_WHITELIST_MANAGE_KEY`와 일치하는 `manage_key`로만
//! 인가합니다. 키가 설정되지 않았으면 엔드포인트 자체가 비활성화됩니다.

use std::net::IpAddr;
use actix_web::{post, web, HttpRequest, HttpResponse};
use crate::config::IpWhitelistConfig;
use crate::domain::dto::admin::{IpManageRequest, IpManageResponse};
use crate::domain::dto::common::ApiResponse;
use crate::domain::models::{lang::Lang, request_meta::client_ip};
use crate::errors::{ApiResult, AppError, AppResult, ErrorCode};
use crate::services::security::IpWhitelistService;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpAction {
    Add,
    Remove,
    List,
    Count,
}

impl IpAction {
    pub fn parse(action: &str) -> AppResult<Self> {
        match action {
            "add" => Ok(Self::Add),
            "remove" => Ok(Self::Remove),
            "list" => Ok(Self::List),
            "count" => Ok(Self::Count),
            _ => Err(AppError::business_with(
                ErrorCode::ParamsError,
                "action 仅支持 add, remove, list, count",
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Remove => "remove",
            Self::List => "list",
            Self::Count => "count",
        }
    }
}

/// 설정된 관리 키와 요청 키를 비교합니다.
pub fn authorize_manage_key(configured: Option<&str>, provided: &str) -> AppResult<()> {
    match configured {
        None => Err(AppError::business_with(ErrorCode::Forbidden, "IP白名单管理未启用")),
        Some(key) if key == provided => Ok(()),
        Some(_) => Err(AppError::business_with(ErrorCode::Forbidden, "管理密钥错误")),
    }
}

/// add/remove 대상 IP 형식 검사
pub fn validate_target_ip(ip: &str) -> AppResult<&str> {
    let ip = ip.trim();
    if ip.is_empty() {
        return Err(AppError::business_with(ErrorCode::ParamsError, "IP不能为空"));
    }
    ip.parse::<IpAddr>()
        .map_err(|_| AppError::business_with(ErrorCode::ParamsError, "IP格式无效"))?;
    Ok(ip)
}

#[post("/ip-manage")]
pub async fn manage_whitelist(
    req: HttpRequest,
    lang: Lang,
    payload: web::Json<IpManageRequest>,
) -> ApiResult<HttpResponse> {
    let caller_ip = client_ip(&req);

    if let Err(e) = authorize_manage_key(IpWhitelistConfig::manage_key().as_deref(), &payload.manage_key) {
        log::warn!("[IP Whitelist] 관리 키 인증 실패, ClientIP: {}", caller_ip);
        IpWhitelistService::log_operation(&payload.action, &payload.ip, &caller_ip, false);
        return Err(e.localized(lang));
    }

    let action = IpAction::parse(&payload.action).map_err(|e| e.localized(lang))?;
    let service = IpWhitelistService::instance();

    let result = match action {
        IpAction::Add | IpAction::Remove => {
            let ip = validate_target_ip(&payload.ip).map_err(|e| e.localized(lang))?;
            if !service.is_enabled() {
                log::warn!("[IP Whitelist] IP_WHITELIST_ENABLED=false 상태에서 목록을 변경합니다: {}", ip);
            }
            let changed = if action == IpAction::Add {
                service.add(ip).await
            } else {
                service.remove(ip).await
            };
            changed.map(|changed| IpManageResponse::Changed {
                ip: ip.to_string(),
                changed,
            })
        }
        IpAction::List => service.list().await.map(|ips| IpManageResponse::List { ips }),
        IpAction::Count => service.count().await.map(|count| IpManageResponse::Count { count }),
    };

    IpWhitelistService::log_operation(action.as_str(), &payload.ip, &caller_ip, result.is_ok());
    let response = result.map_err(|e| e.localized(lang))?;

    Ok(ApiResponse::success(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_key_disables_management() {
        let err = authorize_manage_key(None, "anything").unwrap_err();
        assert_eq!(err.error_code(), ErrorCode::Forbidden);
    }

    #[test]
    fn test_manage_key_must_match() {
        assert!(authorize_manage_key(Some("secret"), "secret").is_ok());

        let err = authorize_manage_key(Some("secret"), "guess").unwrap_err();
        assert_eq!(err.error_code(), ErrorCode::Forbidden);
        assert_eq!(err.client_detail(), Some("管理密钥错误"));
    }

    #[test]
    fn test_action_parsing() {
        assert_eq!(IpAction::parse("add").unwrap(), IpAction::Add);
        assert_eq!(IpAction::parse("count").unwrap(), IpAction::Count);
        assert_eq!(IpAction::parse("ADD").unwrap_err().error_code(), ErrorCode::ParamsError);
        assert!(IpAction::parse("").is_err());
    }

    #[test]
    fn test_target_ip_validation() {
        assert_eq!(validate_target_ip(" 10.0.0.1 ").unwrap(), "10.0.0.1");
        assert_eq!(validate_target_ip("::1").unwrap(), "::1");
        assert_eq!(validate_target_ip("").unwrap_err().client_detail(), Some("IP不能为空"));
        assert_eq!(validate_target_ip("10.0.0").unwrap_err().client_detail(), Some("IP格式无效"));
    }
}
