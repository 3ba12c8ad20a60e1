//! 관리자 작업 로그 서비스
//!
//! 기록은 요청 처리와 분리된 백그라운드 태스크(`actix_web::rt::spawn`)에서
//! 저장되며, 저장 실패는 로그로만 남고 요청 결과에 영향을 주지 않습니다.

use std::sync::Arc;
use chrono::Utc;
use serde::Serialize;
use crate::{
    domain::dto::admin::{OperationLogQuery, OperationLogResponse},
    domain::dto::common::PageResult,
    domain::entities::admin::{OperationLog, OPERATION_FAILURE, OPERATION_SUCCESS},
    domain::models::request_meta::RequestMeta,
    errors::AppResult,
    repositories::admin::{operation_log_filter, OperationLogRepository},
};
use singleton_macro::service;

/// 기록할 작업의 내용
#[derive(Debug, Clone, Default)]
pub struct OperationEntry {
    pub operation_type: String,
    pub module: String,
    pub action: String,
    pub target_type: String,
    pub target_id: String,
    pub request_params: String,
}

impl OperationEntry {
    pub fn new(operation_type: &str, module: &str, action: &str) -> Self {
        Self {
            operation_type: operation_type.to_string(),
            module: module.to_string(),
            action: action.to_string(),
            ..Default::default()
        }
    }

    pub fn target(mut self, target_type: &str, target_id: impl Into<String>) -> Self {
        self.target_type = target_type.to_string();
        self.target_id = target_id.into();
        self
    }

    /// 요청 파라미터를 JSON 문자열로 기록합니다. 직렬화 실패 시 비워 둡니다.
    pub fn params<T: Serialize>(mut self, params: &T) -> Self {
        match serde_json::to_string(params) {
            Ok(json) => self.request_params = json,
            Err(e) => log::warn!("[LogOperation] Failed to marshal request params: {}", e),
        }
        self
    }
}

/// 작업 주체, 요청 정보, 결과를 합쳐 저장할 로그를 만듭니다.
pub fn build_operation_log(
    admin_id: &str,
    admin_username: &str,
    meta: &RequestMeta,
    entry: OperationEntry,
    error: Option<&str>,
) -> OperationLog {
    OperationLog {
        id: None,
        admin_user_id: admin_id.to_string(),
        admin_username: admin_username.to_string(),
        operation_type: entry.operation_type,
        module: entry.module,
        action: entry.action,
        target_type: entry.target_type,
        target_id: entry.target_id,
        request_path: meta.path.clone(),
        request_method: meta.method.clone(),
        request_params: entry.request_params,
        ip_address: meta.ip.clone(),
        user_agent: meta.user_agent.clone(),
        status: if error.is_some() { OPERATION_FAILURE } else { OPERATION_SUCCESS },
        error_msg: error.unwrap_or_default().to_string(),
        created_time: Utc::now().timestamp(),
    }
}

#[service(name = "operation_log")]
pub struct OperationLogService {
    repo: Arc<OperationLogRepository>,
}

impl OperationLogService {
    /// 작업 로그를 비동기로 저장합니다. (fire-and-forget)
    pub fn record(
        &self,
        admin_id: &str,
        admin_username: &str,
        meta: &RequestMeta,
        entry: OperationEntry,
        error: Option<&str>,
    ) {
        let operation_log = build_operation_log(admin_id, admin_username, meta, entry, error);
        let repo = Arc::clone(&self.repo);

        actix_web::rt::spawn(async move {
            match repo.insert(&operation_log).await {
                Ok(()) => log::info!(
                    "[LogOperation] Admin operation logged: admin={}({}), action={}, target={}:{}, status={}",
                    operation_log.admin_username,
                    operation_log.admin_user_id,
                    operation_log.action,
                    operation_log.target_type,
                    operation_log.target_id,
                    operation_log.status
                ),
                Err(e) => log::error!("[LogOperation] Insert log failed: {}", e),
            }
        });
    }

    pub async fn list(&self, query: &OperationLogQuery) -> AppResult<PageResult<OperationLogResponse>> {
        let page = query.page_query();
        let (logs, total) = self.repo.list(operation_log_filter(query), &page).await?;

        Ok(PageResult::new(logs, total, &page).map(OperationLogResponse::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta() -> RequestMeta {
        RequestMeta {
            path: "/api/admin/roles".to_string(),
            method: "POST".to_string(),
            ip: "10.0.0.1".to_string(),
            user_agent: "test".to_string(),
        }
    }

    #[test]
    fn test_build_success_log() {
        let entry = OperationEntry::new("create", "rbac", "创建角色")
            .target("role", "abc")
            .params(&serde_json::json!({ "role_code": "ops" }));

        let log = build_operation_log("id1", "root", &meta(), entry, None);

        assert_eq!(log.status, OPERATION_SUCCESS);
        assert_eq!(log.error_msg, "");
        assert_eq!(log.target_id, "abc");
        assert_eq!(log.request_params, r#"{"role_code":"ops"}"#);
        assert_eq!(log.request_path, "/api/admin/roles");
        assert_eq!(log.ip_address, "10.0.0.1");
    }

    #[test]
    fn test_build_failure_log() {
        let entry = OperationEntry::new("login", "auth", "管理员登录");
        let log = build_operation_log("", "root", &meta(), entry, Some("密码错误"));

        assert_eq!(log.status, OPERATION_FAILURE);
        assert_eq!(log.error_msg, "密码错误");
        assert!(log.request_params.is_empty());
    }
}
