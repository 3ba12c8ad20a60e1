//! 작업 로그 조회 DTO

use serde::{Deserialize, Serialize};
use crate::domain::dto::common::PageQuery;
use crate::domain::entities::admin::OperationLog;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OperationLogQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub admin_user_id: Option<String>,
    pub admin_username: Option<String>,
    pub operation_type: Option<String>,
    pub module: Option<String>,
}

impl OperationLogQuery {
    pub fn page_query(&self) -> PageQuery {
        PageQuery::new(self.page, self.page_size)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OperationLogResponse {
    pub id: String,
    pub admin_user_id: String,
    pub admin_username: String,
    pub operation_type: String,
    pub module: String,
    pub action: String,
    pub target_type: String,
    pub target_id: String,
    pub request_path: String,
    pub request_method: String,
    pub request_params: String,
    pub ip_address: String,
    pub user_agent: String,
    pub status: i32,
    pub error_msg: String,
    pub created_time: i64,
}

impl From<OperationLog> for OperationLogResponse {
    fn from(log: OperationLog) -> Self {
        Self {
            id: log.id.map(|id| id.to_hex()).unwrap_or_default(),
            admin_user_id: log.admin_user_id,
            admin_username: log.admin_username,
            operation_type: log.operation_type,
            module: log.module,
            action: log.action,
            target_type: log.target_type,
            target_id: log.target_id,
            request_path: log.request_path,
            request_method: log.request_method,
            request_params: log.request_params,
            ip_address: log.ip_address,
            user_agent: log.user_agent,
            status: log.status,
            error_msg: log.error_msg,
            created_time: log.created_time,
        }
    }
}
