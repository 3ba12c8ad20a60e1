//! 관리자 작업 로그 엔티티

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// 작업 결과: 성공
pub const OPERATION_SUCCESS: i32 = 1;
/// 작업 결과: 실패
pub const OPERATION_FAILURE: i32 = 0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationLog {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 작업한 관리자 ID (16진수 문자열, 로그인 실패 시 빈 값)
    pub admin_user_id: String,
    pub admin_username: String,
    /// create / update / delete / login / export
    pub operation_type: String,
    pub module: String,
    pub action: String,
    pub target_type: String,
    pub target_id: String,
    pub request_path: String,
    pub request_method: String,
    /// JSON 직렬화된 요청 파라미터
    pub request_params: String,
    pub ip_address: String,
    pub user_agent: String,
    pub status: i32,
    pub error_msg: String,
    pub created_time: i64,
}
