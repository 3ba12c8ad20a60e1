//! 관리자-역할 연결

use chrono::Utc;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRole {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 관리자 계정 ID
    pub user_id: ObjectId,
    pub role_id: ObjectId,
    pub created_time: i64,
}

impl UserRole {
    pub fn new(user_id: ObjectId, role_id: ObjectId) -> Self {
        Self {
            id: None,
            user_id,
            role_id,
            created_time: Utc::now().timestamp(),
        }
    }
}
