//! 역할-권한 연결

use chrono::Utc;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RolePermission {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub role_id: ObjectId,
    pub permission_id: ObjectId,
    pub created_time: i64,
}

impl RolePermission {
    pub fn new(role_id: ObjectId, permission_id: ObjectId) -> Self {
        Self {
            id: None,
            role_id,
            permission_id,
            created_time: Utc::now().timestamp(),
        }
    }
}
