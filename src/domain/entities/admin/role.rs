//! 역할 엔티티

use chrono::Utc;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub merchant_id: i64,
    pub role_name: String,
    /// 역할 코드 (unique)
    pub role_code: String,
    /// 1: 시스템 기본 역할 (삭제 불가), 0: 사용자 정의
    #[serde(default)]
    pub is_system: i32,
    #[serde(default)]
    pub description: String,
    /// 1: 활성, 0: 비활성
    pub status: i32,
    pub created_time: i64,
    pub updated_time: i64,
}

impl Role {
    pub fn new(role_name: String, role_code: String, description: String, status: i32) -> Self {
        let now = Utc::now().timestamp();

        Self {
            id: None,
            merchant_id: 0,
            role_name,
            role_code,
            is_system: 0,
            description,
            status,
            created_time: now,
            updated_time: now,
        }
    }

    pub fn is_system(&self) -> bool {
        self.is_system == 1
    }
}
