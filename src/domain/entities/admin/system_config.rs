//! 시스템 설정 엔티티 (키-값)

use chrono::Utc;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 설정 키 (unique)
    pub config_key: String,
    pub config_value: String,
    #[serde(default)]
    pub config_desc: String,
    pub created_time: i64,
    pub updated_time: i64,
}

impl SystemConfig {
    pub fn new(config_key: String, config_value: String, config_desc: String) -> Self {
        let now = Utc::now().timestamp();

        Self {
            id: None,
            config_key,
            config_value,
            config_desc,
            created_time: now,
            updated_time: now,
        }
    }
}
