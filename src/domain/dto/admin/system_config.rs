//! 시스템 설정 DTO

use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::domain::entities::admin::SystemConfig;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateSystemConfigRequest {
    #[validate(length(min = 1, max = 100, message = "配置键长度为1-100"))]
    pub config_key: String,
    #[validate(length(max = 255, message = "配置值不能超过255个字符"))]
    pub config_value: String,
    #[serde(default)]
    #[validate(length(max = 255, message = "配置描述不能超过255个字符"))]
    pub config_desc: String,
}

/// 값 수정 요청. 설명이 비어 있으면 기존 설명을 유지합니다.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateSystemConfigRequest {
    #[validate(length(max = 255, message = "配置值不能超过255个字符"))]
    pub config_value: String,
    #[serde(default)]
    #[validate(length(max = 255, message = "配置描述不能超过255个字符"))]
    pub config_desc: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SystemConfigResponse {
    pub id: String,
    pub config_key: String,
    pub config_value: String,
    pub config_desc: String,
    pub created_time: i64,
    pub updated_time: i64,
}

impl From<SystemConfig> for SystemConfigResponse {
    fn from(config: SystemConfig) -> Self {
        Self {
            id: config.id.map(|id| id.to_hex()).unwrap_or_default(),
            config_key: config.config_key,
            config_value: config.config_value,
            config_desc: config.config_desc,
            created_time: config.created_time,
            updated_time: config.updated_time,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SystemConfigValueResponse {
    pub config_key: String,
    pub value: f64,
}
