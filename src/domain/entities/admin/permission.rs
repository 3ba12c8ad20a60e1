//! 권한 엔티티
//!
//! 하나의 권한은 API 경로 패턴(`:param` 허용)과 HTTP 메서드 한 쌍을 허용합니다.

use chrono::Utc;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Permission {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub permission_name: String,
    #[serde(default)]
    pub permission_name_en: String,
    /// 권한 코드 (unique)
    pub permission_code: String,
    /// 경로 패턴, 예: `/api/admin/roles/:id`
    pub api_route: String,
    /// 대문자 HTTP 메서드
    pub http_method: String,
    #[serde(default)]
    pub module: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub description_en: String,
    pub created_time: i64,
    pub updated_time: i64,
}

impl Permission {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        permission_name: String,
        permission_name_en: String,
        permission_code: String,
        api_route: String,
        http_method: String,
        module: String,
        description: String,
        description_en: String,
    ) -> Self {
        let now = Utc::now().timestamp();

        Self {
            id: None,
            permission_name,
            permission_name_en,
            permission_code,
            api_route,
            http_method: http_method.to_uppercase(),
            module,
            description,
            description_en,
            created_time: now,
            updated_time: now,
        }
    }
}
