//! 관리자 계정 엔티티

use chrono::Utc;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// 관리자 계정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminUser {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 로그인 아이디 (unique)
    pub username: String,
    pub password_hash: String,
    #[serde(default)]
    pub real_name: String,
    /// 전역 unique 이메일
    pub email: String,
    #[serde(default)]
    pub phone: String,
    /// 1: 활성, 0: 비활성
    pub status: i32,
    /// 0: 초기 비밀번호 사용 중, 1: 비밀번호 변경 완료
    #[serde(default)]
    pub first_login: i32,
    /// OTP 시크릿
    #[serde(default)]
    pub verify_code: String,
    #[serde(default)]
    pub last_login_time: i64,
    pub created_time: i64,
    pub updated_time: i64,
}

impl AdminUser {
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        let now = Utc::now().timestamp();

        Self {
            id: None,
            username,
            password_hash,
            real_name: String::new(),
            email,
            phone: String::new(),
            status: 1,
            first_login: 0,
            verify_code: String::new(),
            last_login_time: 0,
            created_time: now,
            updated_time: now,
        }
    }

    pub fn id_string(&self) -> String {
        self.id.map(|id| id.to_hex()).unwrap_or_default()
    }

    pub fn is_active(&self) -> bool {
        self.status == 1
    }

    /// 비밀번호 해시와 OTP 시크릿을 비운 사본 (캐시, 요청 컨텍스트용)
    pub fn without_secrets(mut self) -> Self {
        self.password_hash.clear();
        self.verify_code.clear();
        self
    }
}
