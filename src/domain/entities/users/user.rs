//! User Entity Implementation
//!
//! 사용자 플랫폼 회원 엔티티입니다. 로그인 비밀번호와 결제 비밀번호를
//! 각각 bcrypt 해시로 보관하며, 인앱 후원 누적액과 등급을 함께 가집니다.

use chrono::Utc;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// 계정 상태: 정상
pub const USER_STATUS_ACTIVE: i32 = 1;
/// 계정 상태: 비활성화
pub const USER_STATUS_DISABLED: i32 = 0;

/// 사용자 엔티티
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 10자리 공개 사용자 번호 (unique)
    pub uid: i64,
    /// 사용자명 (unique)
    pub username: String,
    /// 이메일 (unique)
    pub email: String,
    /// 로그인 비밀번호 해시
    pub password_hash: String,
    /// 결제 비밀번호 해시
    pub pay_password_hash: String,
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub avatar: String,
    /// 1: 정상, 0: 비활성화
    pub status: i32,
    /// 누적 후원 금액
    #[serde(default)]
    pub support_total_amount: f64,
    /// 후원 등급 (0-5)
    #[serde(default)]
    pub support_level: i32,
    #[serde(default)]
    pub vip: i32,
    #[serde(default)]
    pub last_login_time: i64,
    pub created_time: i64,
    pub updated_time: i64,
}

impl User {
    /// 회원가입으로 생성되는 활성 사용자
    pub fn new(
        uid: i64,
        username: String,
        email: String,
        password_hash: String,
        pay_password_hash: String,
    ) -> Self {
        let now = Utc::now().timestamp();

        Self {
            id: None,
            uid,
            username,
            email,
            password_hash,
            pay_password_hash,
            nickname: String::new(),
            avatar: String::new(),
            status: USER_STATUS_ACTIVE,
            support_total_amount: 0.0,
            support_level: 0,
            vip: 0,
            last_login_time: 0,
            created_time: now,
            updated_time: now,
        }
    }

    /// ObjectId의 16진수 문자열 (토큰 클레임과 응답에 사용)
    pub fn id_string(&self) -> String {
        self.id.map(|id| id.to_hex()).unwrap_or_default()
    }

    pub fn is_active(&self) -> bool {
        self.status == USER_STATUS_ACTIVE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_defaults() {
        let user = User::new(
            1234567890,
            "alice".to_string(),
            "alice@example.com".to_string(),
            "hash".to_string(),
            "pay".to_string(),
        );

        assert!(user.is_active());
        assert_eq!(user.support_level, 0);
        assert_eq!(user.vip, 0);
        assert_eq!(user.created_time, user.updated_time);
        assert_eq!(user.id_string(), "");
    }

    #[test]
    fn test_disabled_user_is_inactive() {
        let mut user = User::new(1, "a".into(), "a@b.c".into(), "h1".into(), "h2".into());
        user.status = USER_STATUS_DISABLED;

        assert!(!user.is_active());
    }

    #[test]
    fn test_password_hashes_are_persisted() {
        let user = User::new(1, "a".into(), "a@b.c".into(), "h1".into(), "h2".into());
        let doc = mongodb::bson::to_document(&user).unwrap();

        assert_eq!(doc.get_str("password_hash").unwrap(), "h1");
        assert_eq!(doc.get_str("pay_password_hash").unwrap(), "h2");
        assert!(!doc.contains_key("_id"));
    }
}
