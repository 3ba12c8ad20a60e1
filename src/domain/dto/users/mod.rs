//! 사용자 플랫폼 회원 DTO
//!
//! 응답 코드 순서가 클라이언트와 합의되어 있으므로 모든 필드는
//! 기본값으로 역직렬화하고 검증은 서비스 계층에서 순서대로 수행합니다.

use serde::{Deserialize, Serialize};
use crate::domain::entities::users::User;

/// 인증 코드 발송 요청 (`type`: "1" 회원가입, "2" 비밀번호 찾기)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SendCodeRequest {
    pub email: String,
    #[serde(rename = "type")]
    pub code_type: String,
}

#[derive(Debug, Serialize)]
pub struct SendCodeResponse {
    /// 코드 유효 시간(초)
    pub expire_time: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub pay_password: String,
    pub code: String,
    pub invite_code: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// 비밀번호 재설정 요청 (`password_type`: 1 로그인 비밀번호, 2 결제 비밀번호, 0은 1로 취급)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ForgotPasswordRequest {
    pub email: String,
    pub code: String,
    pub new_password: String,
    pub pay_password: String,
    pub password_type: i32,
}

/// 클라이언트에 노출되는 회원 정보
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfoResponse {
    pub id: String,
    pub uid: i64,
    pub username: String,
    pub email: String,
    pub nickname: String,
    pub avatar: String,
    pub status: i32,
    pub last_login_time: i64,
    pub created_time: i64,
    pub updated_time: i64,
}

impl From<&User> for UserInfoResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id_string(),
            uid: user.uid,
            username: user.username.clone(),
            email: user.email.clone(),
            nickname: user.nickname.clone(),
            avatar: user.avatar.clone(),
            status: user.status,
            last_login_time: user.last_login_time,
            created_time: user.created_time,
            updated_time: user.updated_time,
        }
    }
}

/// 로그인/회원가입 응답
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user_info: UserInfoResponse,
    /// 회원가입 응답에만 포함
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_parent: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_code_request_reads_type_field() {
        let req: SendCodeRequest = serde_json::from_str(r#"{"email":"a@b.c","type":"2"}"#).unwrap();
        assert_eq!(req.code_type, "2");
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let req: RegisterRequest = serde_json::from_str("{}").unwrap();
        assert!(req.username.is_empty());

        let req: ForgotPasswordRequest = serde_json::from_str(r#"{"email":"a@b.c"}"#).unwrap();
        assert_eq!(req.password_type, 0);
    }

    #[test]
    fn test_login_response_omits_has_parent() {
        let user = User::new(1, "a".into(), "a@b.c".into(), "h".into(), "p".into());
        let response = AuthResponse {
            token: "t".to_string(),
            user_info: UserInfoResponse::from(&user),
            has_parent: None,
        };
        let json = serde_json::to_value(response).unwrap();

        assert!(json.get("has_parent").is_none());
        assert!(json["user_info"].get("password_hash").is_none());
    }
}
