//! 관리자 인증 DTO

use serde::{Deserialize, Serialize};
use crate::domain::entities::admin::AdminUser;

/// 관리자 로그인 요청
///
/// 필드별 누락 메시지를 따로 돌려주기 위해 검증은 서비스에서 수행합니다.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AdminLoginRequest {
    pub username: String,
    pub password: String,
    /// OTP 코드
    pub verify_code: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

/// 비밀번호와 OTP 시크릿을 제외한 관리자 정보
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminUserResponse {
    pub id: String,
    pub username: String,
    pub real_name: String,
    pub email: String,
    pub phone: String,
    pub status: i32,
    pub last_login_time: i64,
    pub created_time: i64,
    pub updated_time: i64,
    pub first_login: i32,
}

impl From<&AdminUser> for AdminUserResponse {
    fn from(admin: &AdminUser) -> Self {
        Self {
            id: admin.id_string(),
            username: admin.username.clone(),
            real_name: admin.real_name.clone(),
            email: admin.email.clone(),
            phone: admin.phone.clone(),
            status: admin.status,
            last_login_time: admin.last_login_time,
            created_time: admin.created_time,
            updated_time: admin.updated_time,
            first_login: admin.first_login,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AdminLoginResponse {
    pub token: String,
    pub user: AdminUserResponse,
    /// 보유 역할 코드
    pub roles: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct AdminUserInfoResponse {
    pub user: AdminUserResponse,
    pub roles: Vec<String>,
}
