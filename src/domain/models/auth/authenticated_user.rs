//! 요청 extension에 담기는 인증 정보와 추출자

use std::future::{ready, Ready};
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};
use crate::domain::entities::admin::AdminUser;
use crate::domain::models::token::TokenClaims;
use crate::errors::AppError;

/// JWT 미들웨어가 검증한 토큰의 주체
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// 사용자 ID (ObjectId 16진수 문자열)
    pub user_id: String,
    pub username: String,
    pub is_admin: bool,
    /// 로그아웃 시 블랙리스트에 올릴 원본 토큰
    #[serde(skip)]
    pub token: String,
}

impl AuthenticatedUser {
    pub fn from_claims(claims: TokenClaims, token: String) -> Self {
        Self {
            is_admin: claims.is_admin(),
            user_id: claims.user_id,
            username: claims.username,
            token,
        }
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(AppError::AuthenticationError(
                "未登录或登录信息无效".to_string(),
            ))),
        }
    }
}

/// 관리자 가드가 로드한 현재 관리자
#[derive(Debug, Clone)]
pub struct AdminContext {
    pub admin: AdminUser,
    pub token: String,
}

impl AdminContext {
    pub fn admin_id(&self) -> String {
        self.admin.id_string()
    }
}

impl FromRequest for AdminContext {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AdminContext>() {
            Some(context) => ready(Ok(context.clone())),
            None => ready(Err(AppError::AuthenticationError("未登录".to_string()))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_extractor_reads_extension() {
        let req = TestRequest::default().to_http_request();
        req.extensions_mut().insert(AuthenticatedUser {
            user_id: "abc".to_string(),
            username: "alice".to_string(),
            is_admin: false,
            token: "t".to_string(),
        });

        let user = AuthenticatedUser::extract(&req).await.unwrap();
        assert_eq!(user.username, "alice");
    }

    #[actix_web::test]
    async fn test_extractor_without_identity_fails() {
        let req = TestRequest::default().to_http_request();
        let result = AuthenticatedUser::extract(&req).await;

        assert!(matches!(result, Err(AppError::AuthenticationError(_))));
    }

    #[test]
    fn test_from_claims_maps_admin_flag() {
        let claims = TokenClaims {
            user_id: "id".to_string(),
            username: "root".to_string(),
            is_admin: 1,
            iat: 0,
            exp: 1,
        };
        let user = AuthenticatedUser::from_claims(claims, "tok".to_string());

        assert!(user.is_admin);
        assert_eq!(user.token, "tok");
    }
}
