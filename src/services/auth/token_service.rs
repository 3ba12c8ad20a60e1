//! JWT 토큰 관리 서비스 구현
//!
//! HS256으로 서명된 단일 액세스 토큰을 발급/검증하고, 로그아웃된 토큰을
//! 블랙리스트로 관리합니다. 관리자 토큰과 회원 토큰은 `is_admin` 클레임으로
//! 구분됩니다.

use std::sync::Arc;
use actix_web::http::header::{HeaderMap, AUTHORIZATION};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use singleton_macro::service;
use crate::{
    config::JwtConfig,
    domain::entities::{admin::AdminUser, users::User},
    domain::models::token::TokenClaims,
    errors::{AppError, AppResult, ErrorCode},
    repositories::tokens::TokenBlacklistRepository,
};

/// 서명 키와 만료 시간은 호출 시점에 [`JwtConfig`]에서 읽습니다.
#[service(name = "token")]
pub struct TokenService {
    blacklist: Arc<TokenBlacklistRepository>,
}

/// 요청 헤더에서 토큰을 꺼냅니다.
///
/// `token` 헤더를 우선하고, 없으면 `Authorization: Bearer <token>`을 봅니다.
pub fn extract_request_token(headers: &HeaderMap) -> Option<String> {
    let header_value = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
    };

    if let Some(token) = header_value("token") {
        return Some(token.to_string());
    }

    header_value(AUTHORIZATION.as_str())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

impl TokenService {
    #[cfg(test)]
    pub(crate) fn with_blacklist(blacklist: Arc<TokenBlacklistRepository>) -> Self {
        Self { blacklist }
    }

    /// 회원 토큰 (`is_admin = 0`)
    pub fn issue_user_token(&self, user: &User) -> AppResult<String> {
        self.issue(user.id_string(), &user.username, false)
    }

    /// 관리자 토큰 (`is_admin = 1`)
    pub fn issue_admin_token(&self, admin: &AdminUser) -> AppResult<String> {
        self.issue(admin.id_string(), &admin.username, true)
    }

    fn issue(&self, user_id: String, username: &str, is_admin: bool) -> AppResult<String> {
        if user_id.is_empty() {
            return Err(AppError::InternalError("토큰 발급 대상의 ID가 없습니다".to_string()));
        }

        let now = Utc::now();
        let claims = TokenClaims {
            user_id,
            username: username.to_string(),
            is_admin: i32::from(is_admin),
            iat: now.timestamp(),
            exp: (now + Duration::hours(JwtConfig::expiration_hours())).timestamp(),
        };

        let secret = JwtConfig::secret();
        encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes()))
            .map_err(|e| AppError::InternalError(format!("JWT 토큰 생성 실패: {}", e)))
    }

    /// 서명과 만료를 검증하고 클레임을 반환합니다.
    ///
    /// 만료는 `TOKEN_EXPIRED`, 그 외 모든 실패는 `TOKEN_INVALID`입니다.
    /// `exp`가 지난 토큰은 1초도 허용하지 않습니다 (leeway 0).
    pub fn verify(&self, token: &str) -> AppResult<TokenClaims> {
        let secret = JwtConfig::secret();
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        let mut validation = Validation::default();
        validation.leeway = 0;

        decode::<TokenClaims>(token, &decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AppError::business(ErrorCode::TokenExpired),
                _ => AppError::business(ErrorCode::TokenInvalid),
            })
    }

    /// 토큰을 남은 수명 동안 블랙리스트에 올립니다.
    ///
    /// 이미 만료되었거나 해석할 수 없는 토큰은 저장하지 않습니다.
    pub async fn blacklist(&self, token: &str) -> AppResult<()> {
        let claims = match self.verify(token) {
            Ok(claims) => claims,
            Err(_) => {
                log::debug!("만료되었거나 유효하지 않은 토큰은 블랙리스트에 저장하지 않습니다");
                return Ok(());
            }
        };

        match claims.remaining_seconds(Utc::now().timestamp()) {
            Some(ttl) => self.blacklist.add(token, ttl).await,
            None => Ok(()),
        }
    }

    /// 캐시 장애 시에는 false (로그만 남김)
    pub async fn is_blacklisted(&self, token: &str) -> bool {
        match self.blacklist.contains(token).await {
            Ok(listed) => listed,
            Err(e) => {
                log::error!("토큰 블랙리스트 조회 실패: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::header::HeaderValue;
    use mongodb::bson::oid::ObjectId;
    use crate::caching::store::{CacheStore, MemoryCacheStore};

    fn service_with(cache: Arc<MemoryCacheStore>) -> TokenService {
        TokenService::with_blacklist(Arc::new(TokenBlacklistRepository::with_cache(cache)))
    }

    fn sign(claims: &TokenClaims, secret: &str) -> String {
        encode(&Header::default(), claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
    }

    fn claims_expiring_at(exp: i64) -> TokenClaims {
        TokenClaims {
            user_id: ObjectId::new().to_hex(),
            username: "alice".into(),
            is_admin: 0,
            iat: exp - 3600,
            exp,
        }
    }

    fn user() -> User {
        let mut user = User::new(1234567890, "alice".into(), "a@b.c".into(), "h".into(), "p".into());
        user.id = Some(ObjectId::new());
        user
    }

    #[test]
    fn test_issue_and_verify_user_token() {
        let service = service_with(Arc::new(MemoryCacheStore::new()));
        let user = user();

        let token = service.issue_user_token(&user).unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.user_id, user.id_string());
        assert_eq!(claims.username, "alice");
        assert!(!claims.is_admin());
        assert_eq!(claims.exp - claims.iat, JwtConfig::expiration_hours() * 3600);
    }

    #[test]
    fn test_admin_token_sets_flag() {
        let service = service_with(Arc::new(MemoryCacheStore::new()));
        let mut admin = AdminUser::new("root".into(), "root@b.c".into(), "h".into());
        admin.id = Some(ObjectId::new());

        let token = service.issue_admin_token(&admin).unwrap();
        assert!(service.verify(&token).unwrap().is_admin());
    }

    #[test]
    fn test_verify_rejects_foreign_signature_and_garbage() {
        let service = service_with(Arc::new(MemoryCacheStore::new()));
        let foreign_secret = format!("{}-other", JwtConfig::secret());
        let token = sign(&claims_expiring_at(Utc::now().timestamp() + 3600), &foreign_secret);

        assert_eq!(service.verify(&token).unwrap_err().error_code(), ErrorCode::TokenInvalid);
        assert_eq!(service.verify("garbage").unwrap_err().error_code(), ErrorCode::TokenInvalid);
    }

    #[test]
    fn test_verify_reports_expired_token() {
        let service = service_with(Arc::new(MemoryCacheStore::new()));
        let token = sign(&claims_expiring_at(Utc::now().timestamp() - 3600), &JwtConfig::secret());

        assert_eq!(service.verify(&token).unwrap_err().error_code(), ErrorCode::TokenExpired);
    }

    #[actix_web::test]
    async fn test_recently_expired_token_gets_no_grace_period() {
        let cache = Arc::new(MemoryCacheStore::new());
        let service = service_with(cache.clone());
        let token = sign(&claims_expiring_at(Utc::now().timestamp() - 30), &JwtConfig::secret());

        assert_eq!(service.verify(&token).unwrap_err().error_code(), ErrorCode::TokenExpired);

        service.blacklist(&token).await.unwrap();
        assert!(!cache.exists(&format!("token_blacklist:{}", token)).await.unwrap());
    }

    #[test]
    fn test_issue_requires_persisted_user() {
        let service = service_with(Arc::new(MemoryCacheStore::new()));
        let unsaved = User::new(1, "a".into(), "a@b.c".into(), "h".into(), "p".into());

        assert!(service.issue_user_token(&unsaved).is_err());
    }

    #[actix_web::test]
    async fn test_blacklist_uses_remaining_lifetime() {
        let cache = Arc::new(MemoryCacheStore::new());
        let service = service_with(cache.clone());
        let token = service.issue_user_token(&user()).unwrap();

        assert!(!service.is_blacklisted(&token).await);
        service.blacklist(&token).await.unwrap();

        assert!(service.is_blacklisted(&token).await);
        assert!(cache.exists(&format!("token_blacklist:{}", token)).await.unwrap());
    }

    #[actix_web::test]
    async fn test_blacklist_skips_unparseable_token() {
        let cache = Arc::new(MemoryCacheStore::new());
        let service = service_with(cache.clone());

        service.blacklist("not-a-token").await.unwrap();
        assert!(!cache.exists("token_blacklist:not-a-token").await.unwrap());
    }

    #[test]
    fn test_extract_request_token() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_request_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert_eq!(extract_request_token(&headers), Some("abc".to_string()));

        headers.insert(
            actix_web::http::header::HeaderName::from_static("token"),
            HeaderValue::from_static("xyz"),
        );
        assert_eq!(extract_request_token(&headers), Some("xyz".to_string()));

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(extract_request_token(&headers), None);
    }
}
