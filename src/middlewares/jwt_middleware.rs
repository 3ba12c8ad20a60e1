//! JWT 인증 미들웨어
//!
//! `/api/*` 요청에서 토큰을 검증하고 [`AuthenticatedUser`]를 request extension에
//! 저장합니다. 비로그인 경로(`NON_LOGIN_PATHS_ADMIN`, `NON_LOGIN_PATHS_BACKEND`)는
//! 검사하지 않습니다.
//!
//! | 상황 | 응답 |
//! |------|------|
//! | 토큰 없음, 블랙리스트 토큰 | 401 `token无效` |
//! | 서명 불일치, 만료 | 401 `无效的token` |
//!
//! [`AuthenticatedUser`]: crate::domain::models::auth::AuthenticatedUser

use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};
use crate::middlewares::jwt_inner::JwtMiddlewareService;
use crate::services::auth::TokenService;

pub struct JwtMiddleware {
    tokens: Arc<TokenService>,
}

impl JwtMiddleware {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }

    /// 레지스트리의 `TokenService`를 사용하는 미들웨어
    pub fn from_registry() -> Self {
        Self::new(TokenService::instance())
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = JwtMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtMiddlewareService {
            service: Rc::new(service),
            tokens: Arc::clone(&self.tokens),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, web, App, HttpResponse};
    use mongodb::bson::oid::ObjectId;
    use serde_json::Value;
    use crate::caching::store::MemoryCacheStore;
    use crate::domain::entities::users::User;
    use crate::domain::models::auth::AuthenticatedUser;
    use crate::repositories::tokens::TokenBlacklistRepository;

    fn token_service() -> Arc<TokenService> {
        let blacklist = TokenBlacklistRepository::with_cache(Arc::new(MemoryCacheStore::new()));
        Arc::new(TokenService::with_blacklist(Arc::new(blacklist)))
    }

    fn member() -> User {
        let mut user = User::new(1234567890, "alice".into(), "a@b.c".into(), "h".into(), "p".into());
        user.id = Some(ObjectId::new());
        user
    }

    async fn whoami(user: AuthenticatedUser) -> HttpResponse {
        HttpResponse::Ok().body(user.username)
    }

    macro_rules! app {
        ($tokens:expr) => {
            test::init_service(
                App::new()
                    .wrap(JwtMiddleware::new($tokens))
                    .route("/api/backend/user/userinfo", web::get().to(whoami))
                    .route("/api/backend/user/login", web::post().to(|| async { HttpResponse::Ok().finish() }))
                    .route("/health", web::get().to(|| async { HttpResponse::Ok().finish() })),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_valid_token_sets_identity() {
        let tokens = token_service();
        let token = tokens.issue_user_token(&member()).unwrap();
        let app = app!(tokens);

        let req = test::TestRequest::get()
            .uri("/api/backend/user/userinfo")
            .insert_header(("token", token))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(test::read_body(res).await, "alice");
    }

    #[actix_web::test]
    async fn test_bearer_header_is_accepted() {
        let tokens = token_service();
        let token = tokens.issue_user_token(&member()).unwrap();
        let app = app!(tokens);

        let req = test::TestRequest::get()
            .uri("/api/backend/user/userinfo")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();

        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_missing_token_rejected() {
        let app = app!(token_service());

        let req = test::TestRequest::get().uri("/api/backend/user/userinfo").to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], 401);
        assert_eq!(body["msg"], "token无效");
    }

    #[actix_web::test]
    async fn test_garbage_token_rejected() {
        let app = app!(token_service());

        let req = test::TestRequest::get()
            .uri("/api/backend/user/userinfo")
            .insert_header(("token", "not-a-jwt"))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["msg"], "无效的token");
    }

    #[actix_web::test]
    async fn test_blacklisted_token_rejected() {
        let tokens = token_service();
        let token = tokens.issue_user_token(&member()).unwrap();
        tokens.blacklist(&token).await.unwrap();
        let app = app!(tokens);

        let req = test::TestRequest::get()
            .uri("/api/backend/user/userinfo")
            .insert_header(("token", token))
            .to_request();
        let res = test::call_service(&app, req).await;

        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["msg"], "token无效");
    }

    #[actix_web::test]
    async fn test_public_and_non_api_paths_skip_check() {
        let app = app!(token_service());

        let req = test::TestRequest::post().uri("/api/backend/user/login").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get().uri("/health").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }
}
