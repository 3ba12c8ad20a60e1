//! 권한 검사 미들웨어
//!
//! 관리 API에 적용되며, 현재 관리자의 역할에 연결된 권한 중 요청 경로와
//! HTTP 메서드가 모두 맞는 항목이 있을 때만 통과시킵니다.
//! 권한 조회 중 오류가 나면 거부합니다.

use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::StatusCode,
    Error, HttpMessage, Result,
};
use async_trait::async_trait;
use futures_util::future::LocalBoxFuture;
use crate::config::AccessPaths;
use crate::domain::models::auth::AuthenticatedUser;
use crate::errors::AppResult;
use crate::middlewares::reject;
use crate::services::rbac::RbacService;

#[async_trait]
pub trait PermissionChecker: Send + Sync {
    async fn has_permission(&self, user_id: &str, route: &str, method: &str) -> AppResult<bool>;
}

#[async_trait]
impl PermissionChecker for RbacService {
    async fn has_permission(&self, user_id: &str, route: &str, method: &str) -> AppResult<bool> {
        RbacService::has_permission(self, user_id, route, method).await
    }
}

pub struct PermissionMiddleware {
    checker: Arc<dyn PermissionChecker>,
}

impl PermissionMiddleware {
    pub fn new(checker: Arc<dyn PermissionChecker>) -> Self {
        Self { checker }
    }

    pub fn from_registry() -> Self {
        Self::new(RbacService::instance())
    }
}

impl<S, B> Transform<S, ServiceRequest> for PermissionMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = PermissionMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(PermissionMiddlewareService {
            service: Rc::new(service),
            checker: Arc::clone(&self.checker),
        }))
    }
}

pub struct PermissionMiddlewareService<S> {
    service: Rc<S>,
    checker: Arc<dyn PermissionChecker>,
}

impl<S, B> Service<ServiceRequest> for PermissionMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let checker = Arc::clone(&self.checker);

        Box::pin(async move {
            let path = req.path().to_string();
            if AccessPaths::skips_permission_check(&path) {
                let res = service.call(req).await?;
                return Ok(res.map_into_left_body());
            }

            let identity = req.extensions().get::<AuthenticatedUser>().cloned();
            let Some(identity) = identity else {
                return Ok(reject(req, StatusCode::UNAUTHORIZED, "未登录或登录信息无效"));
            };

            let method = req.method().as_str().to_string();
            let allowed = match checker.has_permission(&identity.user_id, &path, &method).await {
                Ok(allowed) => allowed,
                Err(e) => {
                    log::error!("[Permission] 권한 조회 실패 {}: {}", identity.user_id, e);
                    false
                }
            };

            if !allowed {
                log::warn!("[Permission] 접근 거부: user={}, {} {}", identity.username, method, path);
                return Ok(reject(req, StatusCode::FORBIDDEN, "无权限访问"));
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App, HttpResponse};
    use serde_json::Value;
    use crate::errors::AppError;
    use crate::services::rbac::route_matcher::match_route;

    /// (경로 패턴, 메서드) 목록으로 판정하는 검사기
    struct StaticRules(Vec<(&'static str, &'static str)>);

    #[async_trait]
    impl PermissionChecker for StaticRules {
        async fn has_permission(&self, _user_id: &str, route: &str, method: &str) -> AppResult<bool> {
            Ok(self
                .0
                .iter()
                .any(|(pattern, allowed)| match_route(pattern, route) && *allowed == method))
        }
    }

    struct FailingChecker;

    #[async_trait]
    impl PermissionChecker for FailingChecker {
        async fn has_permission(&self, _: &str, _: &str, _: &str) -> AppResult<bool> {
            Err(AppError::DatabaseError("down".to_string()))
        }
    }

    async fn status_and_body(
        checker: Arc<dyn PermissionChecker>,
        logged_in: bool,
        method: actix_web::http::Method,
        uri: &str,
    ) -> (StatusCode, Value) {
        let app = test::init_service(
            App::new()
                .wrap(PermissionMiddleware::new(checker))
                .wrap_fn(move |req, srv| {
                    if logged_in {
                        req.extensions_mut().insert(AuthenticatedUser {
                            user_id: "u1".to_string(),
                            username: "root".to_string(),
                            is_admin: true,
                            token: "t".to_string(),
                        });
                    }
                    srv.call(req)
                })
                .default_service(web::to(|| async { HttpResponse::Ok().json(serde_json::json!({"ok": true})) })),
        )
        .await;

        let req = test::TestRequest::default().method(method).uri(uri).to_request();
        let res = test::call_service(&app, req).await;
        let status = res.status();
        (status, test::read_body_json(res).await)
    }

    fn rules() -> Arc<dyn PermissionChecker> {
        Arc::new(StaticRules(vec![("/api/admin/roles/:id", "GET"), ("/api/admin/roles", "POST")]))
    }

    #[actix_web::test]
    async fn test_matching_permission_allows() {
        let (status, _) = status_and_body(rules(), true, actix_web::http::Method::GET, "/api/admin/roles/42").await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = status_and_body(rules(), true, actix_web::http::Method::POST, "/api/admin/roles").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_method_mismatch_forbidden() {
        let (status, body) =
            status_and_body(rules(), true, actix_web::http::Method::DELETE, "/api/admin/roles/42").await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["code"], 403);
        assert_eq!(body["msg"], "无权限访问");
    }

    #[actix_web::test]
    async fn test_missing_identity_unauthorized() {
        let (status, body) = status_and_body(rules(), false, actix_web::http::Method::GET, "/api/admin/roles/1").await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["msg"], "未登录或登录信息无效");
    }

    #[actix_web::test]
    async fn test_lookup_error_denies() {
        let (status, _) =
            status_and_body(Arc::new(FailingChecker), true, actix_web::http::Method::GET, "/api/admin/roles/1").await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn test_exempt_path_skips_check() {
        let (status, _) =
            status_and_body(Arc::new(FailingChecker), false, actix_web::http::Method::POST, "/api/common/upload").await;
        assert_eq!(status, StatusCode::OK);
    }
}
