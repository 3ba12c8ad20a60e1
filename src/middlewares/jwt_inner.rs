//! JwtMiddleware 토큰 검증 로직
use std::rc::Rc;
use std::sync::Arc;
use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{Error, HttpMessage};
use futures_util::future::LocalBoxFuture;
use crate::config::AccessPaths;
use crate::domain::models::auth::AuthenticatedUser;
use crate::middlewares::reject;
use crate::services::auth::{extract_request_token, TokenService};

pub struct JwtMiddlewareService<S> {
    pub service: Rc<S>,
    pub tokens: Arc<TokenService>,
}

impl<S, B> Service<ServiceRequest> for JwtMiddlewareService<S>
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
        let tokens = Arc::clone(&self.tokens);

        Box::pin(async move {
            let path = req.path().to_string();
            if !path.starts_with("/api/") || AccessPaths::is_public(&path) {
                let res = service.call(req).await?;
                return Ok(res.map_into_left_body());
            }

            let token = match extract_request_token(req.headers()) {
                Some(token) => token,
                None => {
                    log::warn!("[JWT] 토큰 없음: {} {}", req.method(), path);
                    return Ok(reject(req, StatusCode::UNAUTHORIZED, "token无效"));
                }
            };

            if tokens.is_blacklisted(&token).await {
                log::warn!("[JWT] 블랙리스트 토큰: {}", path);
                return Ok(reject(req, StatusCode::UNAUTHORIZED, "token无效"));
            }

            let claims = match tokens.verify(&token) {
                Ok(claims) => claims,
                Err(e) => {
                    log::warn!("[JWT] 토큰 검증 실패 ({}): {}", path, e);
                    return Ok(reject(req, StatusCode::UNAUTHORIZED, "无效的token"));
                }
            };

            let user = AuthenticatedUser::from_claims(claims, token);
            log::debug!("[JWT] 인증 성공: {} ({})", user.username, user.user_id);
            req.extensions_mut().insert(user);

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}
