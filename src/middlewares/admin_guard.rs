//! 관리자 플랫폼 가드
//!
//! `/api/admin/*` 요청(비로그인 경로 제외)에 대해 순서대로 확인합니다.
//!
//! 1. 클라이언트 IP가 화이트리스트에 있는지 (비활성화 시 통과)
//! 2. JWT 미들웨어가 넣은 신원이 관리자 토큰인지
//! 3. 관리자 계정이 존재하는지
//!
//! 통과하면 [`AdminContext`]를 request extension에 저장합니다.
//! JWT 미들웨어 안쪽에 배치해야 합니다.

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
use mongodb::bson::oid::ObjectId;
use crate::config::AccessPaths;
use crate::domain::entities::admin::AdminUser;
use crate::domain::models::auth::{AdminContext, AuthenticatedUser};
use crate::domain::models::request_meta::client_ip;
use crate::errors::AppResult;
use crate::middlewares::reject;
use crate::repositories::admin::AdminUserRepository;
use crate::services::security::IpWhitelistService;

/// 관리자 계정 조회
#[async_trait]
pub trait AdminLookup: Send + Sync {
    async fn find_admin(&self, id: &ObjectId) -> AppResult<Option<AdminUser>>;
}

#[async_trait]
impl AdminLookup for AdminUserRepository {
    async fn find_admin(&self, id: &ObjectId) -> AppResult<Option<AdminUser>> {
        self.find_by_id(id).await
    }
}

pub struct AdminGuard {
    whitelist: Arc<IpWhitelistService>,
    admins: Arc<dyn AdminLookup>,
}

impl AdminGuard {
    pub fn new(whitelist: Arc<IpWhitelistService>, admins: Arc<dyn AdminLookup>) -> Self {
        Self { whitelist, admins }
    }

    pub fn from_registry() -> Self {
        Self::new(IpWhitelistService::instance(), AdminUserRepository::instance())
    }
}

impl<S, B> Transform<S, ServiceRequest> for AdminGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AdminGuardService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AdminGuardService {
            service: Rc::new(service),
            whitelist: Arc::clone(&self.whitelist),
            admins: Arc::clone(&self.admins),
        }))
    }
}

pub struct AdminGuardService<S> {
    service: Rc<S>,
    whitelist: Arc<IpWhitelistService>,
    admins: Arc<dyn AdminLookup>,
}

impl<S, B> Service<ServiceRequest> for AdminGuardService<S>
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
        let whitelist = Arc::clone(&self.whitelist);
        let admins = Arc::clone(&self.admins);

        Box::pin(async move {
            let path = req.path().to_string();
            if !path.starts_with("/api/admin/") || AccessPaths::is_admin_public(&path) {
                let res = service.call(req).await?;
                return Ok(res.map_into_left_body());
            }

            let ip = client_ip(req.request());
            if !whitelist.is_allowed(&ip).await {
                log::warn!("[AdminGuard] 화이트리스트에 없는 IP: {} ({})", ip, path);
                return Ok(reject(req, StatusCode::UNAUTHORIZED, "IP地址不在白名单内"));
            }

            let identity = req.extensions().get::<AuthenticatedUser>().cloned();
            let identity = match identity {
                Some(identity) if identity.is_admin => identity,
                Some(identity) => {
                    log::warn!("[AdminGuard] 관리자 토큰이 아님: {}", identity.user_id);
                    return Ok(reject(req, StatusCode::UNAUTHORIZED, "无效的token"));
                }
                None => return Ok(reject(req, StatusCode::UNAUTHORIZED, "token无效")),
            };

            let admin = match ObjectId::parse_str(&identity.user_id) {
                Ok(id) => admins.find_admin(&id).await,
                Err(_) => Ok(None),
            };
            let admin = match admin {
                Ok(Some(admin)) => admin,
                Ok(None) => {
                    log::warn!("[AdminGuard] 관리자 없음: {}", identity.user_id);
                    return Ok(reject(req, StatusCode::UNAUTHORIZED, "管理员不存在"));
                }
                Err(e) => {
                    log::error!("[AdminGuard] 관리자 조회 실패 {}: {}", identity.user_id, e);
                    return Ok(reject(req, StatusCode::UNAUTHORIZED, "管理员不存在"));
                }
            };

            req.extensions_mut().insert(AdminContext {
                admin,
                token: identity.token,
            });

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}
