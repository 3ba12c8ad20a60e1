//! 미들웨어 모듈
//!
//! 요청 처리 파이프라인의 횡단 관심사를 담당합니다.
//!
//! # 제공 미들웨어
//!
//! | 미들웨어 | 적용 범위 | 역할 |
//! |----------|-----------|------|
//! | [`JwtMiddleware`] | `/api/*` | 토큰 검증, `AuthenticatedUser` 저장 |
//! | [`AdminGuard`] | `/api/admin/*` | IP 화이트리스트, 관리자 확인, `AdminContext` 저장 |
//! | [`PermissionMiddleware`] | 관리 API | 역할 기반 경로/메서드 권한 검사 |
//! | [`configure_cors`] | 전체 | CORS |
//!
//! # 사용 방법
//!
//! ```rust,ignore
//! App::new()
//!     .wrap(JwtMiddleware::from_registry())
//!     .service(
//!         web::scope("/api/admin")
//!             .wrap(AdminGuard::from_registry())
//!             .service(
//!                 web::scope("/roles")
//!                     .wrap(PermissionMiddleware::from_registry())
//!                     .service(handlers::admin::roles::list_roles),
//!             ),
//!     )
//! ```
//!
//! 거부 응답은 모두 `{"code": <status>, "msg": "...", "data": null}` 형태입니다.

pub mod jwt_middleware;
mod jwt_inner;
pub mod admin_guard;
pub mod permission_middleware;
pub mod cors;

use actix_web::body::EitherBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use crate::domain::dto::common::ApiResponse;

pub use jwt_middleware::JwtMiddleware;
pub use admin_guard::AdminGuard;
pub use permission_middleware::PermissionMiddleware;
pub use cors::configure_cors;

/// 요청을 처리하지 않고 실패 봉투로 응답합니다.
pub(crate) fn reject<B>(req: ServiceRequest, status: StatusCode, msg: &str) -> ServiceResponse<EitherBody<B>> {
    let response = HttpResponse::build(status).json(ApiResponse::<()>::failure(i64::from(status.as_u16()), msg));
    let (req, _) = req.into_parts();
    ServiceResponse::new(req, response).map_into_right_body()
}
