//! API 라우트 설정 모듈
//!
//! 엔드포인트를 플랫폼별 scope로 묶고, scope마다 필요한 미들웨어를 겁니다.
//!
//! # 미들웨어 배치
//!
//! ```text
//! /health                      (미들웨어 없음)
//! /api                         JwtMiddleware
//! ├── /admin                   AdminGuard
//! │   ├── /user                관리자 인증
//! │   └── /roles, /permissions, /users, /operation-logs, /system-configs
//! │                            PermissionMiddleware
//! ├── /backend/user            회원 인증
//! ├── /backend/support         인앱 후원
//! ├── /common/upload           파일 업로드
//! └── /ip-manage               IP 화이트리스트 관리
//! ```
//!
//! actix-web에서는 바깥 scope의 미들웨어가 먼저 실행되므로 JWT 검증이
//! 관리자 가드보다, 관리자 가드가 권한 검사보다 앞섭니다. 로그인 없이 열린
//! 경로는 각 미들웨어가 [`AccessPaths`](crate::config::AccessPaths)로 직접 건너뜁니다.

use actix_web::{error, get, web, HttpRequest, HttpResponse};
use chrono::Utc;
use serde_json::json;
use crate::domain::models::lang::Lang;
use crate::errors::AppError;
use crate::handlers::{admin, backend, common, ip_manage};
use crate::middlewares::{AdminGuard, JwtMiddleware, PermissionMiddleware};

pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check);
    configure_payload_errors(cfg);

    cfg.service(
        web::scope("/api")
            .wrap(JwtMiddleware::from_registry())
            .service(
                web::scope("/admin")
                    .wrap(AdminGuard::from_registry())
                    .configure(configure_admin_routes),
            )
            .service(web::scope("/backend").configure(configure_backend_routes))
            .service(web::scope("/common").service(common::upload::upload))
            .service(ip_manage::manage_whitelist),
    );
}

/// JSON 본문과 쿼리 스트링 파싱 실패를 공통 봉투(파라미터 오류)로 응답합니다.
pub fn configure_payload_errors(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, req| {
        payload_error(err.to_string(), req)
    }));
    cfg.app_data(web::QueryConfig::default().error_handler(|err, req| {
        payload_error(err.to_string(), req)
    }));
    cfg.app_data(web::PathConfig::default().error_handler(|err, req| {
        payload_error(err.to_string(), req)
    }));
}

fn payload_error(detail: String, req: &HttpRequest) -> error::Error {
    log::debug!("[Payload] {} {}: {}", req.method(), req.path(), detail);
    AppError::ValidationError(detail)
        .localized(Lang::from_request_headers(req))
        .into()
}

fn configure_admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/user")
            .service(admin::auth::login)
            .service(admin::auth::logout)
            .service(admin::auth::userinfo)
            .service(admin::auth::change_password),
    )
    .service(
        web::scope("/roles")
            .wrap(PermissionMiddleware::from_registry())
            .service(admin::roles::list_roles)
            .service(admin::roles::create_role)
            .service(admin::roles::role_permissions)
            .service(admin::roles::assign_permissions)
            .service(admin::roles::remove_permission)
            .service(admin::roles::get_role)
            .service(admin::roles::update_role)
            .service(admin::roles::delete_role),
    )
    .service(
        web::scope("/permissions")
            .wrap(PermissionMiddleware::from_registry())
            .service(admin::permissions::list_permissions)
            .service(admin::permissions::create_permission)
            .service(admin::permissions::get_permission)
            .service(admin::permissions::update_permission)
            .service(admin::permissions::delete_permission),
    )
    .service(
        web::scope("/users")
            .wrap(PermissionMiddleware::from_registry())
            .service(admin::user_roles::user_roles)
            .service(admin::user_roles::assign_role)
            .service(admin::user_roles::remove_all_roles)
            .service(admin::user_roles::remove_role)
            .service(admin::user_roles::user_permissions),
    )
    .service(
        web::scope("/operation-logs")
            .wrap(PermissionMiddleware::from_registry())
            .service(admin::operation_logs::list_operation_logs),
    )
    .service(
        web::scope("/system-configs")
            .wrap(PermissionMiddleware::from_registry())
            .service(admin::system_configs::list_configs)
            .service(admin::system_configs::all_configs)
            .service(admin::system_configs::config_float)
            .service(admin::system_configs::config_value)
            .service(admin::system_configs::create_config)
            .service(admin::system_configs::update_config)
            .service(admin::system_configs::delete_config),
    );
}

fn configure_backend_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/user")
            .service(backend::users::send_code)
            .service(backend::users::register)
            .service(backend::users::login)
            .service(backend::users::forgot_password)
            .service(backend::users::logout)
            .service(backend::users::user_info),
    )
    .service(web::scope("/support").service(backend::support::verify_ios_purchase));
}

#[get("/health")]
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "portal_backend",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now().to_rfc3339(),
        "features": {
            "database": "MongoDB",
            "cache": "Redis",
            "auth": "JWT + RBAC",
        }
    }))
}
