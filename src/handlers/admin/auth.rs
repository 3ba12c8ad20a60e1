//! 관리자 인증 핸들러
//!
//! | 메서드 | 경로 | 설명 |
//! |--------|------|------|
//! | `POST` | `/api/admin/user/login` | 로그인 (비로그인 경로) |
//! | `POST` | `/api/admin/user/logout` | 로그아웃 |
//! | `GET` | `/api/admin/user/userinfo` | 내 정보 |
//! | `POST` | `/api/admin/user/change-password` | 비밀번호 변경 |

use actix_web::{get, post, web, HttpRequest, HttpResponse};
use crate::domain::dto::admin::{AdminLoginRequest, ChangePasswordRequest};
use crate::domain::dto::common::ApiResponse;
use crate::domain::models::{auth::AdminContext, lang::Lang, request_meta::RequestMeta};
use crate::errors::ApiResult;
use crate::services::auth::AdminAuthService;

#[post("/login")]
pub async fn login(
    req: HttpRequest,
    lang: Lang,
    payload: web::Json<AdminLoginRequest>,
) -> ApiResult<HttpResponse> {
    let meta = RequestMeta::from_request(&req);
    let response = AdminAuthService::instance()
        .login(payload.into_inner(), &meta)
        .await
        .map_err(|e| e.localized(lang))?;

    Ok(ApiResponse::success(response))
}

#[post("/logout")]
pub async fn logout(context: AdminContext, lang: Lang) -> ApiResult<HttpResponse> {
    let response = AdminAuthService::instance()
        .logout(&context)
        .await
        .map_err(|e| e.localized(lang))?;

    Ok(ApiResponse::success(response))
}

#[get("/userinfo")]
pub async fn userinfo(context: AdminContext, lang: Lang) -> ApiResult<HttpResponse> {
    let response = AdminAuthService::instance()
        .userinfo(&context)
        .await
        .map_err(|e| e.localized(lang))?;

    Ok(ApiResponse::success(response))
}

#[post("/change-password")]
pub async fn change_password(
    req: HttpRequest,
    context: AdminContext,
    lang: Lang,
    payload: web::Json<ChangePasswordRequest>,
) -> ApiResult<HttpResponse> {
    let meta = RequestMeta::from_request(&req);
    let response = AdminAuthService::instance()
        .change_password(&context, payload.into_inner(), &meta)
        .await
        .map_err(|e| e.localized(lang))?;

    Ok(ApiResponse::success(response))
}
