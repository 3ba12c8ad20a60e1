//! 회원 인증 핸들러 (`/api/backend/user`)
//!
//! `send-code`, `register`, `login`은 로그인 없이 호출할 수 있고
//! 나머지는 JWT 미들웨어가 넣어 준 [`AuthenticatedUser`]가 필요합니다.

use actix_web::{get, post, web, HttpResponse};
use crate::domain::dto::common::ApiResponse;
use crate::domain::dto::users::{ForgotPasswordRequest, LoginRequest, RegisterRequest, SendCodeRequest};
use crate::domain::models::{auth::AuthenticatedUser, lang::Lang};
use crate::errors::ApiResult;
use crate::services::users::MemberService;

/// 회원가입(`type=1`) 또는 비밀번호 재설정(`type=2`) 인증 코드 발송
#[post("/send-code")]
pub async fn send_code(lang: Lang, payload: web::Json<SendCodeRequest>) -> ApiResult<HttpResponse> {
    let response = MemberService::instance()
        .send_code(payload.into_inner())
        .await
        .map_err(|e| e.localized(lang))?;

    Ok(ApiResponse::success(response))
}

#[post("/register")]
pub async fn register(lang: Lang, payload: web::Json<RegisterRequest>) -> ApiResult<HttpResponse> {
    let response = MemberService::instance()
        .register(payload.into_inner())
        .await
        .map_err(|e| e.localized(lang))?;

    Ok(ApiResponse::success(response))
}

#[post("/login")]
pub async fn login(lang: Lang, payload: web::Json<LoginRequest>) -> ApiResult<HttpResponse> {
    let response = MemberService::instance()
        .login(payload.into_inner())
        .await
        .map_err(|e| e.localized(lang))?;

    Ok(ApiResponse::success(response))
}

#[post("/forgot-password")]
pub async fn forgot_password(
    _user: AuthenticatedUser,
    lang: Lang,
    payload: web::Json<ForgotPasswordRequest>,
) -> ApiResult<HttpResponse> {
    let response = MemberService::instance()
        .forgot_password(payload.into_inner())
        .await
        .map_err(|e| e.localized(lang))?;

    Ok(ApiResponse::success(response))
}

#[post("/logout")]
pub async fn logout(user: AuthenticatedUser, lang: Lang) -> ApiResult<HttpResponse> {
    let response = MemberService::instance()
        .logout(&user)
        .await
        .map_err(|e| e.localized(lang))?;

    Ok(ApiResponse::success(response))
}

#[get("/userinfo")]
pub async fn user_info(user: AuthenticatedUser, lang: Lang) -> ApiResult<HttpResponse> {
    let response = MemberService::instance()
        .user_info(&user)
        .await
        .map_err(|e| e.localized(lang))?;

    Ok(ApiResponse::success(response))
}
