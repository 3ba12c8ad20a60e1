//! 인앱 후원 핸들러 (`/api/backend/support`)

use actix_web::{post, web, HttpResponse};
use crate::domain::dto::common::ApiResponse;
use crate::domain::dto::support::VerifyIosSupportRequest;
use crate::domain::models::{auth::AuthenticatedUser, lang::Lang};
use crate::errors::ApiResult;
use crate::services::support::SupportService;

/// App Store 영수증을 검증하고 후원액을 누적합니다.
///
/// 같은 `transaction_id`로 다시 호출하면 누적 없이 현재 상태를 돌려줍니다.
#[post("/ios/verify")]
pub async fn verify_ios_purchase(
    user: AuthenticatedUser,
    lang: Lang,
    payload: web::Json<VerifyIosSupportRequest>,
) -> ApiResult<HttpResponse> {
    let response = SupportService::instance()
        .verify_ios_purchase(&user, payload.into_inner())
        .await
        .map_err(|e| e.localized(lang))?;

    Ok(ApiResponse::success(response))
}
