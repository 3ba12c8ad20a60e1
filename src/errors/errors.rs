//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! `thiserror`와 `actix_web::ResponseError`를 사용하여 타입 안전하고
//! 일관된 에러 처리를 제공합니다. 모든 에러는 최종적으로
//! `{"code", "msg", "data"}` 응답 봉투로 변환됩니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::{AppError, ErrorCode};
//!
//! async fn send_code(email: &str) -> Result<(), AppError> {
//!     if email.is_empty() {
//!         return Err(AppError::business(ErrorCode::EmailEmpty));
//!     }
//!     Ok(())
//! }
//! ```

use std::fmt;
use actix_web::HttpResponse;
use thiserror::Error;
use crate::domain::dto::common::ApiResponse;
use crate::domain::models::lang::Lang;
use crate::errors::codes::ErrorCode;

/// 애플리케이션 전역 에러 타입
///
/// 범주형 변형(DatabaseError 등)과 클라이언트와 합의된 비즈니스 코드를
/// 직접 싣는 [`AppError::Business`]로 구성됩니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 데이터베이스 관련 에러 (500)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Redis 캐시 관련 에러 (500)
    #[error("Redis error: {0}")]
    RedisError(String),

    /// 입력값 검증 에러 (400)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 리소스 찾을 수 없음 에러 (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 충돌/중복 에러 (2015)
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 인증 실패 에러 (401)
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 권한 부족 에러 (403)
    #[error("Authorization error: {0}")]
    AuthorizationError(String),

    /// 외부 서비스 에러 (500)
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 내부 서버 에러 (500)
    #[error("Internal server error: {0}")]
    InternalError(String),

    /// 비즈니스 코드 에러, 선택적인 상세 메시지 포함
    #[error("Business error {0:?}: {1:?}")]
    Business(ErrorCode, Option<String>),
}

impl AppError {
    pub fn business(code: ErrorCode) -> Self {
        AppError::Business(code, None)
    }

    pub fn business_with(code: ErrorCode, detail: impl Into<String>) -> Self {
        AppError::Business(code, Some(detail.into()))
    }

    /// 응답 봉투에 실릴 비즈니스 코드
    pub fn error_code(&self) -> ErrorCode {
        match self {
            AppError::Business(code, _) => *code,
            AppError::ValidationError(_) => ErrorCode::ParamsError,
            AppError::NotFound(_) => ErrorCode::NotFound,
            AppError::ConflictError(_) => ErrorCode::RecordExists,
            AppError::AuthenticationError(_) => ErrorCode::Unauthorized,
            AppError::AuthorizationError(_) => ErrorCode::Forbidden,
            AppError::DatabaseError(_)
            | AppError::RedisError(_)
            | AppError::ExternalServiceError(_)
            | AppError::InternalError(_) => ErrorCode::ServerError,
        }
    }

    /// 클라이언트에 노출해도 되는 상세 메시지
    ///
    /// 인프라 계열 에러의 상세는 로그에만 남깁니다.
    pub fn client_detail(&self) -> Option<&str> {
        match self {
            AppError::Business(_, detail) => detail.as_deref(),
            AppError::ValidationError(msg)
            | AppError::NotFound(msg)
            | AppError::ConflictError(msg)
            | AppError::AuthenticationError(msg)
            | AppError::AuthorizationError(msg) => Some(msg.as_str()),
            _ => None,
        }
    }

    /// 언어를 지정하여 HTTP 응답용 에러로 변환합니다.
    pub fn localized(self, lang: Lang) -> ApiError {
        ApiError { error: self, lang }
    }

    /// 지정한 언어로 응답 메시지를 조합합니다.
    ///
    /// 상세가 있으면 `기본메시지(상세)` 형태가 됩니다.
    pub fn render_message(&self, lang: Lang) -> String {
        let base = self.error_code().message(lang);
        match self.client_detail() {
            Some(detail) if !detail.is_empty() => format!("{}({})", base, detail),
            _ => base.to_string(),
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        self.error_code().http_status()
    }

    /// 언어 정보가 없으면 기본 언어로 응답합니다.
    fn error_response(&self) -> HttpResponse {
        render_error(self, Lang::default())
    }
}

/// 요청 언어가 결합된 HTTP 응답용 에러
///
/// 핸들러는 `service.call().await.map_err(|e| e.localized(lang))?` 형태로
/// 언어를 결합하여 반환합니다.
#[derive(Debug)]
pub struct ApiError {
    pub error: AppError,
    pub lang: Lang,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error, f)
    }
}

impl From<AppError> for ApiError {
    fn from(error: AppError) -> Self {
        ApiError { error, lang: Lang::default() }
    }
}

impl actix_web::ResponseError for ApiError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        self.error.error_code().http_status()
    }

    fn error_response(&self) -> HttpResponse {
        render_error(&self.error, self.lang)
    }
}

fn render_error(error: &AppError, lang: Lang) -> HttpResponse {
    let code = error.error_code();
    let msg = error.render_message(lang);

    match code {
        ErrorCode::ServerError => log::error!("[Error] Code: {}, Message: {}, Cause: {}", code.code(), msg, error),
        _ => log::warn!("[Error] Code: {}, Message: {}", code.code(), msg),
    }

    HttpResponse::build(code.http_status()).json(ApiResponse::<()>::failure(code.code(), msg))
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 핸들러 반환 타입 별칭
pub type ApiResult<T> = Result<T, ApiError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;

    /// 클로저를 사용하여 지연 평가된 컨텍스트를 제공합니다.
    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(e: mongodb::error::Error) -> Self {
        AppError::DatabaseError(e.to_string())
    }
}

impl From<redis::RedisError> for AppError {
    fn from(e: redis::RedisError) -> Self {
        AppError::RedisError(e.to_string())
    }
}
