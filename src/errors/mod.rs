//! 에러 처리 모듈
//!
//! - [`errors`] - `AppError`, `ApiError`, `ErrorContext`
//! - [`codes`] - 비즈니스 응답 코드와 다국어 메시지

#[allow(clippy::module_inception)]
pub mod errors;
pub mod codes;

pub use codes::ErrorCode;
pub use errors::*;
