//! 인증 서비스 모듈
//!
//! - [`token_service`] - HS256 토큰 발급/검증과 블랙리스트
//! - [`password`] - bcrypt 해시와 비밀번호 규칙
//! - [`admin_auth_service`] - 관리자 로그인/로그아웃/비밀번호 변경
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::TokenService;
//!
//! let token_service = TokenService::instance();
//! let token = token_service.issue_user_token(&user)?;
//! let claims = token_service.verify(&token)?;
//! ```

pub mod token_service;
pub mod password;
pub mod admin_auth_service;

pub use token_service::*;
pub use admin_auth_service::*;
