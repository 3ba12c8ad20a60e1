//! JWT 토큰 블랙리스트 리포지토리 모듈
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::repositories::tokens::TokenBlacklistRepository;
//!
//! let blacklist = TokenBlacklistRepository::instance();
//! blacklist.add(&token, remaining_seconds).await?;
//! ```

pub mod token_repository;

pub use token_repository::*;
