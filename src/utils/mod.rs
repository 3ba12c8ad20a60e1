//! 공통 유틸리티 함수 모듈
//!
//! # Modules
//!
//! - [`string_utils`] - 문자열 검증, ObjectId 파싱, 정규식 이스케이프
//! - [`random`] - CSPRNG 숫자 코드 생성
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::utils::string_utils::parse_object_id;
//! use crate::utils::random::random_digits;
//!
//! let role_id = parse_object_id(&path.role_id)?;
//! let code = random_digits(6);
//! ```

pub mod string_utils;
pub mod random;
