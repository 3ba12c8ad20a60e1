//! 사용자 플랫폼 회원 서비스
//!
//! - [`verification_code_service`] - 이메일 인증 코드 발송/검증
//! - [`member_service`] - 회원가입, 로그인, 비밀번호 찾기, 내 정보

pub mod verification_code_service;
pub mod member_service;

pub use verification_code_service::*;
pub use member_service::*;
