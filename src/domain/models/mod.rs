//! 요청 처리 중에 사용되는 비영속 모델
//!
//! - [`auth`] - 인증된 사용자와 관리자 컨텍스트 (요청 extension)
//! - [`token`] - JWT 클레임
//! - [`lang`] - 응답 언어
//! - [`request_meta`] - 클라이언트 IP 등 요청 부가 정보

pub mod auth;
pub mod token;
pub mod lang;
pub mod request_meta;
