//! 요청/응답 DTO
//!
//! - [`common`] - 응답 봉투, 페이지네이션
//! - [`admin`] - 관리자 인증, RBAC, 작업 로그, 시스템 설정, IP 관리
//! - [`users`] - 사용자 플랫폼 회원 흐름
//! - [`support`] - 인앱 후원 검증
//! - [`upload`] - 파일 업로드

pub mod common;
pub mod admin;
pub mod users;
pub mod support;
pub mod upload;
