//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! `#[service]` 매크로로 등록되어 싱글톤으로 관리됩니다. trait 뒤에 둔 의존성
//! (`dyn MemberStore`, `dyn SupportLedger` 등)은 `main`에서 바인딩합니다.
//!
//! - [`auth`] - 토큰, 비밀번호, 관리자 인증
//! - [`users`] - 회원가입, 로그인, 인증 코드
//! - [`rbac`] - 역할/권한 관리와 경로 매칭
//! - [`admin`] - 작업 로그, 시스템 설정
//! - [`security`] - IP 화이트리스트
//! - [`mail`] - SMTP 메일 발송
//! - [`upload`] - 파일 업로드
//! - [`support`] - iOS 인앱 후원 검증
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::{users::MemberService, auth::TokenService};
//!
//! let member_service = MemberService::instance();
//! let token_service = TokenService::instance();
//! ```

pub mod auth;
pub mod users;
pub mod rbac;
pub mod admin;
pub mod security;
pub mod mail;
pub mod upload;
pub mod support;
