//! 포털 백엔드
//!
//! 관리자 플랫폼과 사용자 플랫폼이 함께 쓰는 Actix-web 백엔드입니다.
//! 두 플랫폼은 같은 JWT 발급기와 블랙리스트를 공유하고, 관리자 요청은
//! IP 화이트리스트와 경로 단위 RBAC 검사를 추가로 거칩니다.
//!
//! # Features
//!
//! - **관리자 인증**: 로그인, 로그아웃, 비밀번호 변경, 작업 로그 기록
//! - **회원 인증**: 이메일 인증 코드 기반 회원가입과 비밀번호 재설정
//! - **RBAC**: 역할/권한 관리와 `:param` 패턴 경로 매칭
//! - **IP 화이트리스트**: Redis 집합 기반 관리자 접근 제어
//! - **업로드**: 확장자 화이트리스트와 내용 스니핑 검사
//! - **인앱 후원**: App Store 영수증 검증과 거래 단위 멱등 누적
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← scope별 미들웨어 배치
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 비즈니스 로직
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← 데이터 액세스
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB + Redis │ ← 저장소
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use portal_backend::services::auth::TokenService;
//! use portal_backend::services::users::MemberService;
//!
//! let members = MemberService::instance();
//! let tokens = TokenService::instance();
//!
//! let auth = members.login(request).await?;
//! let claims = tokens.verify(&auth.token)?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod errors;
pub mod middlewares;
