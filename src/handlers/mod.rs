//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 정의하는 모듈입니다.
//! 핸들러는 요청을 추출자로 받아 서비스 계층에 위임하고, 결과를
//! `{code, msg, data}` 봉투로 감싸 응답합니다.
//!
//! ## 아키텍처 위치
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Middlewares - JWT / 관리자 가드 / 권한 검사
//! ├─────────────────────────────────────────────┤
//!   Handlers (이 모듈) - HTTP 엔드포인트 처리
//! ├─────────────────────────────────────────────┤
//!   Services - 비즈니스 로직
//! ├─────────────────────────────────────────────┤
//!   Repositories - 데이터 접근
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## 모듈 구성
//!
//! | 모듈 | 경로 | 설명 |
//! |------|------|------|
//! | [`admin`] | `/api/admin/*` | 관리자 인증, RBAC, 작업 로그, 시스템 설정 |
//! | [`backend`] | `/api/backend/*` | 회원 인증, 인앱 후원 |
//! | [`common`] | `/api/common/*` | 파일 업로드 |
//! | [`ip_manage`] | `/api/ip-manage` | IP 화이트리스트 관리 |
//!
//! ## 에러 처리
//!
//! 서비스가 돌려준 [`AppError`](crate::errors::AppError)는
//! `.localized(lang)`으로 요청 언어가 지정된 응답 에러가 됩니다.
//!
//! ```rust,ignore
//! #[post("/login")]
//! pub async fn login(lang: Lang, payload: web::Json<LoginRequest>) -> ApiResult<HttpResponse> {
//!     let response = MemberService::instance()
//!         .login(payload.into_inner())
//!         .await
//!         .map_err(|e| e.localized(lang))?;
//!
//!     Ok(ApiResponse::success(response))
//! }
//! ```

pub mod admin;
pub mod backend;
pub mod common;
pub mod ip_manage;
