//! 역할 기반 접근 제어
//!
//! - [`route_matcher`] - `:param` 경로 패턴 매칭과 권한 판정
//! - [`RbacService`](rbac_service::RbacService) - 역할/권한 관리와 관리자 권한 해석

pub mod route_matcher;
pub mod rbac_service;

pub use route_matcher::*;
pub use rbac_service::*;
