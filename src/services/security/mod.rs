//! 접근 보안 서비스
//!
//! - [`IpWhitelistService`](ip_whitelist_service::IpWhitelistService) - 관리자 플랫폼 IP 화이트리스트

pub mod ip_whitelist_service;

pub use ip_whitelist_service::*;
