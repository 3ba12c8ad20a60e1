//! 인증 관련 설정 관리 모듈
//!
//! JWT 서명/만료, IP 화이트리스트, 그리고 로그인/권한 검사를 건너뛰는
//! 경로 목록을 관리합니다.
//!
//! ## 환경 변수
//!
//! ```bash
//! export JWT_SECRET="your-super-secret-key"
//! export JWT_EXPIRATION_HOURS="8760"
//! export IP_WHITELIST_ENABLED="true"
//! export IP_WHITELIST_MANAGE_KEY="manage-key"
//! ```

use std::env;

/// 로그인 없이 접근 가능한 관리자 플랫폼 경로
pub const NON_LOGIN_PATHS_ADMIN: &[&str] = &[
    "/api/admin/user/login",
    "/api/ip-manage",
];

/// 로그인 없이 접근 가능한 사용자 플랫폼 경로
pub const NON_LOGIN_PATHS_BACKEND: &[&str] = &[
    "/api/backend/user/send-code",
    "/api/backend/user/register",
    "/api/backend/user/login",
    "/api/common/upload",
];

/// 권한 검사를 하지 않는 경로
pub const NO_PERMISSION_CHECK_PATHS: &[&str] = &[
    "/api/backend/user/send-code",
    "/api/backend/user/register",
    "/api/backend/user/login",
    "/api/backend/user/forgot-password",
    "/api/backend/user/change-password",
    "/api/common/upload",
];

/// 경로 접근 정책
///
/// 경로 비교는 정확히 일치하는 경우만 인정합니다.
pub struct AccessPaths;

impl AccessPaths {
    /// 관리자 플랫폼의 비로그인 경로인지 확인합니다.
    pub fn is_admin_public(path: &str) -> bool {
        NON_LOGIN_PATHS_ADMIN.contains(&path)
    }

    /// JWT 검증을 건너뛸 경로인지 확인합니다.
    pub fn is_public(path: &str) -> bool {
        Self::is_admin_public(path) || NON_LOGIN_PATHS_BACKEND.contains(&path)
    }

    /// 권한 검사를 건너뛸 경로인지 확인합니다.
    pub fn skips_permission_check(path: &str) -> bool {
        NO_PERMISSION_CHECK_PATHS.contains(&path)
    }
}

/// JWT 토큰 설정
pub struct JwtConfig;

impl JwtConfig {
    /// JWT 서명에 사용할 비밀키를 반환합니다.
    ///
    /// # 키 생성 예제
    ///
    /// ```bash
    /// openssl rand -base64 32
    /// ```
    pub fn secret() -> String {
        env::var("JWT_SECRET")
            .unwrap_or_else(|_| {
                log::warn!("JWT_SECRET not set, using default (not secure for production!)");
                "your-secret-key".to_string()
            })
    }

    /// 토큰 만료 시간(시간 단위)
    ///
    /// `JWT_EXPIRATION_HOURS`, 없으면 `JWT_SECRET_EXPIRE_TIME`을 읽습니다.
    /// 기본값: 8760시간 (1년)
    pub fn expiration_hours() -> i64 {
        env::var("JWT_EXPIRATION_HOURS")
            .or_else(|_| env::var("JWT_SECRET_EXPIRE_TIME"))
            .ok()
            .and_then(|value| value.parse::<i64>().ok())
            .filter(|hours| *hours > 0)
            .unwrap_or(8760)
    }
}

/// IP 화이트리스트 설정
pub struct IpWhitelistConfig;

impl IpWhitelistConfig {
    /// Redis Set 키
    pub const REDIS_KEY: &'static str = "ip_whitelist";

    /// 화이트리스트 검사 활성화 여부. 기본값: false
    pub fn enabled() -> bool {
        env::var("IP_WHITELIST_ENABLED")
            .map(|value| matches!(value.to_lowercase().as_str(), "true" | "1" | "yes"))
            .unwrap_or(false)
    }

    /// 관리 API 호출에 필요한 키
    ///
    /// 설정되지 않았거나 비어 있으면 관리 API가 비활성화됩니다.
    pub fn manage_key() -> Option<String> {
        env::var("IP_WHITELIST_MANAGE_KEY")
            .ok()
            .filter(|key| !key.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_paths() {
        assert!(AccessPaths::is_public("/api/admin/user/login"));
        assert!(AccessPaths::is_public("/api/backend/user/register"));
        assert!(AccessPaths::is_public("/api/common/upload"));
        assert!(!AccessPaths::is_public("/api/backend/user/userinfo"));
        assert!(!AccessPaths::is_public("/api/admin/user/login/"));
    }

    #[test]
    fn test_admin_public_paths() {
        assert!(AccessPaths::is_admin_public("/api/ip-manage"));
        assert!(!AccessPaths::is_admin_public("/api/backend/user/login"));
    }

    #[test]
    fn test_permission_check_skips() {
        assert!(AccessPaths::skips_permission_check("/api/backend/user/forgot-password"));
        assert!(!AccessPaths::skips_permission_check("/api/admin/roles"));
    }

    #[test]
    fn test_jwt_expiration_default() {
        if env::var("JWT_EXPIRATION_HOURS").is_err() && env::var("JWT_SECRET_EXPIRE_TIME").is_err() {
            assert_eq!(JwtConfig::expiration_hours(), 8760);
        }
    }
}
