//! API 경로 패턴 매칭
//!
//! 권한의 `api_route`는 `:param` 형태의 경로 변수를 포함할 수 있습니다.
//!
//! ```text
//! /api/admin/roles/:id   ~  /api/admin/roles/65f0c1   → 일치
//! /api/admin/roles/:id   ~  /api/admin/roles          → 불일치 (세그먼트 수)
//! ```

use std::collections::HashSet;
use mongodb::bson::oid::ObjectId;
use crate::domain::entities::admin::Permission;

/// 경로가 패턴과 일치하는지 확인합니다.
///
/// 양쪽 끝의 `/` 하나는 무시하고, 빈 세그먼트는 건너뜁니다.
/// `:`로 시작하는 패턴 세그먼트는 어떤 값과도 일치합니다.
pub fn match_route(pattern: &str, path: &str) -> bool {
    let pattern = pattern.strip_suffix('/').unwrap_or(pattern);
    let path = path.strip_suffix('/').unwrap_or(path);

    if pattern == path {
        return true;
    }

    let pattern_parts: Vec<&str> = pattern.split('/').filter(|part| !part.is_empty()).collect();
    let path_parts: Vec<&str> = path.split('/').filter(|part| !part.is_empty()).collect();

    if pattern_parts.len() != path_parts.len() {
        return false;
    }

    pattern_parts
        .iter()
        .zip(path_parts.iter())
        .all(|(expected, actual)| expected.starts_with(':') || expected == actual)
}

/// 권한 목록 중 경로와 메서드가 모두 맞는 것이 있는지 확인합니다.
pub fn permission_allows(permissions: &[Permission], route: &str, method: &str) -> bool {
    permissions
        .iter()
        .any(|permission| permission.http_method == method && match_route(&permission.api_route, route))
}

/// 등장 순서를 유지하며 중복 ID를 제거합니다.
pub fn dedupe_ids(ids: Vec<ObjectId>) -> Vec<ObjectId> {
    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn permission(route: &str, method: &str) -> Permission {
        Permission::new(
            "p".into(),
            String::new(),
            format!("{}:{}", method, route),
            route.into(),
            method.into(),
            "rbac".into(),
            String::new(),
            String::new(),
        )
    }

    #[test]
    fn test_exact_and_trailing_slash() {
        assert!(match_route("/api/admin/roles", "/api/admin/roles"));
        assert!(match_route("/api/admin/roles/", "/api/admin/roles"));
        assert!(match_route("/api/admin/roles", "/api/admin/roles/"));
    }

    #[test]
    fn test_path_parameters() {
        assert!(match_route("/api/admin/roles/:id", "/api/admin/roles/42"));
        assert!(match_route("/api/admin/roles/:id/permissions/:pid", "/api/admin/roles/1/permissions/2"));
        assert!(!match_route("/api/admin/roles/:id", "/api/admin/roles"));
        assert!(!match_route("/api/admin/roles/:id", "/api/admin/users/42"));
    }

    #[test]
    fn test_empty_segments_are_ignored() {
        assert!(match_route("/api//admin/roles", "/api/admin/roles"));
        assert!(!match_route("/api/admin", "/api/admin/roles"));
    }

    #[test]
    fn test_permission_allows_requires_same_method() {
        let permissions = vec![
            permission("/api/admin/roles", "GET"),
            permission("/api/admin/roles/:id", "put"),
        ];

        assert!(permission_allows(&permissions, "/api/admin/roles", "GET"));
        assert!(permission_allows(&permissions, "/api/admin/roles/7", "PUT"));
        assert!(!permission_allows(&permissions, "/api/admin/roles", "POST"));
        assert!(!permission_allows(&[], "/api/admin/roles", "GET"));
    }

    #[test]
    fn test_dedupe_ids_keeps_order() {
        let a = ObjectId::new();
        let b = ObjectId::new();

        assert_eq!(dedupe_ids(vec![a, b, a, b, a]), vec![a, b]);
    }
}
