//! # 문자열 유틸리티
//!
//! 요청 값 정리와 ObjectId 파싱 등 핸들러/서비스가 공유하는 함수들입니다.

use mongodb::bson::oid::ObjectId;
use crate::errors::{AppError, AppResult, ErrorCode};

/// 빈 문자열은 None으로 바꿉니다. (쿼리 필터용)
pub fn clean_optional_string(value: Option<&str>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// 16진수 문자열을 ObjectId로 변환합니다. 실패 시 `INVALID_ID`
pub fn parse_object_id(id: &str) -> AppResult<ObjectId> {
    ObjectId::parse_str(id.trim()).map_err(|_| AppError::business(ErrorCode::InvalidId))
}

/// MongoDB `$regex`에 넣을 사용자 입력의 메타 문자를 이스케이프합니다.
pub fn escape_regex(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        if "\\^$.|?*+()[]{}".contains(ch) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_optional_string() {
        assert_eq!(clean_optional_string(Some("  admin ")), Some("admin".to_string()));
        assert_eq!(clean_optional_string(Some("   ")), None);
        assert_eq!(clean_optional_string(None), None);
    }

    #[test]
    fn test_parse_object_id() {
        let id = ObjectId::new();
        assert_eq!(parse_object_id(&id.to_hex()).unwrap(), id);

        let err = parse_object_id("not-an-id").unwrap_err();
        assert_eq!(err.error_code(), ErrorCode::InvalidId);
    }

    #[test]
    fn test_escape_regex() {
        assert_eq!(escape_regex("a.b*c"), "a\\.b\\*c");
        assert_eq!(escape_regex("管理员"), "管理员");
    }
}
