//! JWT 클레임 모델

use serde::{Deserialize, Serialize};

/// 서명된 토큰에 담기는 클레임
///
/// `is_admin`은 관리자 토큰이면 1, 사용자 플랫폼 토큰이면 0입니다.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenClaims {
    /// 사용자 ID (ObjectId 16진수 문자열)
    pub user_id: String,
    pub username: String,
    pub is_admin: i32,
    /// 발급 시각 (Unix timestamp)
    pub iat: i64,
    /// 만료 시각 (Unix timestamp)
    pub exp: i64,
}

impl TokenClaims {
    pub fn is_admin(&self) -> bool {
        self.is_admin == 1
    }

    /// 남은 유효 시간(초). 이미 만료되었으면 None
    pub fn remaining_seconds(&self, now: i64) -> Option<u64> {
        let remaining = self.exp - now;
        (remaining > 0).then_some(remaining as u64)
    }
}
