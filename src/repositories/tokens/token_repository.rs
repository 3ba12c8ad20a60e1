//! 토큰 블랙리스트 저장소
//!
//! 로그아웃된 토큰을 `token_blacklist:<token>` 키로 보관합니다. 값은 `"1"`,
//! TTL은 토큰의 남은 수명이므로 만료 시점에 자동으로 정리됩니다.

use std::sync::Arc;
use singleton_macro::repository;
use crate::{
    caching::store::CacheStore,
    core::registry::Repository,
    errors::AppResult,
};

#[repository(name = "token_blacklist", collection = "token_blacklist")]
pub struct TokenBlacklistRepository {
    cache: Arc<dyn CacheStore>,
}

impl TokenBlacklistRepository {
    pub const KEY_PREFIX: &'static str = "token_blacklist";

    #[cfg(test)]
    pub(crate) fn with_cache(cache: Arc<dyn CacheStore>) -> Self {
        Self { cache }
    }

    fn key(token: &str) -> String {
        format!("{}:{}", Self::KEY_PREFIX, token)
    }

    pub async fn add(&self, token: &str, ttl_seconds: u64) -> AppResult<()> {
        self.cache.set_value(&Self::key(token), "1", Some(ttl_seconds)).await
    }

    pub async fn contains(&self, token: &str) -> AppResult<bool> {
        self.cache.exists(&Self::key(token)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caching::store::MemoryCacheStore;

    #[actix_web::test]
    async fn test_blacklist_key_layout() {
        let cache = Arc::new(MemoryCacheStore::new());
        let repo = TokenBlacklistRepository::with_cache(cache.clone());

        repo.add("abc.def.ghi", 60).await.unwrap();

        assert!(repo.contains("abc.def.ghi").await.unwrap());
        assert_eq!(
            cache.get_value("token_blacklist:abc.def.ghi").await.unwrap(),
            Some("1".to_string())
        );
        assert!(!repo.contains("other").await.unwrap());
    }
}
