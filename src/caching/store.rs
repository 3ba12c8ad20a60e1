//! 키-값 캐시 추상화
//!
//! 인증 코드, 토큰 블랙리스트, IP 화이트리스트가 사용하는 연산만 모은
//! [`CacheStore`] trait과 프로세스 내부 구현 [`MemoryCacheStore`]를 제공합니다.
//! 운영 환경에서는 [`RedisClient`](super::redis::RedisClient)가 구현체입니다.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};
use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use crate::errors::{AppError, AppResult};

/// 캐시 저장소 인터페이스
///
/// 문자열 값과 문자열 집합(Set)만 다룹니다. 구조체 캐싱은
/// [`get_json`] / [`set_json`] 헬퍼를 사용합니다.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// 문자열 값 조회
    async fn get_value(&self, key: &str) -> AppResult<Option<String>>;

    /// 문자열 값 저장. `ttl_seconds`가 None이면 만료 없음
    async fn set_value(&self, key: &str, value: &str, ttl_seconds: Option<u64>) -> AppResult<()>;

    /// 키가 없을 때만 저장 (`SET NX EX`). 저장했으면 true
    async fn set_if_absent(&self, key: &str, value: &str, ttl_seconds: u64) -> AppResult<bool>;

    /// 키 삭제 (`DEL`)
    async fn del(&self, key: &str) -> AppResult<()>;

    /// 패턴과 일치하는 키 목록 (`KEYS`). `*` 와일드카드만 사용합니다.
    async fn keys(&self, pattern: &str) -> AppResult<Vec<String>>;

    async fn del_multiple(&self, keys: &[String]) -> AppResult<()> {
        for key in keys {
            self.del(key).await?;
        }
        Ok(())
    }

    async fn exists(&self, key: &str) -> AppResult<bool>;

    /// 집합에 멤버 추가. 새로 추가되었으면 true
    async fn set_add(&self, key: &str, member: &str) -> AppResult<bool>;

    /// 집합에서 멤버 제거. 실제로 제거되었으면 true
    async fn set_remove(&self, key: &str, member: &str) -> AppResult<bool>;

    async fn set_contains(&self, key: &str, member: &str) -> AppResult<bool>;

    async fn set_members(&self, key: &str) -> AppResult<Vec<String>>;

    async fn set_count(&self, key: &str) -> AppResult<u64>;
}

/// JSON으로 저장된 값을 역직렬화하여 조회합니다.
///
/// 역직렬화에 실패한 캐시 항목은 없는 것으로 취급합니다.
pub async fn get_json<T: DeserializeOwned>(store: &dyn CacheStore, key: &str) -> AppResult<Option<T>> {
    match store.get_value(key).await? {
        Some(json) => match serde_json::from_str(&json) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                log::warn!("캐시 역직렬화 실패 {}: {}", key, e);
                Ok(None)
            }
        },
        None => Ok(None),
    }
}

/// 값을 JSON으로 직렬화하여 저장합니다.
pub async fn set_json<T: Serialize>(store: &dyn CacheStore, key: &str, value: &T, ttl_seconds: u64) -> AppResult<()> {
    let json = serde_json::to_string(value)
        .map_err(|e| AppError::InternalError(format!("캐시 직렬화 실패: {}", e)))?;
    store.set_value(key, &json, Some(ttl_seconds)).await
}

/// `*`만 지원하는 Redis `KEYS` 패턴 비교
fn glob_match(pattern: &str, key: &str) -> bool {
    let parts: Vec<&str> = pattern.split('*').collect();
    if parts.len() == 1 {
        return pattern == key;
    }

    let (first, last) = (parts[0], parts[parts.len() - 1]);
    if !key.starts_with(first) || key.len() < first.len() + last.len() || !key.ends_with(last) {
        return false;
    }

    let mut rest = &key[first.len()..key.len() - last.len()];
    for part in &parts[1..parts.len() - 1] {
        match rest.find(part) {
            Some(pos) => rest = &rest[pos + part.len()..],
            None => return false,
        }
    }
    true
}

/// 프로세스 메모리 기반 캐시 저장소
///
/// 만료는 조회 시점에 검사합니다.
#[derive(Default)]
pub struct MemoryCacheStore {
    values: Mutex<HashMap<String, (String, Option<Instant>)>>,
    sets: Mutex<HashMap<String, HashSet<String>>>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn values(&self) -> AppResult<MutexGuard<'_, HashMap<String, (String, Option<Instant>)>>> {
        self.values
            .lock()
            .map_err(|_| AppError::InternalError("memory cache lock poisoned".to_string()))
    }

    fn sets(&self) -> AppResult<MutexGuard<'_, HashMap<String, HashSet<String>>>> {
        self.sets
            .lock()
            .map_err(|_| AppError::InternalError("memory cache lock poisoned".to_string()))
    }

    fn live_value(
        values: &mut HashMap<String, (String, Option<Instant>)>,
        key: &str,
    ) -> Option<String> {
        let expired = match values.get(key) {
            Some((_, Some(deadline))) => *deadline <= Instant::now(),
            Some((_, None)) => false,
            None => return None,
        };

        if expired {
            values.remove(key);
            return None;
        }
        values.get(key).map(|(value, _)| value.clone())
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn get_value(&self, key: &str) -> AppResult<Option<String>> {
        let mut values = self.values()?;
        Ok(Self::live_value(&mut values, key))
    }

    async fn set_value(&self, key: &str, value: &str, ttl_seconds: Option<u64>) -> AppResult<()> {
        let deadline = ttl_seconds.map(|ttl| Instant::now() + Duration::from_secs(ttl));
        self.values()?.insert(key.to_string(), (value.to_string(), deadline));
        Ok(())
    }

    async fn set_if_absent(&self, key: &str, value: &str, ttl_seconds: u64) -> AppResult<bool> {
        let mut values = self.values()?;
        if Self::live_value(&mut values, key).is_some() {
            return Ok(false);
        }

        let deadline = Instant::now() + Duration::from_secs(ttl_seconds);
        values.insert(key.to_string(), (value.to_string(), Some(deadline)));
        Ok(true)
    }

    async fn del(&self, key: &str) -> AppResult<()> {
        self.values()?.remove(key);
        self.sets()?.remove(key);
        Ok(())
    }

    async fn keys(&self, pattern: &str) -> AppResult<Vec<String>> {
        let mut keys: Vec<String> = {
            let mut values = self.values()?;
            let names: Vec<String> = values.keys().cloned().collect();
            names
                .into_iter()
                .filter(|key| Self::live_value(&mut values, key).is_some())
                .collect()
        };
        keys.extend(self.sets()?.keys().cloned());
        keys.retain(|key| glob_match(pattern, key));
        keys.sort();
        keys.dedup();
        Ok(keys)
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        let mut values = self.values()?;
        if Self::live_value(&mut values, key).is_some() {
            return Ok(true);
        }
        Ok(self.sets()?.get(key).is_some_and(|set| !set.is_empty()))
    }

    async fn set_add(&self, key: &str, member: &str) -> AppResult<bool> {
        Ok(self.sets()?.entry(key.to_string()).or_default().insert(member.to_string()))
    }

    async fn set_remove(&self, key: &str, member: &str) -> AppResult<bool> {
        Ok(self.sets()?.get_mut(key).is_some_and(|set| set.remove(member)))
    }

    async fn set_contains(&self, key: &str, member: &str) -> AppResult<bool> {
        Ok(self.sets()?.get(key).is_some_and(|set| set.contains(member)))
    }

    async fn set_members(&self, key: &str) -> AppResult<Vec<String>> {
        let mut members: Vec<String> = self
            .sets()?
            .get(key)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default();
        members.sort();
        Ok(members)
    }

    async fn set_count(&self, key: &str) -> AppResult<u64> {
        Ok(self.sets()?.get(key).map(|set| set.len() as u64).unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Sample {
        name: String,
    }

    #[actix_web::test]
    async fn test_value_roundtrip_and_delete() {
        let store = MemoryCacheStore::new();
        store.set_value("k", "v", Some(60)).await.unwrap();

        assert_eq!(store.get_value("k").await.unwrap(), Some("v".to_string()));
        assert!(store.exists("k").await.unwrap());

        store.del("k").await.unwrap();
        assert_eq!(store.get_value("k").await.unwrap(), None);
    }

    #[actix_web::test]
    async fn test_keys_pattern_and_bulk_delete() {
        let store = MemoryCacheStore::new();
        store.set_value("admin_user_repository:a", "1", None).await.unwrap();
        store.set_value("admin_user_repository:b", "2", None).await.unwrap();
        store.set_value("token_blacklist:x", "1", None).await.unwrap();

        let keys = store.keys("admin_user_repository:*").await.unwrap();
        assert_eq!(keys, vec!["admin_user_repository:a", "admin_user_repository:b"]);

        store.del_multiple(&keys).await.unwrap();
        assert!(store.keys("admin_user_repository:*").await.unwrap().is_empty());
        assert_eq!(store.keys("*").await.unwrap(), vec!["token_blacklist:x"]);
    }

    #[test]
    fn test_glob_match() {
        assert!(glob_match("a:*", "a:1"));
        assert!(glob_match("*:1", "a:1"));
        assert!(glob_match("a*c*e", "abcde"));
        assert!(!glob_match("a*c*e", "abde"));
        assert!(!glob_match("a:*", "b:1"));
        assert!(glob_match("exact", "exact"));
        assert!(!glob_match("ab*ba", "aba"));
    }

    #[actix_web::test]
    async fn test_zero_ttl_expires_immediately() {
        let store = MemoryCacheStore::new();
        store.set_value("k", "v", Some(0)).await.unwrap();

        assert_eq!(store.get_value("k").await.unwrap(), None);
    }

    #[actix_web::test]
    async fn test_set_if_absent_acts_as_lock() {
        let store = MemoryCacheStore::new();

        assert!(store.set_if_absent("lock", "1", 10).await.unwrap());
        assert!(!store.set_if_absent("lock", "1", 10).await.unwrap());
    }

    #[actix_web::test]
    async fn test_set_operations() {
        let store = MemoryCacheStore::new();

        assert!(store.set_add("s", "b").await.unwrap());
        assert!(store.set_add("s", "a").await.unwrap());
        assert!(!store.set_add("s", "a").await.unwrap());
        assert_eq!(store.set_count("s").await.unwrap(), 2);
        assert_eq!(store.set_members("s").await.unwrap(), vec!["a", "b"]);

        assert!(store.set_remove("s", "a").await.unwrap());
        assert!(!store.set_remove("s", "a").await.unwrap());
        assert!(!store.set_contains("s", "a").await.unwrap());
        assert!(store.set_contains("s", "b").await.unwrap());
    }

    #[actix_web::test]
    async fn test_json_helpers() {
        let store = MemoryCacheStore::new();
        let sample = Sample { name: "admin".to_string() };

        set_json(&store, "sample", &sample, 60).await.unwrap();
        let loaded: Option<Sample> = get_json(&store, "sample").await.unwrap();
        assert_eq!(loaded, Some(sample));

        store.set_value("broken", "{not json", None).await.unwrap();
        let broken: Option<Sample> = get_json(&store, "broken").await.unwrap();
        assert!(broken.is_none());
    }
}
