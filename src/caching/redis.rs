//! # Redis 캐시 클라이언트 구현
//!
//! [`CacheStore`]의 Redis 구현체입니다. 호출마다 멀티플렉싱된 연결을
//! 얻어 단일 TCP 연결에서 여러 동시 요청을 처리합니다.

use async_trait::async_trait;
use redis::{AsyncCommands, Client};
use log::info;
use crate::caching::store::CacheStore;
use crate::config::RedisConfig;
use crate::errors::{AppResult, ErrorContext};

/// Redis 캐시 클라이언트 래퍼
///
/// ## 사용 예제
///
/// ```rust,ignore
/// use crate::caching::redis::RedisClient;
/// use crate::caching::store::CacheStore;
///
/// let redis = RedisClient::new().await?;
/// redis.set_value("REGISTER_CODE:a@b.com", "123456", Some(300)).await?;
/// let code = redis.get_value("REGISTER_CODE:a@b.com").await?;
/// ```
#[derive(Clone)]
pub struct RedisClient {
    client: Client,
}

impl RedisClient {
    /// 새 Redis 클라이언트 인스턴스를 생성합니다.
    ///
    /// `REDIS_URL`을 사용하며, 생성 시 `PING`으로 서버 가용성을 확인합니다.
    pub async fn new() -> AppResult<Self> {
        Self::connect(&RedisConfig::url()).await
    }

    pub async fn connect(url: &str) -> AppResult<Self> {
        let client = Client::open(url).context("Redis URL 파싱 실패")?;

        let mut conn = client
            .get_multiplexed_async_connection()
            .await
            .context("Redis 연결 실패")?;
        redis::cmd("PING")
            .query_async::<()>(&mut conn)
            .await
            .context("Redis PING 실패")?;

        info!("✅ Redis 연결 성공");

        Ok(Self { client })
    }

    async fn connection(&self) -> AppResult<redis::aio::MultiplexedConnection> {
        Ok(self.client.get_multiplexed_async_connection().await?)
    }
}

#[async_trait]
impl CacheStore for RedisClient {
    async fn get_value(&self, key: &str) -> AppResult<Option<String>> {
        let mut conn = self.connection().await?;
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn set_value(&self, key: &str, value: &str, ttl_seconds: Option<u64>) -> AppResult<()> {
        let mut conn = self.connection().await?;
        match ttl_seconds {
            Some(seconds) => conn.set_ex::<_, _, ()>(key, value, seconds).await?,
            None => conn.set::<_, _, ()>(key, value).await?,
        }
        Ok(())
    }

    async fn set_if_absent(&self, key: &str, value: &str, ttl_seconds: u64) -> AppResult<bool> {
        let mut conn = self.connection().await?;
        let reply: Option<String> = redis::cmd("SET")
            .arg(key)
            .arg(value)
            .arg("NX")
            .arg("EX")
            .arg(ttl_seconds)
            .query_async(&mut conn)
            .await?;
        Ok(reply.is_some())
    }

    async fn del(&self, key: &str) -> AppResult<()> {
        let mut conn = self.connection().await?;
        conn.del::<_, ()>(key).await?;
        Ok(())
    }

    async fn keys(&self, pattern: &str) -> AppResult<Vec<String>> {
        let mut conn = self.connection().await?;
        let keys: Vec<String> = conn.keys(pattern).await?;
        Ok(keys)
    }

    async fn del_multiple(&self, keys: &[String]) -> AppResult<()> {
        if keys.is_empty() {
            return Ok(());
        }
        let mut conn = self.connection().await?;
        conn.del::<_, ()>(keys.to_vec()).await?;
        Ok(())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        let mut conn = self.connection().await?;
        let exists: bool = conn.exists(key).await?;
        Ok(exists)
    }

    async fn set_add(&self, key: &str, member: &str) -> AppResult<bool> {
        let mut conn = self.connection().await?;
        let added: i64 = conn.sadd(key, member).await?;
        Ok(added > 0)
    }

    async fn set_remove(&self, key: &str, member: &str) -> AppResult<bool> {
        let mut conn = self.connection().await?;
        let removed: i64 = conn.srem(key, member).await?;
        Ok(removed > 0)
    }

    async fn set_contains(&self, key: &str, member: &str) -> AppResult<bool> {
        let mut conn = self.connection().await?;
        let contains: bool = conn.sismember(key, member).await?;
        Ok(contains)
    }

    async fn set_members(&self, key: &str) -> AppResult<Vec<String>> {
        let mut conn = self.connection().await?;
        let members: Vec<String> = conn.smembers(key).await?;
        Ok(members)
    }

    async fn set_count(&self, key: &str) -> AppResult<u64> {
        let mut conn = self.connection().await?;
        let count: u64 = conn.scard(key).await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;

    #[actix_web::test]
    async fn test_connect_reports_failed_stage() {
        let err = RedisClient::connect("not a redis url").await.err().unwrap();

        match err {
            AppError::InternalError(msg) => assert!(msg.starts_with("Redis URL 파싱 실패: ")),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
