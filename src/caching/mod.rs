//! 캐싱 계층 모듈
//!
//! - [`store`] - `CacheStore` trait, JSON 헬퍼, 메모리 구현
//! - [`redis`] - Redis 구현체
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::caching::store::CacheStore;
//!
//! let cache: Arc<dyn CacheStore> = ServiceLocator::get::<RedisClient>();
//! cache.set_value("token_blacklist:abc", "1", Some(3600)).await?;
//! ```
//!
//! # 환경 설정
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! ```

pub mod redis;
pub mod store;
