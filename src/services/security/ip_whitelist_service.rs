//! IP 화이트리스트 서비스
//!
//! 허용 IP는 캐시 저장소의 집합(`ip_whitelist`)에 보관됩니다.
//! 기능이 꺼져 있으면(`IP_WHITELIST_ENABLED=false`) 모든 IP를 허용하고,
//! 켜져 있을 때 저장소 오류가 나면 거부합니다.

use std::sync::Arc;
use chrono::Local;
use singleton_macro::service;
use crate::{
    caching::store::CacheStore,
    config::IpWhitelistConfig,
    errors::AppResult,
};

#[service(name = "ip_whitelist")]
pub struct IpWhitelistService {
    cache: Arc<dyn CacheStore>,
    /// None이면 호출 시점의 `IP_WHITELIST_ENABLED`를 따릅니다.
    enabled: Option<bool>,
}

impl IpWhitelistService {
    #[cfg(test)]
    pub(crate) fn with_store(cache: Arc<dyn CacheStore>, enabled: bool) -> Self {
        Self { cache, enabled: Some(enabled) }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or_else(IpWhitelistConfig::enabled)
    }

    pub async fn is_allowed(&self, ip: &str) -> bool {
        if !self.is_enabled() {
            return true;
        }

        match self.cache.set_contains(IpWhitelistConfig::REDIS_KEY, ip).await {
            Ok(true) => true,
            Ok(false) => {
                log::warn!("[IP Whitelist] IP {} not in whitelist", ip);
                false
            }
            Err(e) => {
                log::error!("[IP Whitelist] Failed to check IP in whitelist: {}", e);
                false
            }
        }
    }

    /// 새로 추가되었으면 true
    pub async fn add(&self, ip: &str) -> AppResult<bool> {
        let added = self.cache.set_add(IpWhitelistConfig::REDIS_KEY, ip).await?;
        log::info!("[IP Whitelist] Successfully added IP {} to whitelist", ip);
        Ok(added)
    }

    /// 실제로 제거되었으면 true
    pub async fn remove(&self, ip: &str) -> AppResult<bool> {
        let removed = self.cache.set_remove(IpWhitelistConfig::REDIS_KEY, ip).await?;
        log::info!("[IP Whitelist] Successfully removed IP {} from whitelist", ip);
        Ok(removed)
    }

    /// 정렬된 허용 IP 목록
    pub async fn list(&self) -> AppResult<Vec<String>> {
        let mut ips = self.cache.set_members(IpWhitelistConfig::REDIS_KEY).await?;
        ips.sort();
        Ok(ips)
    }

    pub async fn count(&self) -> AppResult<u64> {
        self.cache.set_count(IpWhitelistConfig::REDIS_KEY).await
    }

    /// 관리 작업 감사 로그
    pub fn log_operation(action: &str, ip: &str, client_ip: &str, success: bool) {
        let status = if success { "SUCCESS" } else { "FAILED" };
        log::info!(
            "[IP Whitelist Operation] Action: {}, IP: {}, ClientIP: {}, Status: {}, Time: {}",
            action,
            ip,
            client_ip,
            status,
            Local::now().format("%Y-%m-%d %H:%M:%S")
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caching::store::MemoryCacheStore;

    #[actix_web::test]
    async fn test_disabled_whitelist_allows_everyone() {
        let service = IpWhitelistService::with_store(Arc::new(MemoryCacheStore::new()), false);

        assert!(service.is_allowed("203.0.113.1").await);
    }

    #[actix_web::test]
    async fn test_enabled_whitelist_checks_membership() {
        let service = IpWhitelistService::with_store(Arc::new(MemoryCacheStore::new()), true);

        assert!(!service.is_allowed("10.0.0.1").await);

        assert!(service.add("10.0.0.1").await.unwrap());
        assert!(!service.add("10.0.0.1").await.unwrap());
        assert!(service.is_allowed("10.0.0.1").await);
        assert_eq!(service.count().await.unwrap(), 1);

        service.add("10.0.0.0").await.unwrap();
        assert_eq!(service.list().await.unwrap(), vec!["10.0.0.0", "10.0.0.1"]);

        assert!(service.remove("10.0.0.1").await.unwrap());
        assert!(!service.remove("10.0.0.1").await.unwrap());
        assert!(!service.is_allowed("10.0.0.1").await);
    }
}
