//! # 관리자 계정 리포지토리
//!
//! `admin_users` 컬렉션을 다룹니다. 관리자 가드가 매 요청마다 ID로 계정을
//! 조회하므로 ID 조회 결과를 캐시에 10분간 보관합니다.
//!
//! ## 캐싱 전략
//!
//! - **키 패턴**: `admin_user_repository:{id}` (`#[repository]`의 `cache_key`)
//! - **TTL**: 600초
//! - 비밀번호 해시와 OTP 시크릿은 캐시에 쓰지 않습니다. 비밀번호 검증은
//!   [`AdminUserRepository::find_password_hash`]로 DB에서 직접 읽습니다.
//! - 계정 변경(로그인 시각, 비밀번호) 시 해당 키를 무효화합니다.

use std::sync::Arc;
use chrono::Utc;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::IndexOptions,
    IndexModel,
};
use crate::{
    caching::store::{get_json, set_json, CacheStore},
    core::registry::Repository,
    db::Database,
    domain::entities::admin::AdminUser,
    errors::AppResult,
};
use singleton_macro::repository;

const CACHE_TTL_SECONDS: u64 = 600;

#[repository(name = "admin_user", collection = "admin_users")]
pub struct AdminUserRepository {
    db: Arc<Database>,
    cache: Arc<dyn CacheStore>,
}

impl AdminUserRepository {
    /// ID로 관리자 조회 (캐시 우선)
    ///
    /// 캐시 장애는 조회 실패로 취급하지 않고 DB로 넘어갑니다.
    /// 반환값의 `password_hash`, `verify_code`는 항상 비어 있습니다.
    pub async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<AdminUser>> {
        let cache_key = self.cache_key(&id.to_hex());

        match get_json::<AdminUser>(self.cache.as_ref(), &cache_key).await {
            Ok(Some(cached)) => return Ok(Some(cached)),
            Ok(None) => {}
            Err(e) => log::warn!("관리자 캐시 조회 실패 {}: {}", cache_key, e),
        }

        let admin = self
            .collection::<AdminUser>()
            .find_one(doc! { "_id": *id })
            .await?
            .map(AdminUser::without_secrets);

        if let Some(ref admin) = admin {
            if let Err(e) = set_json(self.cache.as_ref(), &cache_key, admin, CACHE_TTL_SECONDS).await {
                log::warn!("관리자 캐시 저장 실패 {}: {}", cache_key, e);
            }
        }

        Ok(admin)
    }

    /// 비밀번호 검증용 해시. 캐시를 거치지 않습니다.
    pub async fn find_password_hash(&self, id: &ObjectId) -> AppResult<Option<String>> {
        let admin = self.collection::<AdminUser>().find_one(doc! { "_id": *id }).await?;
        Ok(admin.map(|admin| admin.password_hash))
    }

    /// 로그인 가능한(status = 1) 관리자를 사용자명으로 조회합니다.
    pub async fn find_active_by_username(&self, username: &str) -> AppResult<Option<AdminUser>> {
        Ok(self
            .collection::<AdminUser>()
            .find_one(doc! { "username": username, "status": 1 })
            .await?)
    }

    pub async fn update_last_login(&self, id: &ObjectId) -> AppResult<()> {
        let now = Utc::now().timestamp();
        self.collection::<AdminUser>()
            .update_one(
                doc! { "_id": *id },
                doc! { "$set": { "last_login_time": now, "updated_time": now } },
            )
            .await?;
        self.evict(id).await;
        Ok(())
    }

    /// 비밀번호를 교체하고 `first_login`을 1로 표시합니다.
    pub async fn update_password(&self, id: &ObjectId, password_hash: &str) -> AppResult<bool> {
        let result = self
            .collection::<AdminUser>()
            .update_one(
                doc! { "_id": *id },
                doc! { "$set": {
                    "password_hash": password_hash,
                    "first_login": 1,
                    "updated_time": Utc::now().timestamp(),
                } },
            )
            .await?;
        self.evict(id).await;
        Ok(result.matched_count > 0)
    }

    async fn evict(&self, id: &ObjectId) {
        let id = id.to_hex();
        if let Err(e) = self.invalidate_cache(&id).await {
            log::warn!("관리자 캐시 무효화 실패 {}: {}", id, e);
        }
    }

    /// 시작 시점에 `admin_users` 인덱스를 생성합니다.
    pub async fn create_indexes(&self) -> AppResult<()> {
        let username_index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("username_unique".to_string())
                .build())
            .build();

        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("email_unique".to_string())
                .build())
            .build();

        self.collection::<AdminUser>()
            .create_indexes([username_index, email_index])
            .await?;
        Ok(())
    }
}
