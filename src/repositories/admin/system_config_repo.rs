//! 시스템 설정 리포지토리 (`system_configs` 컬렉션)

use std::sync::Arc;
use chrono::Utc;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    options::{IndexOptions, ReturnDocument},
    IndexModel,
};
use crate::{
    db::Database,
    domain::dto::common::PageQuery,
    domain::entities::admin::SystemConfig,
    errors::AppResult,
};
use singleton_macro::repository;

#[repository(name = "system_config", collection = "system_configs")]
pub struct SystemConfigRepository {
    db: Arc<Database>,
}

impl SystemConfigRepository {
    pub async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<SystemConfig>> {
        Ok(self.collection::<SystemConfig>().find_one(doc! { "_id": *id }).await?)
    }

    pub async fn find_by_key(&self, config_key: &str) -> AppResult<Option<SystemConfig>> {
        Ok(self
            .collection::<SystemConfig>()
            .find_one(doc! { "config_key": config_key })
            .await?)
    }

    pub async fn find_all(&self) -> AppResult<Vec<SystemConfig>> {
        let cursor = self.collection::<SystemConfig>().find(Document::new()).await?;
        Ok(cursor.try_collect().await?)
    }

    /// 최신 등록 순 페이지 조회
    pub async fn list(&self, page: &PageQuery) -> AppResult<(Vec<SystemConfig>, u64)> {
        let total = self.collection::<SystemConfig>().count_documents(Document::new()).await?;

        let cursor = self
            .collection::<SystemConfig>()
            .find(Document::new())
            .sort(doc! { "_id": -1 })
            .skip(page.skip())
            .limit(page.page_size() as i64)
            .await?;

        Ok((cursor.try_collect().await?, total))
    }

    pub async fn create(&self, mut config: SystemConfig) -> AppResult<SystemConfig> {
        let result = self.collection::<SystemConfig>().insert_one(&config).await?;
        config.id = result.inserted_id.as_object_id();
        Ok(config)
    }

    pub async fn update(
        &self,
        id: &ObjectId,
        config_value: &str,
        config_desc: &str,
    ) -> AppResult<Option<SystemConfig>> {
        Ok(self
            .collection::<SystemConfig>()
            .find_one_and_update(
                doc! { "_id": *id },
                doc! { "$set": {
                    "config_value": config_value,
                    "config_desc": config_desc,
                    "updated_time": Utc::now().timestamp(),
                } },
            )
            .return_document(ReturnDocument::After)
            .await?)
    }

    pub async fn delete(&self, id: &ObjectId) -> AppResult<bool> {
        let result = self.collection::<SystemConfig>().delete_one(doc! { "_id": *id }).await?;
        Ok(result.deleted_count > 0)
    }
}

impl SystemConfigRepository {
    /// 시작 시점에 `system_configs` 인덱스를 생성합니다.
    pub async fn create_indexes(&self) -> AppResult<()> {
        let key_index = IndexModel::builder()
            .keys(doc! { "config_key": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("config_key_unique".to_string())
                .build())
            .build();

        self.collection::<SystemConfig>().create_index(key_index).await?;
        Ok(())
    }
}
