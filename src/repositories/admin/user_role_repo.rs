//! 관리자-역할 연결 리포지토리 (`user_roles` 컬렉션)

use std::sync::Arc;
use chrono::Utc;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::IndexOptions,
    IndexModel,
};
use crate::{
    db::Database,
    domain::entities::admin::UserRole,
    errors::AppResult,
};
use singleton_macro::repository;

#[repository(name = "user_role", collection = "user_roles")]
pub struct UserRoleRepository {
    db: Arc<Database>,
}

impl UserRoleRepository {
    pub async fn find_role_ids(&self, user_id: &ObjectId) -> AppResult<Vec<ObjectId>> {
        let links: Vec<UserRole> = self
            .collection::<UserRole>()
            .find(doc! { "user_id": *user_id })
            .await?
            .try_collect()
            .await?;

        Ok(links.into_iter().map(|link| link.role_id).collect())
    }

    /// 연결이 이미 있으면 아무것도 하지 않습니다. 새로 연결했으면 true
    pub async fn assign(&self, user_id: &ObjectId, role_id: &ObjectId) -> AppResult<bool> {
        let result = self
            .collection::<UserRole>()
            .update_one(
                doc! { "user_id": *user_id, "role_id": *role_id },
                doc! { "$setOnInsert": { "created_time": Utc::now().timestamp() } },
            )
            .upsert(true)
            .await?;
        Ok(result.upserted_id.is_some())
    }

    pub async fn remove(&self, user_id: &ObjectId, role_id: &ObjectId) -> AppResult<bool> {
        let result = self
            .collection::<UserRole>()
            .delete_one(doc! { "user_id": *user_id, "role_id": *role_id })
            .await?;
        Ok(result.deleted_count > 0)
    }

    pub async fn remove_all(&self, user_id: &ObjectId) -> AppResult<u64> {
        let result = self.collection::<UserRole>().delete_many(doc! { "user_id": *user_id }).await?;
        Ok(result.deleted_count)
    }

    pub async fn delete_by_role(&self, role_id: &ObjectId) -> AppResult<u64> {
        let result = self.collection::<UserRole>().delete_many(doc! { "role_id": *role_id }).await?;
        Ok(result.deleted_count)
    }
}

impl UserRoleRepository {
    /// 시작 시점에 `user_roles` 인덱스를 생성합니다.
    pub async fn create_indexes(&self) -> AppResult<()> {
        let pair_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "role_id": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("user_role_unique".to_string())
                .build())
            .build();

        self.collection::<UserRole>().create_index(pair_index).await?;
        Ok(())
    }
}
