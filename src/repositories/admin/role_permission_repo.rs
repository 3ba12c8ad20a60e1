//! 역할-권한 연결 리포지토리 (`role_permissions` 컬렉션)

use std::sync::Arc;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::IndexOptions,
    IndexModel,
};
use crate::{
    db::Database,
    domain::entities::admin::RolePermission,
    errors::AppResult,
};
use singleton_macro::repository;

#[repository(name = "role_permission", collection = "role_permissions")]
pub struct RolePermissionRepository {
    db: Arc<Database>,
}

impl RolePermissionRepository {
    pub async fn find_permission_ids(&self, role_id: &ObjectId) -> AppResult<Vec<ObjectId>> {
        self.find_permission_ids_for_roles(std::slice::from_ref(role_id)).await
    }

    /// 여러 역할에 연결된 권한 ID (중복은 호출자가 제거)
    pub async fn find_permission_ids_for_roles(&self, role_ids: &[ObjectId]) -> AppResult<Vec<ObjectId>> {
        if role_ids.is_empty() {
            return Ok(Vec::new());
        }

        let links: Vec<RolePermission> = self
            .collection::<RolePermission>()
            .find(doc! { "role_id": { "$in": role_ids.to_vec() } })
            .await?
            .try_collect()
            .await?;

        Ok(links.into_iter().map(|link| link.permission_id).collect())
    }

    /// 역할의 권한 집합을 통째로 교체합니다.
    pub async fn replace_for_role(&self, role_id: &ObjectId, permission_ids: &[ObjectId]) -> AppResult<()> {
        self.delete_by_role(role_id).await?;

        if permission_ids.is_empty() {
            return Ok(());
        }

        let links: Vec<RolePermission> = permission_ids
            .iter()
            .map(|permission_id| RolePermission::new(*role_id, *permission_id))
            .collect();
        self.collection::<RolePermission>().insert_many(links).await?;
        Ok(())
    }

    pub async fn remove(&self, role_id: &ObjectId, permission_id: &ObjectId) -> AppResult<bool> {
        let result = self
            .collection::<RolePermission>()
            .delete_one(doc! { "role_id": *role_id, "permission_id": *permission_id })
            .await?;
        Ok(result.deleted_count > 0)
    }

    pub async fn delete_by_role(&self, role_id: &ObjectId) -> AppResult<u64> {
        let result = self.collection::<RolePermission>().delete_many(doc! { "role_id": *role_id }).await?;
        Ok(result.deleted_count)
    }

    pub async fn delete_by_permission(&self, permission_id: &ObjectId) -> AppResult<u64> {
        let result = self
            .collection::<RolePermission>()
            .delete_many(doc! { "permission_id": *permission_id })
            .await?;
        Ok(result.deleted_count)
    }
}

impl RolePermissionRepository {
    /// 시작 시점에 `role_permissions` 인덱스를 생성합니다.
    pub async fn create_indexes(&self) -> AppResult<()> {
        let pair_index = IndexModel::builder()
            .keys(doc! { "role_id": 1, "permission_id": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("role_permission_unique".to_string())
                .build())
            .build();

        self.collection::<RolePermission>().create_index(pair_index).await?;
        Ok(())
    }
}
