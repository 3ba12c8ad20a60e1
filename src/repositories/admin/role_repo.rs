//! 역할 리포지토리 (`roles` 컬렉션)

use std::sync::Arc;
use chrono::Utc;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document, Regex},
    options::IndexOptions,
    IndexModel,
};
use crate::{
    db::Database,
    domain::dto::common::PageQuery,
    domain::entities::admin::Role,
    errors::AppResult,
    utils::string_utils::{clean_optional_string, escape_regex},
};
use singleton_macro::repository;

#[repository(name = "role", collection = "roles")]
pub struct RoleRepository {
    db: Arc<Database>,
}

/// 역할 목록 필터
///
/// - `keyword`: 역할명 부분 일치 (대소문자 무시)
/// - `status`: 0 이상일 때만 적용
pub fn role_list_filter(keyword: Option<&str>, status: Option<i32>) -> Document {
    let mut filter = Document::new();

    if let Some(keyword) = clean_optional_string(keyword) {
        filter.insert("role_name", Regex {
            pattern: escape_regex(&keyword),
            options: "i".to_string(),
        });
    }
    if let Some(status) = status.filter(|status| *status >= 0) {
        filter.insert("status", status);
    }

    filter
}

impl RoleRepository {
    pub async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Role>> {
        Ok(self.collection::<Role>().find_one(doc! { "_id": *id }).await?)
    }

    pub async fn find_by_code(&self, role_code: &str) -> AppResult<Option<Role>> {
        Ok(self.collection::<Role>().find_one(doc! { "role_code": role_code }).await?)
    }

    pub async fn find_by_ids(&self, ids: &[ObjectId]) -> AppResult<Vec<Role>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let cursor = self.collection::<Role>().find(doc! { "_id": { "$in": ids.to_vec() } }).await?;
        Ok(cursor.try_collect().await?)
    }

    /// 최신 생성 순 페이지 조회. (목록, 전체 건수)
    pub async fn list(&self, filter: Document, page: &PageQuery) -> AppResult<(Vec<Role>, u64)> {
        let total = self.collection::<Role>().count_documents(filter.clone()).await?;

        let cursor = self
            .collection::<Role>()
            .find(filter)
            .sort(doc! { "created_time": -1 })
            .skip(page.skip())
            .limit(page.page_size() as i64)
            .await?;

        Ok((cursor.try_collect().await?, total))
    }

    pub async fn create(&self, mut role: Role) -> AppResult<Role> {
        let result = self.collection::<Role>().insert_one(&role).await?;
        role.id = result.inserted_id.as_object_id();
        Ok(role)
    }

    /// 이름, 설명, 상태를 갱신하고 갱신된 역할을 반환합니다.
    pub async fn update(
        &self,
        id: &ObjectId,
        role_name: &str,
        description: &str,
        status: i32,
    ) -> AppResult<Option<Role>> {
        Ok(self
            .collection::<Role>()
            .find_one_and_update(
                doc! { "_id": *id },
                doc! { "$set": {
                    "role_name": role_name,
                    "description": description,
                    "status": status,
                    "updated_time": Utc::now().timestamp(),
                } },
            )
            .return_document(mongodb::options::ReturnDocument::After)
            .await?)
    }

    pub async fn delete(&self, id: &ObjectId) -> AppResult<bool> {
        let result = self.collection::<Role>().delete_one(doc! { "_id": *id }).await?;
        Ok(result.deleted_count > 0)
    }
}

impl RoleRepository {
    /// 시작 시점에 `roles` 인덱스를 생성합니다.
    pub async fn create_indexes(&self) -> AppResult<()> {
        let code_index = IndexModel::builder()
            .keys(doc! { "role_code": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("role_code_unique".to_string())
                .build())
            .build();

        let created_index = IndexModel::builder()
            .keys(doc! { "created_time": -1 })
            .build();

        self.collection::<Role>()
            .create_indexes([code_index, created_index])
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::Bson;

    #[test]
    fn test_role_filter_keyword_is_case_insensitive_contains() {
        let filter = role_list_filter(Some(" Ad.min "), None);
        let Some(Bson::RegularExpression(regex)) = filter.get("role_name") else {
            panic!("role_name should be a regex: {:?}", filter);
        };

        assert_eq!(regex.pattern, "Ad\\.min");
        assert_eq!(regex.options, "i");
        assert!(!filter.contains_key("status"));
    }

    #[test]
    fn test_role_filter_ignores_negative_status() {
        assert!(role_list_filter(None, Some(-1)).is_empty());
        assert_eq!(role_list_filter(None, Some(0)).get_i32("status").unwrap(), 0);
        assert!(role_list_filter(Some(""), None).is_empty());
    }
}
