//! 권한 리포지토리 (`permissions` 컬렉션)

use std::sync::Arc;
use chrono::Utc;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document, Regex},
    options::{IndexOptions, ReturnDocument},
    IndexModel,
};
use crate::{
    db::Database,
    domain::dto::common::PageQuery,
    domain::entities::admin::Permission,
    errors::AppResult,
    utils::string_utils::{clean_optional_string, escape_regex},
};
use singleton_macro::repository;

#[repository(name = "permission", collection = "permissions")]
pub struct PermissionRepository {
    db: Arc<Database>,
}

/// 권한 목록 필터
///
/// `keyword`는 중문/영문 권한명 중 하나에 부분 일치하면 됩니다.
pub fn permission_list_filter(module: Option<&str>, keyword: Option<&str>) -> Document {
    let mut filter = Document::new();

    if let Some(module) = clean_optional_string(module) {
        filter.insert("module", module);
    }
    if let Some(keyword) = clean_optional_string(keyword) {
        let pattern = escape_regex(&keyword);
        let matches = |field: &str| {
            let regex = Regex {
                pattern: pattern.clone(),
                options: "i".to_string(),
            };
            doc! { field: regex }
        };
        filter.insert("$or", vec![matches("permission_name"), matches("permission_name_en")]);
    }

    filter
}

impl PermissionRepository {
    pub async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Permission>> {
        Ok(self.collection::<Permission>().find_one(doc! { "_id": *id }).await?)
    }

    pub async fn find_by_code(&self, permission_code: &str) -> AppResult<Option<Permission>> {
        Ok(self
            .collection::<Permission>()
            .find_one(doc! { "permission_code": permission_code })
            .await?)
    }

    pub async fn find_by_ids(&self, ids: &[ObjectId]) -> AppResult<Vec<Permission>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let cursor = self.collection::<Permission>().find(doc! { "_id": { "$in": ids.to_vec() } }).await?;
        Ok(cursor.try_collect().await?)
    }

    /// 모듈 순, 같은 모듈 안에서는 생성 순으로 정렬된 페이지
    pub async fn list(&self, filter: Document, page: &PageQuery) -> AppResult<(Vec<Permission>, u64)> {
        let total = self.collection::<Permission>().count_documents(filter.clone()).await?;

        let cursor = self
            .collection::<Permission>()
            .find(filter)
            .sort(doc! { "module": 1, "_id": 1 })
            .skip(page.skip())
            .limit(page.page_size() as i64)
            .await?;

        Ok((cursor.try_collect().await?, total))
    }

    pub async fn create(&self, mut permission: Permission) -> AppResult<Permission> {
        let result = self.collection::<Permission>().insert_one(&permission).await?;
        permission.id = result.inserted_id.as_object_id();
        Ok(permission)
    }

    /// `_id`와 생성 시각을 제외한 모든 필드를 교체합니다.
    pub async fn update(&self, id: &ObjectId, permission: &Permission) -> AppResult<Option<Permission>> {
        Ok(self
            .collection::<Permission>()
            .find_one_and_update(
                doc! { "_id": *id },
                doc! { "$set": {
                    "permission_name": permission.permission_name.as_str(),
                    "permission_name_en": permission.permission_name_en.as_str(),
                    "permission_code": permission.permission_code.as_str(),
                    "api_route": permission.api_route.as_str(),
                    "http_method": permission.http_method.as_str(),
                    "module": permission.module.as_str(),
                    "description": permission.description.as_str(),
                    "description_en": permission.description_en.as_str(),
                    "updated_time": Utc::now().timestamp(),
                } },
            )
            .return_document(ReturnDocument::After)
            .await?)
    }

    pub async fn delete(&self, id: &ObjectId) -> AppResult<bool> {
        let result = self.collection::<Permission>().delete_one(doc! { "_id": *id }).await?;
        Ok(result.deleted_count > 0)
    }
}

impl PermissionRepository {
    /// 시작 시점에 `permissions` 인덱스를 생성합니다.
    pub async fn create_indexes(&self) -> AppResult<()> {
        let code_index = IndexModel::builder()
            .keys(doc! { "permission_code": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("permission_code_unique".to_string())
                .build())
            .build();

        let module_index = IndexModel::builder()
            .keys(doc! { "module": 1 })
            .build();

        self.collection::<Permission>()
            .create_indexes([code_index, module_index])
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::Bson;

    #[test]
    fn test_permission_filter_keyword_matches_both_names() {
        let filter = permission_list_filter(Some("system"), Some("role"));

        assert_eq!(filter.get_str("module").unwrap(), "system");
        let clauses = filter.get_array("$or").unwrap();
        assert_eq!(clauses.len(), 2);

        let first = clauses[0].as_document().unwrap();
        match first.get("permission_name") {
            Some(Bson::RegularExpression(regex)) => {
                assert_eq!(regex.pattern, "role");
                assert_eq!(regex.options, "i");
            }
            other => panic!("permission_name should be a regex: {:?}", other),
        }
    }

    #[test]
    fn test_permission_filter_empty_inputs() {
        assert!(permission_list_filter(Some(" "), None).is_empty());
    }
}
