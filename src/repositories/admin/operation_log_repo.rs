//! 관리자 작업 로그 리포지토리 (`operation_logs` 컬렉션)

use std::sync::Arc;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    IndexModel,
};
use crate::{
    db::Database,
    domain::dto::admin::OperationLogQuery,
    domain::dto::common::PageQuery,
    domain::entities::admin::OperationLog,
    errors::AppResult,
    utils::string_utils::clean_optional_string,
};
use singleton_macro::repository;

#[repository(name = "operation_log", collection = "operation_logs")]
pub struct OperationLogRepository {
    db: Arc<Database>,
}

/// 작업 로그 조회 필터. 비어 있는 조건은 무시합니다.
pub fn operation_log_filter(query: &OperationLogQuery) -> Document {
    let mut filter = Document::new();

    let fields = [
        ("admin_user_id", query.admin_user_id.as_deref()),
        ("admin_username", query.admin_username.as_deref()),
        ("operation_type", query.operation_type.as_deref()),
        ("module", query.module.as_deref()),
    ];
    for (field, value) in fields {
        if let Some(value) = clean_optional_string(value) {
            filter.insert(field, value);
        }
    }

    filter
}

impl OperationLogRepository {
    pub async fn insert(&self, log: &OperationLog) -> AppResult<()> {
        self.collection::<OperationLog>().insert_one(log).await?;
        Ok(())
    }

    /// 최신 순 페이지 조회. (목록, 전체 건수)
    pub async fn list(&self, filter: Document, page: &PageQuery) -> AppResult<(Vec<OperationLog>, u64)> {
        let total = self.collection::<OperationLog>().count_documents(filter.clone()).await?;

        let cursor = self
            .collection::<OperationLog>()
            .find(filter)
            .sort(doc! { "created_time": -1 })
            .skip(page.skip())
            .limit(page.page_size() as i64)
            .await?;

        Ok((cursor.try_collect().await?, total))
    }
}

impl OperationLogRepository {
    /// 시작 시점에 `operation_logs` 인덱스를 생성합니다.
    pub async fn create_indexes(&self) -> AppResult<()> {
        let indexes = [
            IndexModel::builder().keys(doc! { "admin_user_id": 1, "created_time": -1 }).build(),
            IndexModel::builder().keys(doc! { "created_time": -1 }).build(),
        ];

        self.collection::<OperationLog>().create_indexes(indexes).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_log_filter_skips_empty_values() {
        let query = OperationLogQuery {
            admin_username: Some("root".to_string()),
            operation_type: Some("  ".to_string()),
            module: Some("auth".to_string()),
            ..Default::default()
        };

        let filter = operation_log_filter(&query);

        assert_eq!(filter.len(), 2);
        assert_eq!(filter.get_str("admin_username").unwrap(), "root");
        assert_eq!(filter.get_str("module").unwrap(), "auth");
    }
}
