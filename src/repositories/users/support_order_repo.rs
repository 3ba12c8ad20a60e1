//! 인앱 후원 주문 리포지토리 (`support_orders` 컬렉션)

use std::sync::Arc;
use mongodb::{
    bson::doc,
    options::IndexOptions,
    ClientSession, IndexModel,
};
use crate::{
    db::Database,
    domain::entities::users::SupportOrder,
    errors::AppResult,
};
use singleton_macro::repository;

#[repository(name = "support_order", collection = "support_orders")]
pub struct SupportOrderRepository {
    db: Arc<Database>,
}

impl SupportOrderRepository {
    pub async fn find_by_transaction_id(&self, transaction_id: &str) -> AppResult<Option<SupportOrder>> {
        Ok(self
            .collection::<SupportOrder>()
            .find_one(doc! { "transaction_id": transaction_id })
            .await?)
    }

    /// 트랜잭션 안에서 주문을 기록합니다.
    ///
    /// `transaction_id` unique 인덱스가 동시 요청의 중복 기록을 막습니다.
    pub async fn insert_in_session(&self, order: &SupportOrder, session: &mut ClientSession) -> AppResult<()> {
        self.collection::<SupportOrder>()
            .insert_one(order)
            .session(&mut *session)
            .await?;
        Ok(())
    }
}

impl SupportOrderRepository {
    /// 시작 시점에 `support_orders` 인덱스를 생성합니다.
    pub async fn create_indexes(&self) -> AppResult<()> {
        let transaction_index = IndexModel::builder()
            .keys(doc! { "transaction_id": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("transaction_id_unique".to_string())
                .build())
            .build();

        let user_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "created_at": -1 })
            .build();

        self.collection::<SupportOrder>()
            .create_indexes([transaction_index, user_index])
            .await?;
        Ok(())
    }
}
