//! 후원 원장
//!
//! 주문 기록과 사용자 후원 누적을 한 단위로 반영합니다. 운영 구현
//! [`MongoSupportLedger`]는 MongoDB 트랜잭션을 사용하며, 시작 시점에
//! `ServiceLocator::set::<dyn SupportLedger>`로 바인딩됩니다.

use std::sync::Arc;
use async_trait::async_trait;
use mongodb::{bson::oid::ObjectId, ClientSession};
use singleton_macro::service;
use crate::{
    db::Database,
    domain::entities::users::{SupportOrder, User},
    errors::{AppError, AppResult},
    repositories::users::{SupportOrderRepository, UserRepository},
    services::support::support_service::accumulate_support,
};

#[async_trait]
pub trait SupportLedger: Send + Sync {
    async fn find_order(&self, transaction_id: &str) -> AppResult<Option<SupportOrder>>;

    async fn find_user(&self, user_id: &ObjectId) -> AppResult<Option<User>>;

    /// 주문을 기록하고 사용자 누적액을 갱신한 뒤 갱신된 사용자를 돌려줍니다.
    ///
    /// 둘 중 하나라도 실패하면 아무것도 반영되지 않아야 합니다.
    async fn record(&self, order: &SupportOrder) -> AppResult<User>;
}

#[service(name = "mongo_support_ledger")]
pub struct MongoSupportLedger {
    db: Arc<Database>,
    users: Arc<UserRepository>,
    orders: Arc<SupportOrderRepository>,
}

#[async_trait]
impl SupportLedger for MongoSupportLedger {
    async fn find_order(&self, transaction_id: &str) -> AppResult<Option<SupportOrder>> {
        self.orders.find_by_transaction_id(transaction_id).await
    }

    async fn find_user(&self, user_id: &ObjectId) -> AppResult<Option<User>> {
        self.users.find_by_id(user_id).await
    }

    async fn record(&self, order: &SupportOrder) -> AppResult<User> {
        let mut session = self.db.start_session().await?;
        session.start_transaction().await?;

        match self.apply(&mut session, order).await {
            Ok(user) => {
                session.commit_transaction().await?;
                Ok(user)
            }
            Err(e) => {
                if let Err(abort_error) = session.abort_transaction().await {
                    log::error!("[AddSupport] 트랜잭션 롤백 실패: {}", abort_error);
                }
                Err(e)
            }
        }
    }
}

impl MongoSupportLedger {
    async fn apply(&self, session: &mut ClientSession, order: &SupportOrder) -> AppResult<User> {
        let user_id = &order.user_id;
        let mut user = self
            .users
            .find_by_id_in_session(user_id, session)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user {}", user_id.to_hex())))?;

        self.orders.insert_in_session(order, session).await?;

        accumulate_support(&mut user, order.amount);

        self.users
            .update_support_in_session(user_id, user.support_total_amount, user.support_level, user.vip, session)
            .await?;

        Ok(user)
    }
}
