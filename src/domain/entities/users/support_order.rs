//! 인앱 후원 주문 엔티티
//!
//! `transaction_id` 단위로 한 번만 기록되어 후원 누적의 멱등성을 보장합니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupportOrder {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: ObjectId,
    /// 결제 플랫폼 ("ios")
    pub platform: String,
    pub product_id: String,
    /// 스토어 거래 ID (unique)
    pub transaction_id: String,
    pub amount: f64,
    /// 검증에 사용한 원본 영수증
    pub receipt_data: String,
    pub created_at: DateTime,
}

impl SupportOrder {
    pub fn new(
        user_id: ObjectId,
        platform: &str,
        product_id: &str,
        transaction_id: &str,
        amount: f64,
        receipt_data: &str,
    ) -> Self {
        Self {
            id: None,
            user_id,
            platform: platform.to_string(),
            product_id: product_id.to_string(),
            transaction_id: transaction_id.to_string(),
            amount,
            receipt_data: receipt_data.to_string(),
            created_at: DateTime::now(),
        }
    }
}
