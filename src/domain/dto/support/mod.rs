//! 인앱 후원 DTO

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VerifyIosSupportRequest {
    pub product_id: String,
    pub transaction_id: String,
    /// App Store base64 영수증
    pub receipt_data: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct VerifyIosSupportResponse {
    pub support_total_amount: f64,
    pub support_level: i32,
    pub amount: f64,
    pub transaction_id: String,
}
