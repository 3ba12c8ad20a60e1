//! 인앱 후원 서비스
//!
//! - [`apple_receipt_verifier`] - App Store 영수증 검증 (운영 → 샌드박스)
//! - [`support_ledger`] - 주문 기록과 후원 누적 (MongoDB 트랜잭션)
//! - [`support_service`] - 검증 요청 처리와 후원 누적

pub mod apple_receipt_verifier;
pub mod support_ledger;
pub mod support_service;

pub use apple_receipt_verifier::*;
pub use support_ledger::*;
pub use support_service::*;
