//! 프런트 회원 데이터 액세스
//!
//! - [`UserRepository`](user_repo::UserRepository) - 회원 계정
//! - [`SupportOrderRepository`](support_order_repo::SupportOrderRepository) - 인앱 후원 주문

pub mod user_repo;
pub mod support_order_repo;

pub use user_repo::*;
pub use support_order_repo::*;
