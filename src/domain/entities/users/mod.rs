pub mod user;
pub mod support_order;

pub use user::*;
pub use support_order::*;
