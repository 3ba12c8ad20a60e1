pub mod admin_user;
pub mod role;
pub mod permission;
pub mod role_permission;
pub mod user_role;
pub mod operation_log;
pub mod system_config;

pub use admin_user::*;
pub use role::*;
pub use permission::*;
pub use role_permission::*;
pub use user_role::*;
pub use operation_log::*;
pub use system_config::*;
