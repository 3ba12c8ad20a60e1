pub mod auth;
pub mod rbac;
pub mod operation_log;
pub mod system_config;
pub mod ip_manage;

pub use auth::*;
pub use rbac::*;
pub use operation_log::*;
pub use system_config::*;
pub use ip_manage::*;
