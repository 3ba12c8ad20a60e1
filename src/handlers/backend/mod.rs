//! 사용자 플랫폼 핸들러 (`/api/backend/*`)

pub mod users;
pub mod support;
