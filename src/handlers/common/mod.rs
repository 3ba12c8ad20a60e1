//! 양 플랫폼 공용 핸들러 (`/api/common/*`)

pub mod upload;
