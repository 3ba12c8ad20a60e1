//! 파일 업로드 서비스

pub mod upload_service;

pub use upload_service::*;
