//! 파일 업로드 DTO

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct UploadResponse {
    /// 공개 접근 경로, 예: `/static/upload/20250101120000123.png`
    pub url: String,
    /// 저장된 파일명
    pub filename: String,
    pub size: u64,
    /// 점을 포함한 소문자 확장자
    pub ext: String,
    /// 클라이언트가 보낸 원본 파일명 (경로 제거)
    pub original: String,
    /// 업로드 시각 (Unix timestamp)
    pub time: i64,
}
