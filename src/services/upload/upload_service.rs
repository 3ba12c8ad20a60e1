//! 파일 업로드 서비스
//!
//! 업로드된 파일은 다음 순서로 검사한 뒤 저장됩니다.
//!
//! 1. 크기 (최대 20 MiB)
//! 2. 확장자 화이트리스트
//! 3. 앞 512바이트의 실제 내용으로 판별한 MIME 타입
//!
//! 저장 파일명은 `YYYYMMDDHHmmss` + 임의 숫자 3자리 + 확장자입니다.

use std::path::{Path, PathBuf};
use actix_web::web;
use chrono::{Local, Utc};
use crate::{
    config::UploadConfig,
    domain::dto::upload::UploadResponse,
    errors::{AppError, AppResult, ErrorCode},
    utils::random::random_digits,
};
use singleton_macro::service;

/// 내용 판별에 사용하는 앞부분 길이
const SNIFF_LENGTH: usize = 512;
const ZIP_MIME: &str = "application/zip";
const PPTX_MIME: &str = "application/vnd.openxmlformats-officedocument.presentationml.presentation";

fn params_error(detail: &str) -> AppError {
    AppError::business_with(ErrorCode::ParamsError, detail)
}

/// 경로 구분자를 제거한 파일명
pub fn base_filename(original: &str) -> &str {
    original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(original)
}

/// 점을 포함한 소문자 확장자. 확장자가 없으면 빈 문자열
pub fn lowercase_extension(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default()
}

/// 파일 내용으로 MIME 타입을 판별하고 허용 여부를 확인합니다.
///
/// Office Open XML 문서는 ZIP 컨테이너이므로 `.ppt`/`.pptx`일 때만 ZIP을 허용합니다.
pub fn sniff_content_type(head: &[u8], ext: &str) -> AppResult<&'static str> {
    let head = &head[..head.len().min(SNIFF_LENGTH)];
    let detected = infer::get(head)
        .map(|kind| kind.mime_type())
        .unwrap_or("application/octet-stream");

    let content_type = if detected == ZIP_MIME {
        if ext != ".ppt" && ext != ".pptx" {
            log::error!("[Upload] 허용되지 않는 ZIP 파일: {}", ext);
            return Err(params_error("不支持 ZIP 压缩文件"));
        }
        log::info!("[Upload] ZIP 형식의 Office 파일: {}", ext);
        PPTX_MIME
    } else {
        detected
    };

    if !UploadConfig::ALLOWED_MIME_TYPES.contains(&content_type) {
        log::error!("[Upload] 내용 타입 불일치: {}", content_type);
        return Err(params_error("文件内容类型不匹配，可能是伪装文件"));
    }

    Ok(content_type)
}

/// 저장 파일명 생성
pub fn generate_filename(ext: &str) -> String {
    format!("{}{}{}", Local::now().format("%Y%m%d%H%M%S"), random_digits(3), ext)
}

#[service(name = "upload")]
pub struct UploadService {
    /// None이면 저장 시점의 `UPLOAD_DIR`
    upload_dir: Option<PathBuf>,
}

impl UploadService {
    #[cfg(test)]
    pub(crate) fn with_dir(upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dir: Some(upload_dir.into()),
        }
    }

    fn upload_dir(&self) -> PathBuf {
        self.upload_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(UploadConfig::upload_dir()))
    }

    /// 검사를 통과한 파일을 업로드 디렉터리에 저장합니다.
    pub async fn save(&self, original_name: &str, data: Vec<u8>) -> AppResult<UploadResponse> {
        if data.is_empty() {
            return Err(params_error("请上传文件"));
        }
        if data.len() > UploadConfig::MAX_FILE_SIZE {
            log::error!("[Upload] 파일 크기 초과: {} bytes", data.len());
            return Err(params_error("文件大小超过限制（最大20MB）"));
        }

        let original = base_filename(original_name).to_string();
        let ext = lowercase_extension(&original);
        if !UploadConfig::ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
            log::error!("[Upload] 지원하지 않는 확장자: {}", ext);
            return Err(params_error(
                "不支持的文件类型，仅支持: jpg, jpeg, png, gif, heic, heif, webp, pdf, ppt, pptx",
            ));
        }

        let content_type = sniff_content_type(&data, &ext)?;

        let filename = generate_filename(&ext);
        let dir = self.upload_dir();
        let path = dir.join(&filename);
        let size = data.len() as u64;

        web::block(move || {
            std::fs::create_dir_all(&dir)?;
            std::fs::write(&path, &data)
        })
        .await
        .map_err(|e| AppError::InternalError(format!("업로드 작업 실행 실패: {}", e)))?
        .map_err(|e| AppError::InternalError(format!("파일 저장 실패: {}", e)))?;

        log::info!(
            "[Upload] 업로드 완료: {}, 원본: {}, 크기: {} bytes, MIME: {}",
            filename,
            original,
            size,
            content_type
        );

        Ok(UploadResponse {
            url: format!("{}/{}", UploadConfig::public_prefix(), filename),
            filename,
            size,
            ext,
            original,
            time: Utc::now().timestamp(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0x0D, 0x49, 0x48, 0x44, 0x52];

    fn zip_bytes() -> Vec<u8> {
        let mut data = vec![0x50, 0x4B, 0x03, 0x04];
        data.extend(std::iter::repeat(0u8).take(60));
        data
    }

    fn detail(err: AppError) -> String {
        err.client_detail().unwrap_or_default().to_string()
    }

    #[test]
    fn test_base_filename_strips_directories() {
        assert_eq!(base_filename("../../etc/passwd.png"), "passwd.png");
        assert_eq!(base_filename("C:\\Users\\me\\photo.jpg"), "photo.jpg");
        assert_eq!(base_filename("plain.pdf"), "plain.pdf");
    }

    #[test]
    fn test_lowercase_extension() {
        assert_eq!(lowercase_extension("Slides.PPTX"), ".pptx");
        assert_eq!(lowercase_extension("noext"), "");
    }

    #[test]
    fn test_sniff_accepts_matching_content() {
        assert_eq!(sniff_content_type(PNG_HEADER, ".png").unwrap(), "image/png");
        assert_eq!(sniff_content_type(b"%PDF-1.7\n", ".pdf").unwrap(), "application/pdf");
    }

    #[test]
    fn test_zip_only_allowed_for_presentations() {
        assert_eq!(sniff_content_type(&zip_bytes(), ".pptx").unwrap(), PPTX_MIME);
        assert_eq!(detail(sniff_content_type(&zip_bytes(), ".jpg").unwrap_err()), "不支持 ZIP 压缩文件");
    }

    #[test]
    fn test_disguised_file_rejected() {
        let err = sniff_content_type(b"#!/bin/sh\necho hi\n", ".png").unwrap_err();
        assert_eq!(detail(err), "文件内容类型不匹配，可能是伪装文件");
    }

    #[test]
    fn test_generated_filename_shape() {
        let name = generate_filename(".png");
        assert_eq!(name.len(), 14 + 3 + 4);
        assert!(name[..17].bytes().all(|b| b.is_ascii_digit()));
        assert!(name.ends_with(".png"));
    }

    #[actix_web::test]
    async fn test_save_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let service = UploadService::with_dir(dir.path());

        let response = service.save("avatar.PNG", PNG_HEADER.to_vec()).await.unwrap();

        assert_eq!(response.ext, ".png");
        assert_eq!(response.original, "avatar.PNG");
        assert_eq!(response.size, PNG_HEADER.len() as u64);
        assert_eq!(response.url, format!("/static/upload/{}", response.filename));
        assert_eq!(std::fs::read(dir.path().join(&response.filename)).unwrap(), PNG_HEADER);
    }

    #[actix_web::test]
    async fn test_save_rejects_bad_input() {
        let dir = tempfile::tempdir().unwrap();
        let service = UploadService::with_dir(dir.path());

        let err = service.save("a.png", Vec::new()).await.unwrap_err();
        assert_eq!(detail(err), "请上传文件");

        let err = service.save("run.exe", PNG_HEADER.to_vec()).await.unwrap_err();
        assert_eq!(err.error_code(), ErrorCode::ParamsError);
        assert!(detail(err).starts_with("不支持的文件类型"));

        let err = service
            .save("big.png", vec![0u8; UploadConfig::MAX_FILE_SIZE + 1])
            .await
            .unwrap_err();
        assert_eq!(detail(err), "文件大小超过限制（最大20MB）");
    }
}
