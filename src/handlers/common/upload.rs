//! 파일 업로드 핸들러 (`/api/common/upload`)

use actix_multipart::Multipart;
use actix_web::{post, HttpResponse};
use futures_util::StreamExt as _;
use crate::config::UploadConfig;
use crate::domain::dto::common::ApiResponse;
use crate::domain::models::lang::Lang;
use crate::errors::{ApiResult, AppError, AppResult, ErrorCode};
use crate::services::upload::UploadService;

/// 업로드 대상 multipart 필드 이름
const FILE_FIELD: &str = "file";

/// multipart 본문에서 `file` 필드를 읽어 저장합니다.
#[post("/upload")]
pub async fn upload(lang: Lang, payload: Multipart) -> ApiResult<HttpResponse> {
    let (original_name, data) = read_file_field(payload).await.map_err(|e| e.localized(lang))?;

    let response = UploadService::instance()
        .save(&original_name, data)
        .await
        .map_err(|e| e.localized(lang))?;

    Ok(ApiResponse::success(response))
}

/// 크기 제한을 넘으면 나머지를 읽지 않고 중단합니다.
async fn read_file_field(mut payload: Multipart) -> AppResult<(String, Vec<u8>)> {
    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| {
            log::error!("[Upload] multipart 파싱 실패: {}", e);
            AppError::business_with(ErrorCode::ParamsError, "请上传文件")
        })?;

        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .unwrap_or_default()
            .to_string();

        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| {
                log::error!("[Upload] 파일 수신 실패: {}", e);
                AppError::business_with(ErrorCode::ParamsError, "请上传文件")
            })?;

            if data.len() + chunk.len() > UploadConfig::MAX_FILE_SIZE {
                log::error!("[Upload] 파일 크기 초과: {} bytes 이상", data.len() + chunk.len());
                return Err(AppError::business_with(
                    ErrorCode::ParamsError,
                    "文件大小超过限制（最大20MB）",
                ));
            }
            data.extend_from_slice(&chunk);
        }

        return Ok((filename, data));
    }

    Err(AppError::business_with(ErrorCode::ParamsError, "请上传文件"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App};
    use serde_json::Value;

    fn multipart_body(field: &str, filename: &str, content: &[u8]) -> (String, Vec<u8>) {
        let boundary = "----portalboundary";
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                field, filename
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());

        (format!("multipart/form-data; boundary={}", boundary), body)
    }

    async fn echo(payload: Multipart) -> HttpResponse {
        match read_file_field(payload).await {
            Ok((name, data)) => HttpResponse::Ok().json(serde_json::json!({
                "name": name,
                "size": data.len(),
            })),
            Err(e) => HttpResponse::BadRequest().json(serde_json::json!({
                "detail": e.client_detail(),
            })),
        }
    }

    #[actix_web::test]
    async fn test_reads_file_field() {
        let app = test::init_service(App::new().route("/", web::post().to(echo))).await;
        let (content_type, body) = multipart_body("file", "photo.png", b"abcdef");

        let req = test::TestRequest::post()
            .uri("/")
            .insert_header(("content-type", content_type))
            .set_payload(body)
            .to_request();
        let json: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(json["name"], "photo.png");
        assert_eq!(json["size"], 6);
    }

    #[actix_web::test]
    async fn test_other_field_is_treated_as_missing() {
        let app = test::init_service(App::new().route("/", web::post().to(echo))).await;
        let (content_type, body) = multipart_body("avatar", "photo.png", b"abcdef");

        let req = test::TestRequest::post()
            .uri("/")
            .insert_header(("content-type", content_type))
            .set_payload(body)
            .to_request();
        let json: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(json["detail"], "请上传文件");
    }
}
