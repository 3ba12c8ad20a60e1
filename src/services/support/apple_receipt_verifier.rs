//! App Store 영수증 검증 클라이언트
//!
//! 운영 서버(`buy.itunes.apple.com`)에 먼저 검증을 요청하고, 샌드박스 영수증을
//! 뜻하는 상태 21007을 받으면 샌드박스 서버로 한 번 더 요청합니다.
//! 최종 상태가 0일 때만 검증 통과입니다.

use std::time::Instant;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use singleton_macro::service;
use crate::{
    config::IapConfig,
    errors::{AppError, AppResult},
};

/// 영수증 검증 seam. 테스트에서는 고정 결과를 돌려주는 구현을 씁니다.
#[async_trait]
pub trait ReceiptVerifier: Send + Sync {
    /// 검증 통과 여부. 통신 실패와 설정 누락은 `Err`
    async fn verify(&self, receipt_data: &str) -> AppResult<bool>;
}

#[derive(Debug, Serialize)]
struct VerifyReceiptRequest<'a> {
    #[serde(rename = "receipt-data")]
    receipt_data: &'a str,
    password: &'a str,
    #[serde(rename = "exclude-old-transactions")]
    exclude_old_transactions: bool,
}

#[derive(Debug, Deserialize)]
struct VerifyReceiptResponse {
    status: i64,
}

/// 검증 서버 주소와 공유 시크릿
#[derive(Debug, Clone)]
struct VerifyEndpoints {
    production_url: String,
    sandbox_url: String,
    shared_secret: Option<String>,
}

impl VerifyEndpoints {
    fn from_config() -> Self {
        Self {
            production_url: IapConfig::PRODUCTION_VERIFY_URL.to_string(),
            sandbox_url: IapConfig::SANDBOX_VERIFY_URL.to_string(),
            shared_secret: IapConfig::shared_secret(),
        }
    }
}

/// 검증 서버 주소와 시크릿은 호출 시점에 [`IapConfig`]에서 읽습니다.
#[service(name = "apple_receipt_verifier")]
pub struct AppleReceiptVerifier {
    endpoints: Option<VerifyEndpoints>,
}

impl AppleReceiptVerifier {
    #[cfg(test)]
    fn with_endpoints(production_url: &str, sandbox_url: &str, shared_secret: Option<String>) -> Self {
        Self {
            endpoints: Some(VerifyEndpoints {
                production_url: production_url.to_string(),
                sandbox_url: sandbox_url.to_string(),
                shared_secret,
            }),
        }
    }

    fn endpoints(&self) -> VerifyEndpoints {
        self.endpoints.clone().unwrap_or_else(VerifyEndpoints::from_config)
    }

    async fn request_status(
        client: &reqwest::Client,
        url: &str,
        body: &VerifyReceiptRequest<'_>,
    ) -> AppResult<i64> {
        let started = Instant::now();

        let response = client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("App Store 검증 요청 실패: {}", e)))?;

        let result = response
            .json::<VerifyReceiptResponse>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("App Store 응답 파싱 실패: {}", e)))?;

        log::info!(
            "[verifyAppleReceipt] url={} status={} elapsed_ms={}",
            url,
            result.status,
            started.elapsed().as_millis()
        );
        Ok(result.status)
    }
}

#[async_trait]
impl ReceiptVerifier for AppleReceiptVerifier {
    async fn verify(&self, receipt_data: &str) -> AppResult<bool> {
        let started = Instant::now();
        let endpoints = self.endpoints();
        let shared_secret = endpoints
            .shared_secret
            .as_deref()
            .ok_or_else(|| AppError::ExternalServiceError("IOS_IAP_SHARED_SECRET이 설정되지 않았습니다".to_string()))?;

        let client = reqwest::Client::builder()
            .timeout(IapConfig::request_timeout())
            .build()
            .map_err(|e| AppError::ExternalServiceError(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        let body = VerifyReceiptRequest {
            receipt_data,
            password: shared_secret,
            exclude_old_transactions: true,
        };

        let mut status = Self::request_status(&client, &endpoints.production_url, &body).await?;
        if status == IapConfig::SANDBOX_RECEIPT_STATUS {
            log::info!("[verifyAppleReceipt] got 21007, fallback sandbox");
            status = Self::request_status(&client, &endpoints.sandbox_url, &body).await?;
        }

        log::info!(
            "[verifyAppleReceipt] final_status={} total_elapsed_ms={}",
            status,
            started.elapsed().as_millis()
        );
        Ok(status == 0)
    }
}
