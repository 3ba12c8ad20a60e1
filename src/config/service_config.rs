//! 외부 연동 및 부가 기능 설정
//!
//! 메일(SMTP), iOS 인앱 결제 검증, 파일 업로드 설정을 관리합니다.
//!
//! ```bash
//! export SMTP_HOST="smtp.gmail.com"
//! export SMTP_PORT="587"
//! export MAIL_USERNAME="no-reply@example.com"
//! export MAIL_PASSWORD="app-password"
//! export MAIL_TITLE="Verification"
//! export IOS_IAP_SHARED_SECRET="shared-secret"
//! export UPLOAD_DIR="static/upload"
//! ```

use std::env;
use std::time::Duration;

/// SMTP 메일 발송 설정
pub struct MailConfig;

impl MailConfig {
    /// SMTP 서버 주소. 기본값: "smtp.gmail.com"
    pub fn smtp_host() -> String {
        env::var("SMTP_HOST").unwrap_or_else(|_| "smtp.gmail.com".to_string())
    }

    /// SMTP 포트 (STARTTLS). 기본값: 587
    pub fn smtp_port() -> u16 {
        env::var("SMTP_PORT")
            .ok()
            .and_then(|port| port.parse().ok())
            .unwrap_or(587)
    }

    /// 발신 계정 (From 주소로도 사용)
    pub fn username() -> String {
        env::var("MAIL_USERNAME").unwrap_or_default()
    }

    pub fn password() -> String {
        env::var("MAIL_PASSWORD").unwrap_or_default()
    }

    /// 제목이 지정되지 않은 메일의 기본 제목
    pub fn default_title() -> String {
        env::var("MAIL_TITLE").unwrap_or_else(|_| "Verification Code".to_string())
    }
}

/// App Store 영수증 검증 설정
pub struct IapConfig;

impl IapConfig {
    pub const PRODUCTION_VERIFY_URL: &'static str = "https://buy.itunes.apple.com/verifyReceipt";
    pub const SANDBOX_VERIFY_URL: &'static str = "https://sandbox.itunes.apple.com/verifyReceipt";

    /// 샌드박스 영수증을 운영 서버에 보냈을 때 Apple이 돌려주는 상태 코드
    pub const SANDBOX_RECEIPT_STATUS: i64 = 21007;

    /// App Store Connect 상품 ID → 후원 금액
    pub const PRODUCTS: &'static [(&'static str, f64)] = &[
        ("com.yourapp.support.1", 1.0),
        ("com.yourapp.support.5", 5.0),
        ("com.yourapp.support.10", 10.0),
        ("com.yourapp.support.50", 50.0),
        ("com.yourapp.support.100", 100.0),
        ("com.yourapp.support.300", 300.0),
        ("com.yourapp.support.500", 500.0),
        ("com.yourapp.support.1000", 1000.0),
    ];

    /// `IOS_IAP_SHARED_SECRET` (비어 있으면 None)
    pub fn shared_secret() -> Option<String> {
        env::var("IOS_IAP_SHARED_SECRET")
            .ok()
            .map(|secret| secret.trim().to_string())
            .filter(|secret| !secret.is_empty())
    }

    /// 검증 요청 1회당 타임아웃
    pub fn request_timeout() -> Duration {
        Duration::from_secs(12)
    }

    /// 상품 ID에 해당하는 금액
    pub fn product_amount(product_id: &str) -> Option<f64> {
        Self::PRODUCTS
            .iter()
            .find(|(id, _)| *id == product_id)
            .map(|(_, amount)| *amount)
    }
}

/// 파일 업로드 설정
pub struct UploadConfig;

impl UploadConfig {
    /// 업로드 최대 크기 (20 MiB)
    pub const MAX_FILE_SIZE: usize = 20 * 1024 * 1024;

    /// 허용 확장자 (소문자, 점 포함)
    pub const ALLOWED_EXTENSIONS: &'static [&'static str] = &[
        ".jpg", ".jpeg", ".png", ".gif", ".heic", ".heif", ".webp", ".pdf", ".ppt", ".pptx",
    ];

    /// 허용 MIME 타입
    pub const ALLOWED_MIME_TYPES: &'static [&'static str] = &[
        "image/jpeg",
        "image/png",
        "image/gif",
        "image/heic",
        "image/heif",
        "image/webp",
        "application/pdf",
        "application/vnd.ms-powerpoint",
        "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    ];

    /// 저장 디렉터리. 기본값: "static/upload"
    pub fn upload_dir() -> String {
        env::var("UPLOAD_DIR").unwrap_or_else(|_| "static/upload".to_string())
    }

    /// 응답 URL 접두사
    pub fn public_prefix() -> &'static str {
        "/static/upload"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_amount_lookup() {
        assert_eq!(IapConfig::product_amount("com.yourapp.support.1"), Some(1.0));
        assert_eq!(IapConfig::product_amount("com.yourapp.support.1000"), Some(1000.0));
        assert_eq!(IapConfig::product_amount("com.yourapp.support.2"), None);
    }

    #[test]
    fn test_upload_limits() {
        assert_eq!(UploadConfig::MAX_FILE_SIZE, 20_971_520);
        assert!(UploadConfig::ALLOWED_EXTENSIONS.contains(&".pptx"));
        assert!(!UploadConfig::ALLOWED_EXTENSIONS.contains(&".exe"));
    }

    #[test]
    fn test_smtp_port_default() {
        if env::var("SMTP_PORT").is_err() {
            assert_eq!(MailConfig::smtp_port(), 587);
        }
    }
}
