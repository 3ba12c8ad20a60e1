//! 이메일 인증 코드 서비스
//!
//! ## 키 구조
//!
//! | 키 | 값 | TTL |
//! |----|----|-----|
//! | `REGISTER_CODE:<email>` | 6자리 코드 | 300초 |
//! | `FORGOT_CODE:<email>` | 6자리 코드 | 300초 |
//! | `email_code_lock:<email>` | `"1"` | 10초 |
//!
//! 잠금 키가 살아 있는 동안에는 같은 주소로 다시 발송하지 않습니다.

use std::sync::Arc;
use singleton_macro::service;
use crate::{
    caching::store::CacheStore,
    errors::{AppError, AppResult, ErrorCode},
    services::mail::{render_verification_email, MailSender},
    utils::random::random_digits,
};

pub const CODE_TTL_SECONDS: u64 = 300;
pub const SEND_LOCK_SECONDS: u64 = 10;
const CODE_LENGTH: usize = 6;

/// 인증 코드 용도
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodePurpose {
    Register,
    ForgotPassword,
}

impl CodePurpose {
    /// 요청의 `type` 값: "1" 회원가입, "2" 비밀번호 찾기
    pub fn from_type(code_type: &str) -> Option<Self> {
        match code_type {
            "1" => Some(CodePurpose::Register),
            "2" => Some(CodePurpose::ForgotPassword),
            _ => None,
        }
    }

    pub fn cache_key(&self, email: &str) -> String {
        match self {
            CodePurpose::Register => format!("REGISTER_CODE:{}", email),
            CodePurpose::ForgotPassword => format!("FORGOT_CODE:{}", email),
        }
    }
}

fn lock_key(email: &str) -> String {
    format!("email_code_lock:{}", email)
}

#[service(name = "verification_code")]
pub struct VerificationCodeService {
    cache: Arc<dyn CacheStore>,
    mailer: Arc<dyn MailSender>,
}

impl VerificationCodeService {
    #[cfg(test)]
    pub(crate) fn with_parts(cache: Arc<dyn CacheStore>, mailer: Arc<dyn MailSender>) -> Self {
        Self { cache, mailer }
    }

    /// 코드를 만들어 저장하고 메일로 보냅니다. 반환값은 코드 유효 시간(초)
    pub async fn send(&self, email: &str, purpose: CodePurpose) -> AppResult<u64> {
        let locked = self
            .cache
            .set_if_absent(&lock_key(email), "1", SEND_LOCK_SECONDS)
            .await
            .map_err(|e| send_failed("lock", e))?;
        if !locked {
            log::warn!("[SendCode] 재발송 대기 중: {}", email);
            return Err(AppError::business(ErrorCode::SendCodeFailed));
        }

        let code = random_digits(CODE_LENGTH);

        self.cache
            .set_value(&purpose.cache_key(email), &code, Some(CODE_TTL_SECONDS))
            .await
            .map_err(|e| send_failed("store", e))?;

        self.mailer
            .send_html(email, "", &render_verification_email(&code))
            .await
            .map_err(|e| send_failed("mail", e))?;

        log::info!("[SendCode] Type: {:?}, Email: {}", purpose, email);
        Ok(CODE_TTL_SECONDS)
    }

    /// 저장된 코드와 비교합니다. 저장소 오류는 불일치로 취급합니다.
    pub async fn verify(&self, email: &str, purpose: CodePurpose, code: &str) -> bool {
        match self.cache.get_value(&purpose.cache_key(email)).await {
            Ok(Some(saved)) => !code.is_empty() && saved == code,
            Ok(None) => false,
            Err(e) => {
                log::error!("[VerifyCode] 인증 코드 조회 실패 {}: {}", email, e);
                false
            }
        }
    }

    /// 사용이 끝난 코드를 삭제합니다. 실패는 로그만 남깁니다.
    pub async fn consume(&self, email: &str, purpose: CodePurpose) {
        if let Err(e) = self.cache.del(&purpose.cache_key(email)).await {
            log::warn!("[VerifyCode] 인증 코드 삭제 실패 {}: {}", email, e);
        }
    }
}

fn send_failed(stage: &str, error: AppError) -> AppError {
    log::error!("[SendCode] {} 단계 실패: {}", stage, error);
    AppError::business(ErrorCode::SendCodeFailed)
}
