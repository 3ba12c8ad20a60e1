//! SMTP 메일 발송 서비스
//!
//! [`MailSender`] trait 뒤에 실제 SMTP 구현([`SmtpMailer`], `lettre`)을 둡니다.
//! 인증 코드 서비스는 trait만 의존하므로 테스트에서는 메모리 구현으로 대체합니다.

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use singleton_macro::service;
use crate::{
    config::MailConfig,
    errors::{AppError, AppResult},
};

/// HTML 메일 발송 인터페이스
#[async_trait]
pub trait MailSender: Send + Sync {
    /// `subject`가 비어 있으면 기본 제목을 사용합니다.
    async fn send_html(&self, to: &str, subject: &str, html: &str) -> AppResult<()>;
}

/// 인증 코드 안내 메일 본문
pub fn render_verification_email(code: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<style>
    body {{ font-family: Arial, sans-serif; line-height: 1.6; color: #333; }}
    .container {{ max-width: 600px; margin: 0 auto; padding: 20px; background-color: #f9f9f9; }}
    .content {{ background-color: #ffffff; padding: 30px; border-radius: 8px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }}
    .code {{ font-size: 32px; font-weight: bold; color: #ff5722; letter-spacing: 4px; text-align: center; padding: 20px; background-color: #f5f5f5; border-radius: 4px; margin: 20px 0; }}
    .footer {{ margin-top: 20px; padding-top: 20px; border-top: 1px solid #eee; color: #999; font-size: 12px; }}
</style>
</head>
<body>
<div class="container">
    <div class="content">
        <h2 style="color: #333; margin-top: 0;">🔐 验证码通知</h2>
        <p>您好！</p>
        <p>请使用以下验证码完成验证：</p>
        <div class="code">{code}</div>
        <p>⚠️ <strong>重要提示：</strong></p>
        <ul>
            <li>验证码有效期为 <strong>5分钟</strong></li>
            <li>请勿将验证码透露给他人</li>
            <li>如非本人操作，请忽略此邮件</li>
        </ul>
        <div class="footer">
            <p>此邮件由系统自动发送，请勿回复。</p>
        </div>
    </div>
</div>
</body>
</html>
"#
    )
}

/// 발신 주소와 기본 제목으로 HTML 메일을 조립합니다.
///
/// `subject`가 비어 있으면 `default_title`을 씁니다.
fn build_message(sender: &str, default_title: &str, to: &str, subject: &str, html: &str) -> AppResult<Message> {
    let from: Mailbox = sender
        .parse()
        .map_err(|e| AppError::InternalError(format!("발신 주소 오류: {}", e)))?;
    let to: Mailbox = to
        .parse()
        .map_err(|e| AppError::ValidationError(format!("수신 주소 오류: {}", e)))?;
    let subject = if subject.is_empty() { default_title } else { subject };

    Message::builder()
        .from(from)
        .to(to)
        .subject(subject)
        .header(ContentType::TEXT_HTML)
        .body(html.to_string())
        .map_err(|e| AppError::InternalError(format!("메일 생성 실패: {}", e)))
}

/// STARTTLS SMTP 발송기
///
/// SMTP 설정은 발송 시점에 [`MailConfig`]에서 읽고, 연결은 발송할 때마다 새로 맺습니다.
#[service(name = "smtp_mailer")]
pub struct SmtpMailer {}

#[async_trait]
impl MailSender for SmtpMailer {
    async fn send_html(&self, to: &str, subject: &str, html: &str) -> AppResult<()> {
        let username = MailConfig::username();
        let message = build_message(&username, &MailConfig::default_title(), to, subject, html)?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&MailConfig::smtp_host())
            .map_err(|e| AppError::ExternalServiceError(format!("SMTP 설정 오류: {}", e)))?
            .port(MailConfig::smtp_port())
            .credentials(Credentials::new(username, MailConfig::password()))
            .build();

        transport
            .send(message)
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("메일 발송 실패: {}", e)))?;

        log::info!("메일 발송 완료: {}", to);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SENDER: &str = "no-reply@example.com";
    const TITLE: &str = "Verification Code";

    #[test]
    fn test_verification_email_contains_code_and_validity() {
        let html = render_verification_email("482913");

        assert!(html.contains(r#"<div class="code">482913</div>"#));
        assert!(html.contains("5分钟"));
    }

    #[test]
    fn test_build_message_uses_default_title() {
        let message = build_message(SENDER, TITLE, "user@example.com", "", "<p>hi</p>").unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();

        assert!(raw.contains("Subject: Verification Code"));
        assert!(raw.contains("To: user@example.com"));
    }

    #[test]
    fn test_build_message_rejects_bad_recipient() {
        assert!(build_message(SENDER, TITLE, "not an address", "t", "x").is_err());
        assert!(build_message("", TITLE, "user@example.com", "t", "x").is_err());
    }
}
