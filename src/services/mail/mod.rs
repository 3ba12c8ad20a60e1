//! 메일 발송
//!
//! - [`MailSender`](mail_service::MailSender) - 발송 인터페이스
//! - [`SmtpMailer`](mail_service::SmtpMailer) - `lettre` 기반 SMTP 구현

pub mod mail_service;

pub use mail_service::*;
