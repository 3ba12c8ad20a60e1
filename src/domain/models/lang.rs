//! 요청 언어 판별
//!
//! 관리자 화면은 `Language` 헤더를, 프론트엔드는 `Accept-Language`의
//! 첫 번째 태그를 사용합니다. 둘 다 없거나 알 수 없는 값이면 중국어가 기본입니다.

use std::future::{ready, Ready};
use actix_web::{FromRequest, HttpRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lang {
    #[default]
    Zh,
    En,
}

impl Lang {
    /// 언어 태그(`zh-CN`, `en;q=0.9` 등)를 해석합니다.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.split(';').next().unwrap_or("").trim().to_lowercase();
        if tag.starts_with("zh") {
            Some(Lang::Zh)
        } else if tag.starts_with("en") {
            Some(Lang::En)
        } else {
            None
        }
    }

    /// `Language` 헤더 우선, 없으면 `Accept-Language`의 첫 태그
    pub fn from_headers(language: Option<&str>, accept_language: Option<&str>) -> Self {
        if let Some(lang) = language.filter(|v| !v.trim().is_empty()).and_then(Self::from_tag) {
            return lang;
        }

        accept_language
            .and_then(|header| header.split(',').next())
            .and_then(Self::from_tag)
            .unwrap_or_default()
    }

    pub fn from_request_headers(req: &HttpRequest) -> Self {
        let header = |name: &str| req.headers().get(name).and_then(|v| v.to_str().ok());
        Self::from_headers(header("Language"), header("Accept-Language"))
    }
}

impl FromRequest for Lang {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        ready(Ok(Lang::from_request_headers(req)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_language_first_tag() {
        assert_eq!(Lang::from_headers(None, Some("en-US,en;q=0.9,zh;q=0.8")), Lang::En);
        assert_eq!(Lang::from_headers(None, Some("zh-CN,zh;q=0.9")), Lang::Zh);
        assert_eq!(Lang::from_headers(None, Some("ja-JP,en;q=0.5")), Lang::Zh);
    }

    #[test]
    fn test_language_header_wins() {
        assert_eq!(Lang::from_headers(Some("en"), Some("zh-CN")), Lang::En);
        assert_eq!(Lang::from_headers(Some(" "), Some("en-GB")), Lang::En);
    }

    #[test]
    fn test_default_is_chinese() {
        assert_eq!(Lang::from_headers(None, None), Lang::Zh);
    }
}
