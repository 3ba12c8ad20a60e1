//! 공통 응답 봉투와 페이지네이션 DTO

use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};

/// 모든 API 응답이 공유하는 봉투
///
/// ```json
/// {"code": 200, "msg": "success", "data": {...}}
/// ```
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: i64,
    pub msg: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            code: 200,
            msg: "success".to_string(),
            data: Some(data),
        }
    }

    /// 실패 응답. `data`는 항상 null
    pub fn failure(code: i64, msg: impl Into<String>) -> Self {
        Self {
            code,
            msg: msg.into(),
            data: None,
        }
    }

    /// HTTP 200 성공 응답
    pub fn success(data: T) -> HttpResponse {
        HttpResponse::Ok().json(Self::ok(data))
    }
}

/// 단순 안내 메시지 응답 (`{"message": "..."}`)
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// 페이지 요청 쿼리
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

impl PageQuery {
    pub const DEFAULT_PAGE_SIZE: u64 = 20;
    pub const MAX_PAGE_SIZE: u64 = 100;

    pub fn new(page: Option<u64>, page_size: Option<u64>) -> Self {
        Self { page, page_size }
    }

    /// 1부터 시작하는 페이지 번호
    pub fn page(&self) -> u64 {
        self.page.filter(|page| *page > 0).unwrap_or(1)
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
            .filter(|size| *size > 0)
            .unwrap_or(Self::DEFAULT_PAGE_SIZE)
            .min(Self::MAX_PAGE_SIZE)
    }

    pub fn skip(&self) -> u64 {
        (self.page() - 1) * self.page_size()
    }
}

/// 페이지 응답
#[derive(Debug, Serialize, Deserialize)]
pub struct PageResult<T> {
    pub list: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
}

impl<T> PageResult<T> {
    pub fn new(list: Vec<T>, total: u64, query: &PageQuery) -> Self {
        Self {
            list,
            total,
            page: query.page(),
            page_size: query.page_size(),
        }
    }

    /// 목록 항목을 다른 타입으로 변환합니다.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResult<U> {
        PageResult {
            list: self.list.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            page_size: self.page_size,
        }
    }
}
