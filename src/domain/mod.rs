//! # Domain Layer Module
//!
//! 비즈니스 개념과 API 계약을 정의하는 도메인 계층입니다.
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── Entities - MongoDB에 저장되는 영속 모델
//! ├── DTOs     - 요청/응답 계약과 응답 봉투
//! └── Models   - 토큰 클레임, 인증 컨텍스트, 요청 언어
//!      │
//!      ▼
//! Application Layer (Services)
//!      │
//!      ▼
//! Infrastructure Layer (Repositories, DB, Cache)
//! ```
//!
//! ## 식별자 규칙
//!
//! 모든 엔티티는 `_id: ObjectId`를 사용하며, API 응답과 토큰 클레임에서는
//! 16진수 문자열(`ObjectId::to_hex`)로 노출합니다.

pub mod entities;
pub mod dto;
pub mod models;

pub use entities::*;
pub use models::*;
