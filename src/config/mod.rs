//! # Configuration Module
//!
//! 환경 변수 기반의 설정값들을 중앙집중식으로 관리합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 환경, 서버, 데이터베이스, Redis, 속도 제한 설정
//! - [`auth_config`] - JWT, IP 화이트리스트, 접근 경로 정책
//! - [`service_config`] - 메일, 인앱 결제 검증, 업로드 설정
//!
//! ## 설정 파일
//!
//! `PROFILE` 값에 따라 `.env.dev`, `.env.prod`, 그 외에는 `.env`를 읽습니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::{ServerConfig, JwtConfig};
//!
//! let host = ServerConfig::host();
//! let port = ServerConfig::port();
//! let expiration = JwtConfig::expiration_hours();
//! ```
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 서버
//! export HOST="0.0.0.0"
//! export PORT="8080"
//!
//! # 저장소
//! export MONGODB_URI="mongodb://localhost:27017"
//! export DATABASE_NAME="portal"
//! export REDIS_URL="redis://localhost:6379"
//!
//! # 보안
//! export JWT_SECRET="your-super-secret-key"
//! export BCRYPT_COST="12"          # 4-15 범위
//! ```

pub mod data_config;
pub mod auth_config;
pub mod service_config;

pub use data_config::*;
pub use auth_config::*;
pub use service_config::*;
