//! 도메인 엔티티
//!
//! MongoDB 컬렉션에 그대로 저장되는 영속 모델입니다.
//!
//! - [`admin`] - 관리자 계정, 역할/권한, 작업 로그, 시스템 설정
//! - [`users`] - 사용자 플랫폼 회원, 후원 주문

pub mod admin;
pub mod users;
