//! # Core Framework Module
//!
//! 애플리케이션 컴포넌트의 생명주기를 관리하는 핵심 모듈입니다.
//!
//! ## 모듈 구성
//!
//! ### [`registry`] - 의존성 주입 컨테이너
//! - **ServiceLocator**: TypeId 기반 싱글톤 컨테이너
//! - **자동 레지스트리**: `#[service]` / `#[repository]` 매크로와 `inventory` 기반 등록
//! - **순환 참조 감지**: 생성 중인 타입 추적
//!
//! ## 새로운 컴포넌트 추가
//!
//! 1. 구조체 정의
//! 2. 의존성은 `Arc<T>` 필드로 선언 (매크로가 `ServiceLocator::get`으로 주입)
//! 3. `#[service(name = "...")]` 또는 `#[repository(name = "...", collection = "...")]` 부착
//! 4. 사용처에서 `Type::instance()`
//!
//! `Arc<dyn Trait>` 필드는 `main`에서 `ServiceLocator::set::<dyn Trait>(...)`로
//! 구현체를 먼저 바인딩해야 합니다.
//!
//! ## 트러블슈팅
//!
//! ```text
//! panic: Circular dependency detected: MemberService is already being initialized
//! ```
//! **해결**: 서비스 계층 구조를 단방향 의존성으로 재설계
//!
//! ```text
//! panic: Service not found: Database ...
//! ```
//! **해결**: `main`에서 `ServiceLocator::set()`으로 인프라를 먼저 등록

pub mod registry;

pub use registry::*;
