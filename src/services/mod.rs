//! 서비스 모듈
//!
//! 비즈니스 로직 계층을 제공합니다. 각 서비스는 `#[service]` 매크로로
//! 싱글톤 등록되며 리포지토리/인프라 의존성을 자동 주입받습니다.
//!
//! # Modules
//!
//! - [`users`] - 사용자 등록 및 로컬 인증
//! - [`auth`] - Google OAuth 플로우, 세션 발급/해석/파기
//! - [`secrets`] - 시크릿 제출 및 목록 조회

pub mod users;
pub mod auth;
pub mod secrets;
