//! 인증 서비스 모듈
//!
//! Google OAuth 2.0 플로우와 쿠키 세션의 생명주기를 담당하는 서비스들입니다.
//!
//! # Modules
//!
//! - [`google_auth_service`] - OAuth 인증 URL 생성, 콜백 처리, find-or-create
//! - [`session_service`] - Redis 세션 발급/해석/파기와 세션 쿠키 구성

pub mod google_auth_service;
pub mod session_service;

pub use google_auth_service::*;
pub use session_service::*;
