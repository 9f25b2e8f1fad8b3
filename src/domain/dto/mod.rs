//! 요청 DTO 모듈
//!
//! HTML 폼과 쿼리 스트링 경계에서 사용되는 데이터 전송 객체들입니다.
//! 모든 DTO는 `serde`로 역직렬화되며, 필요한 경우 `validator` 검증 규칙을 포함합니다.
//!
//! # Modules
//!
//! - [`auth`] - 회원가입/로그인 폼, OAuth 콜백 쿼리
//! - [`secrets`] - 시크릿 제출 폼

pub mod auth;
pub mod secrets;

pub use auth::*;
pub use secrets::*;
