//! 시크릿 서비스 모듈

pub mod secret_service;

pub use secret_service::*;
