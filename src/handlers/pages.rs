//! 정적 페이지 핸들러
//!
//! 데이터베이스 연산 없이 템플릿만 렌더링하는 페이지들입니다.

use actix_web::{get, HttpResponse};

use crate::errors::errors::AppError;
use crate::views::{render, HomeTemplate, LoginTemplate, RegisterTemplate};

/// 홈 페이지 핸들러
///
/// # Endpoint
/// `GET /`
#[get("/")]
pub async fn home() -> Result<HttpResponse, AppError> {
    render(HomeTemplate)
}

/// 로그인 폼 페이지 핸들러
///
/// # Endpoint
/// `GET /login`
#[get("/login")]
pub async fn login_page() -> Result<HttpResponse, AppError> {
    render(LoginTemplate)
}

/// 회원가입 폼 페이지 핸들러
///
/// # Endpoint
/// `GET /register`
#[get("/register")]
pub async fn register_page() -> Result<HttpResponse, AppError> {
    render(RegisterTemplate)
}
