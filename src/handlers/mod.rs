//! HTTP 핸들러 모듈
//!
//! 라우트별 요청 처리 함수들을 제공합니다.
//! 모든 핸들러는 템플릿 렌더링 또는 리다이렉트로 응답하며,
//! 요청당 최대 한 번의 데이터베이스 연산을 수행합니다.
//!
//! # Modules
//!
//! - [`pages`] - 정적 페이지 렌더링 (홈/로그인/회원가입 폼)
//! - [`auth`] - 로컬 회원가입/로그인/로그아웃, Google OAuth 플로우
//! - [`secrets`] - 시크릿 목록/제출
//!
//! # 에러 처리 규칙
//!
//! 인증 플로우의 예상된 실패(자격 증명 불일치, 중복 가입, OAuth 실패)는
//! 경고 로그를 남기고 해당 폼으로 리다이렉트합니다. HTTP 레벨에서는
//! 실패 원인이 구분되지 않습니다. 예상하지 못한 실패만 `AppError`로
//! 전파되어 에러 페이지가 렌더링됩니다.

use actix_web::http::header;
use actix_web::HttpResponse;

pub mod pages;
pub mod auth;
pub mod secrets;

/// 지정된 경로로의 리다이렉트 응답을 생성합니다.
///
/// 원본 프레임워크의 `res.redirect()`와 동일하게 302 Found를 사용합니다.
pub fn redirect_to(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .append_header((header::LOCATION, location))
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_to_sets_status_and_location() {
        let response = redirect_to("/login");

        assert_eq!(response.status(), actix_web::http::StatusCode::FOUND);
        assert_eq!(
            response
                .headers()
                .get(header::LOCATION)
                .and_then(|v| v.to_str().ok()),
            Some("/login")
        );
    }
}
