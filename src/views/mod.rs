//! 뷰 렌더링 모듈
//!
//! Askama 템플릿 구조체와 HTML 응답 렌더링 헬퍼를 제공합니다.
//! 템플릿 파일은 크레이트 루트의 `templates/` 디렉터리에 있으며,
//! 모든 페이지는 `base.html` 레이아웃을 상속합니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::views::{render, SecretsTemplate};
//!
//! let secrets = secret_service.list_shared_secrets().await?;
//! render(SecretsTemplate { secrets })
//! ```

use actix_web::http::header::ContentType;
use actix_web::HttpResponse;
use askama::Template;

use crate::errors::errors::AppError;

/// 홈 페이지 (`GET /`)
#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate;

/// 로그인 폼 페이지 (`GET /login`)
#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate;

/// 회원가입 폼 페이지 (`GET /register`)
#[derive(Template)]
#[template(path = "register.html")]
pub struct RegisterTemplate;

/// 시크릿 목록 페이지 (`GET /secrets`)
#[derive(Template)]
#[template(path = "secrets.html")]
pub struct SecretsTemplate {
    /// 공유된 시크릿 문자열 목록 (작성자 비노출)
    pub secrets: Vec<String>,
}

/// 시크릿 제출 폼 페이지 (`GET /submit`)
#[derive(Template)]
#[template(path = "submit.html")]
pub struct SubmitTemplate;

/// 템플릿을 HTML 응답으로 렌더링합니다.
///
/// # 반환값
///
/// * `Ok(HttpResponse)` - `200 OK` + `text/html` 본문
/// * `Err(AppError::InternalError)` - 템플릿 렌더링 실패
pub fn render<T: Template>(template: T) -> Result<HttpResponse, AppError> {
    let body = template
        .render()
        .map_err(|e| AppError::InternalError(format!("템플릿 렌더링 실패: {}", e)))?;

    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_template_renders_entry_links() {
        let html = HomeTemplate.render().unwrap();

        assert!(html.contains("href=\"/register\""));
        assert!(html.contains("href=\"/login\""));
    }

    #[test]
    fn test_login_template_contains_form_and_google_link() {
        let html = LoginTemplate.render().unwrap();

        assert!(html.contains("action=\"/login\""));
        assert!(html.contains("method=\"post\""));
        assert!(html.contains("href=\"/auth/google\""));
    }

    #[test]
    fn test_register_template_contains_form_and_google_link() {
        let html = RegisterTemplate.render().unwrap();

        assert!(html.contains("action=\"/register\""));
        assert!(html.contains("href=\"/auth/google\""));
    }

    #[test]
    fn test_secrets_template_lists_submitted_secrets_verbatim() {
        let template = SecretsTemplate {
            secrets: vec![
                "I ate the last cookie.".to_string(),
                "고양이가 세 마리 있어요".to_string(),
            ],
        };

        let html = template.render().unwrap();

        assert!(html.contains("I ate the last cookie."));
        assert!(html.contains("고양이가 세 마리 있어요"));
    }

    #[test]
    fn test_secrets_template_empty_state() {
        let template = SecretsTemplate { secrets: vec![] };

        let html = template.render().unwrap();

        assert!(html.contains("아직 공유된 시크릿이 없습니다"));
    }

    #[test]
    fn test_secrets_template_escapes_html() {
        // 시크릿 본문이 마크업으로 해석되면 안 된다
        let template = SecretsTemplate {
            secrets: vec!["<script>alert(1)</script>".to_string()],
        };

        let html = template.render().unwrap();

        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_submit_template_contains_secret_form() {
        let html = SubmitTemplate.render().unwrap();

        assert!(html.contains("action=\"/submit\""));
        assert!(html.contains("name=\"secret\""));
    }

    #[test]
    fn test_render_produces_html_response() {
        let response = render(HomeTemplate).unwrap();

        assert_eq!(response.status(), actix_web::http::StatusCode::OK);
    }
}
