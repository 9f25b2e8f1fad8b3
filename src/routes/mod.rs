//! 라우트 설정 모듈
//!
//! 웹 애플리케이션의 엔드포인트들을 기능별로 그룹화하여 등록합니다.
//! 페이지, 인증, 시크릿 라우트와 헬스체크 엔드포인트를 포함합니다.
//!
//! # Routes
//!
//! ## 페이지
//! - `GET /` - 홈
//! - `GET /login`, `GET /register` - 인증 폼
//!
//! ## 인증
//! - `POST /register`, `POST /login` - 로컬 계정 생성/로그인
//! - `GET /auth/google` - Google OAuth 시작
//! - `GET /auth/google/secrets` - Google OAuth 콜백
//! - `GET /logout` - 세션 파기
//!
//! ## 시크릿
//! - `GET /secrets` - 공유된 시크릿 목록 (공개)
//! - `GET /submit`, `POST /submit` - 시크릿 제출 (인증 필요)
//!
//! 접근 제어는 세션 미들웨어가 복원한 인증 주체를 핸들러가 확인하는
//! 방식으로 이루어지며, 라우트 레벨 가드는 없습니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use actix_web::App;
//!
//! let app = App::new().configure(configure_all_routes);
//! ```

use actix_web::web;
use serde_json::json;

use crate::handlers;

/// 모든 라우트를 설정합니다
///
/// 기능별로 분할된 라우트들을 통합하여 애플리케이션에 등록합니다.
///
/// # Arguments
///
/// * `cfg` - Actix-web 서비스 설정 객체
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    // Health check endpoint
    cfg.service(health_check);

    // Feature-specific routes
    configure_page_routes(cfg);
    configure_auth_routes(cfg);
    configure_secret_routes(cfg);
}

/// 정적 페이지 라우트를 설정합니다
fn configure_page_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::pages::home)
        .service(handlers::pages::login_page)
        .service(handlers::pages::register_page);
}

/// 인증 관련 라우트를 설정합니다
///
/// 로컬 회원가입/로그인, Google OAuth, 로그아웃 엔드포인트를 등록합니다.
/// 모든 인증 라우트는 Public 접근이 가능합니다 (인증을 위한 엔드포인트이므로).
fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::auth::register)
        .service(handlers::auth::login)
        .service(handlers::auth::logout)
        .service(handlers::auth::google_login)
        .service(handlers::auth::google_callback);
}

/// 시크릿 관련 라우트를 설정합니다
///
/// 목록은 공개이며, 제출 페이지/제출은 핸들러가 세션을 확인합니다.
fn configure_secret_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::secrets::secrets_page)
        .service(handlers::secrets::submit_page)
        .service(handlers::secrets::submit_secret);
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// 로드밸런서나 모니터링 시스템에서 서비스 상태를 확인하는 데 사용됩니다.
///
/// # Examples
///
/// ```bash
/// curl http://localhost:8080/health
/// ```
#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "secrets_webapp",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "features": {
            "database": "MongoDB",
            "cache": "Redis",
            "templating": "Askama"
        }
    }))
}
