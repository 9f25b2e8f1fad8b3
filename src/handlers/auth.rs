//! Authentication HTTP Handlers
//!
//! 사용자 인증과 관련된 HTTP 엔드포인트를 처리하는 핸들러 함수들입니다.
//! 로컬 인증과 Google OAuth 2.0 인증을 모두 지원하며,
//! 인증 성공 시 Redis 세션을 발급하고 세션 쿠키를 설정합니다.
//!
//! # Auth Flows
//!
//! - **로컬 회원가입**: `POST /register` → 성공 시 세션 + `/secrets`
//! - **로컬 로그인**: `POST /login` → 성공 시 세션 + `/secrets`
//! - **Google OAuth**: `GET /auth/google` → Google → `GET /auth/google/secrets`
//! - **로그아웃**: `GET /logout` → 세션 파기 + `/`
//!
//! 예상된 인증 실패는 모두 경고 로그 후 해당 폼으로 리다이렉트됩니다.

use actix_web::{get, post, web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::config::SessionConfig;
use crate::domain::dto::auth::{LoginForm, OAuthCallbackQuery, RegisterForm};
use crate::domain::entities::users::user::User;
use crate::errors::errors::AppError;
use crate::handlers::redirect_to;
use crate::middlewares::extract_session_id;
use crate::services::auth::{GoogleAuthService, SessionService};
use crate::services::users::user_service::UserService;

/// 로컬 회원가입 핸들러
///
/// 폼 검증과 계정 생성을 수행합니다. 중복 사용자명을 포함한 모든 실패는
/// 회원가입 폼으로 돌려보내며 두 번째 레코드를 생성하지 않습니다.
///
/// # Endpoint
/// `POST /register`
#[post("/register")]
pub async fn register(form: web::Form<RegisterForm>) -> Result<HttpResponse, AppError> {
    let form = form.into_inner();

    if let Err(e) = form.validate() {
        log::warn!("회원가입 검증 실패 - 사용자: {}, 에러: {}", form.username, e);
        return Ok(redirect_to("/register"));
    }

    let user_service = UserService::instance();

    match user_service.register_local(form).await {
        Ok(user) => establish_session(user).await,
        Err(e) => {
            // 중복 가입을 포함한 실패는 폼으로 복귀 (원인은 로그에만 남긴다)
            log::warn!("회원가입 실패: {}", e);
            Ok(redirect_to("/register"))
        }
    }
}

/// 로컬 로그인 핸들러
///
/// 이메일과 패스워드를 사용한 전통적인 로그인을 처리합니다.
/// 자격 증명 불일치는 로그인 폼으로의 리다이렉트로 응답하며,
/// 실패 원인은 HTTP 레벨에서 구분되지 않습니다.
///
/// # Endpoint
/// `POST /login`
#[post("/login")]
pub async fn login(form: web::Form<LoginForm>) -> Result<HttpResponse, AppError> {
    let user_service = UserService::instance();

    match user_service
        .verify_credentials(&form.username, &form.password)
        .await
    {
        Ok(user) => {
            log::info!("로컬 로그인 성공: {}", user.username);
            establish_session(user).await
        }
        Err(e) => {
            log::warn!("로컬 로그인 실패 - 사용자: {}, 에러: {}", form.username, e);
            Ok(redirect_to("/login"))
        }
    }
}

/// 로그아웃 핸들러
///
/// Redis 세션을 파기하고 세션 쿠키를 제거한 뒤 홈으로 리다이렉트합니다.
/// 세션이 없는 요청도 동일하게 홈으로 보냅니다.
///
/// # Endpoint
/// `GET /logout`
#[get("/logout")]
pub async fn logout(req: HttpRequest) -> Result<HttpResponse, AppError> {
    if let Some(session_id) = extract_session_id(req.headers(), &SessionConfig::cookie_name()) {
        let session_service = SessionService::instance();

        if let Err(e) = session_service.destroy(&session_id).await {
            // 세션 저장소 장애 시에도 쿠키 제거와 리다이렉트는 수행한다
            log::warn!("세션 파기 실패: {}", e);
        }
    }

    Ok(HttpResponse::Found()
        .append_header((actix_web::http::header::LOCATION, "/"))
        .cookie(SessionService::removal_cookie())
        .finish())
}

/// Google OAuth 시작 핸들러
///
/// state를 생성/저장한 뒤 사용자를 Google 인증 페이지로 리다이렉트합니다.
///
/// # Endpoint
/// `GET /auth/google`
#[get("/auth/google")]
pub async fn google_login() -> Result<HttpResponse, AppError> {
    let google_service = GoogleAuthService::instance();

    match google_service.authorize_url().await {
        Ok(url) => Ok(redirect_to(&url)),
        Err(e) => {
            log::error!("Google 인증 URL 생성 실패: {}", e);
            Ok(redirect_to("/login"))
        }
    }
}

/// Google OAuth 콜백 처리 핸들러
///
/// 인증 성공 시 세션을 발급하고 시크릿 목록으로 리다이렉트합니다.
/// 프로바이더 측 에러, state 검증 실패, 계정 충돌 등 모든 실패는
/// 로그인 폼으로 리다이렉트됩니다.
///
/// # Endpoint
/// `GET /auth/google/secrets?code={code}&state={state}`
#[get("/auth/google/secrets")]
pub async fn google_callback(
    query: web::Query<OAuthCallbackQuery>,
) -> Result<HttpResponse, AppError> {
    // 에러 체크 (사용자가 거부했거나 프로바이더 측 에러 발생)
    if let Some(error) = &query.error {
        let error_msg = query
            .error_description
            .as_deref()
            .unwrap_or("OAuth 인증이 취소되었거나 실패했습니다");
        log::warn!("Google OAuth 에러: {} - {}", error, error_msg);
        return Ok(redirect_to("/login"));
    }

    // 유효성 검사
    if let Err(e) = query.validate() {
        log::warn!("Google OAuth 콜백 검증 실패: {}", e);
        return Ok(redirect_to("/login"));
    }

    let google_service = GoogleAuthService::instance();

    match google_service
        .authenticate_with_code(&query.code, &query.state)
        .await
    {
        Ok(user) => {
            log::info!("Google OAuth 로그인 성공: {}", user.username);
            establish_session(user).await
        }
        Err(e) => {
            log::warn!("Google OAuth 인증 실패: {}", e);
            Ok(redirect_to("/login"))
        }
    }
}

/// 인증된 사용자를 위한 세션을 발급하고 시크릿 목록으로 보냅니다.
///
/// 세션 저장 실패는 로그인 자체의 실패로 취급되어 로그인 폼으로 돌아갑니다.
async fn establish_session(user: User) -> Result<HttpResponse, AppError> {
    let session_service = SessionService::instance();

    match session_service.create(&user).await {
        Ok(session_id) => Ok(HttpResponse::Found()
            .append_header((actix_web::http::header::LOCATION, "/secrets"))
            .cookie(SessionService::build_cookie(session_id))
            .finish()),
        Err(e) => {
            log::error!("세션 생성 실패 - 사용자: {}, 에러: {}", user.username, e);
            Ok(redirect_to("/login"))
        }
    }
}
