//! Secrets HTTP Handlers
//!
//! 시크릿 목록 조회와 제출을 처리하는 핸들러 함수들입니다.
//! 목록은 누구나 볼 수 있고, 제출은 인증된 세션이 필요합니다.

use actix_web::{get, post, web, HttpRequest, HttpResponse};

use crate::domain::dto::secrets::SubmitSecretForm;
use crate::domain::models::session::{is_authenticated, SessionPrincipal};
use crate::errors::errors::AppError;
use crate::handlers::redirect_to;
use crate::services::secrets::secret_service::SecretService;
use crate::views::{render, SecretsTemplate, SubmitTemplate};

/// 시크릿 목록 페이지 핸들러
///
/// 시크릿을 제출한 모든 사용자의 시크릿을 익명으로 렌더링합니다.
/// 인증 없이 접근할 수 있습니다.
///
/// # Endpoint
/// `GET /secrets`
#[get("/secrets")]
pub async fn secrets_page() -> Result<HttpResponse, AppError> {
    let secret_service = SecretService::instance();

    let secrets = secret_service.list_shared_secrets().await?;

    render(SecretsTemplate { secrets })
}

/// 시크릿 제출 폼 페이지 핸들러
///
/// 인증된 세션이 있으면 제출 폼을 렌더링하고,
/// 없으면 로그인 폼으로 리다이렉트합니다.
///
/// # Endpoint
/// `GET /submit`
#[get("/submit")]
pub async fn submit_page(req: HttpRequest) -> Result<HttpResponse, AppError> {
    if is_authenticated(&req) {
        render(SubmitTemplate)
    } else {
        Ok(redirect_to("/login"))
    }
}

/// 시크릿 제출 핸들러
///
/// 현재 사용자의 시크릿을 제출된 문자열로 덮어쓰고
/// 시크릿 목록으로 리다이렉트합니다. 비로그인 요청은 로그인 폼으로 보냅니다.
///
/// # Endpoint
/// `POST /submit`
#[post("/submit")]
pub async fn submit_secret(
    req: HttpRequest,
    form: web::Form<SubmitSecretForm>,
) -> Result<HttpResponse, AppError> {
    let Some(principal) = SessionPrincipal::from_request(&req) else {
        return Ok(redirect_to("/login"));
    };

    let user_id = principal
        .user_id()
        .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))?;

    let secret_service = SecretService::instance();

    secret_service.submit_secret(&user_id, &form.secret).await?;

    Ok(redirect_to("/secrets"))
}
