//! SessionMiddleware 세션 복원 로직의 핵심적인 기능

use std::rc::Rc;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::http::header::HeaderMap;
use actix_web::{Error, HttpMessage};
use futures_util::future::LocalBoxFuture;

use crate::config::SessionConfig;
use crate::domain::models::session::SessionPrincipal;
use crate::errors::errors::AppError;
use crate::repositories::users::user_repo::UserRepository;
use crate::services::auth::SessionService;

/// 실제 세션 복원 로직을 수행하는 서비스
pub struct SessionMiddlewareService<S> {
    pub service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for SessionMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        Box::pin(async move {
            let cookie_name = SessionConfig::cookie_name();

            if let Some(session_id) = extract_session_id(req.headers(), &cookie_name) {
                // 세션 복원 실패는 비로그인과 동일하게 취급하고 요청을 계속 진행한다
                match restore_principal(&session_id).await {
                    Ok(Some(principal)) => {
                        log::debug!("세션 복원 성공: 사용자 {}", principal.user.username);
                        req.extensions_mut().insert(principal);
                    }
                    Ok(None) => {
                        log::debug!("세션 없음 또는 만료: {}", session_id);
                    }
                    Err(err) => {
                        log::debug!("세션 복원 실패: {}", err);
                    }
                }
            }

            service.call(req).await
        })
    }
}

/// Cookie 헤더에서 세션 ID를 추출합니다.
///
/// 세션 쿠키가 없거나 값이 비어 있으면 `None`을 반환합니다.
pub fn extract_session_id(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let cookie_header = headers.get("Cookie")?;
    let cookie_str = cookie_header.to_str().ok()?;

    for cookie_pair in cookie_str.split(';') {
        let cookie_pair = cookie_pair.trim();
        if let Some((name, value)) = cookie_pair.split_once('=') {
            if name.trim() == cookie_name {
                let session_id = value.trim();
                if !session_id.is_empty() {
                    return Some(session_id.to_string());
                }
            }
        }
    }

    None
}

/// 세션 ID로부터 인증 주체를 복원합니다.
///
/// Redis 세션을 해석한 뒤, 세션에 기록된 사용자 ID로 전체 사용자
/// 레코드를 로드합니다. 세션은 있는데 사용자가 삭제된 경우는
/// 비로그인으로 처리됩니다.
async fn restore_principal(session_id: &str) -> Result<Option<SessionPrincipal>, AppError> {
    let session_service = SessionService::instance();
    let user_repo = UserRepository::instance();

    let Some(session) = session_service.resolve(session_id).await? else {
        return Ok(None);
    };

    let Some(user) = user_repo.find_by_id(&session.user_id).await? else {
        return Ok(None);
    };

    Ok(Some(SessionPrincipal {
        session_id: session_id.to_string(),
        user,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::header::{HeaderMap, HeaderName, HeaderValue};

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("cookie"),
            HeaderValue::from_str(value).unwrap(),
        );
        headers
    }

    #[test]
    fn test_extract_session_id_single_cookie() {
        let headers = headers_with_cookie("sid=abc123");

        assert_eq!(extract_session_id(&headers, "sid"), Some("abc123".to_string()));
    }

    #[test]
    fn test_extract_session_id_among_multiple_cookies() {
        let headers = headers_with_cookie("theme=dark; sid=abc123; lang=ko");

        assert_eq!(extract_session_id(&headers, "sid"), Some("abc123".to_string()));
    }

    #[test]
    fn test_extract_session_id_missing_cookie() {
        let headers = headers_with_cookie("theme=dark");

        assert_eq!(extract_session_id(&headers, "sid"), None);
    }

    #[test]
    fn test_extract_session_id_empty_value() {
        let headers = headers_with_cookie("sid=");

        assert_eq!(extract_session_id(&headers, "sid"), None);
    }

    #[test]
    fn test_extract_session_id_no_cookie_header() {
        let headers = HeaderMap::new();

        assert_eq!(extract_session_id(&headers, "sid"), None);
    }
}
