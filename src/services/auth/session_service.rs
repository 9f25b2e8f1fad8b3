//! 세션 관리 서비스 구현
//!
//! Redis 기반 서버 사이드 세션을 제공합니다.
//! 세션 ID는 HttpOnly 쿠키로 브라우저에 전달되고,
//! 세션 레코드는 `session:{sid}` 키로 Redis에 저장됩니다.
//!
//! ```text
//! 로그인 성공
//!     │
//!     ▼
//! UUID 세션 ID 생성 ──► Redis 저장 (TTL) ──► Set-Cookie: sid=...
//!
//! 이후 요청
//!     │
//!     ▼
//! Cookie: sid=... ──► Redis 조회 (TTL 갱신) ──► 사용자 로드
//! ```

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use singleton_macro::service;

use crate::{
    caching::redis::RedisClient,
    config::SessionConfig,
    domain::entities::users::user::User,
    domain::models::session::SessionData,
};
use crate::errors::errors::{AppError, AppResult};

/// 세션 관리 서비스
///
/// 세션 레코드의 발급/해석/파기와 세션 쿠키 구성을 담당합니다.
/// `#[service]` 매크로를 통해 싱글톤으로 관리되며,
/// RedisClient가 자동으로 주입됩니다.
#[service(name = "session")]
pub struct SessionService {
    /// Redis 세션 저장소
    redis: Arc<RedisClient>,
}

impl SessionService {
    /// 사용자를 위한 새 세션 생성
    ///
    /// UUIDv4 세션 ID를 생성하고 세션 레코드를 TTL과 함께 Redis에 저장합니다.
    ///
    /// # 반환값
    ///
    /// * `Ok(String)` - 생성된 세션 ID (쿠키 값으로 사용)
    /// * `Err(AppError::InternalError)` - 사용자 ID 없음
    /// * `Err(AppError::RedisError)` - 세션 저장 실패
    pub async fn create(&self, user: &User) -> AppResult<String> {
        let user_id = user
            .id_string()
            .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))?;

        let session_id = Uuid::new_v4().simple().to_string();

        let data = SessionData {
            user_id,
            auth_provider: user.auth_provider.clone(),
            created_at: Utc::now().timestamp(),
        };

        self.redis
            .set_with_expiry(
                &Self::session_key(&session_id),
                &data,
                SessionConfig::ttl_seconds() as usize,
            )
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))?;

        log::debug!("세션 생성: 사용자 {}", user.username);

        Ok(session_id)
    }

    /// 세션 ID로 세션 레코드 해석
    ///
    /// 세션이 존재하면 TTL을 갱신하여 슬라이딩 만료를 적용합니다.
    ///
    /// # 반환값
    ///
    /// * `Ok(Some(SessionData))` - 유효한 세션
    /// * `Ok(None)` - 만료되었거나 존재하지 않는 세션
    /// * `Err(AppError::RedisError)` - Redis 오류
    pub async fn resolve(&self, session_id: &str) -> AppResult<Option<SessionData>> {
        let key = Self::session_key(session_id);

        let data: Option<SessionData> = self
            .redis
            .get(&key)
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))?;

        // 슬라이딩 만료: 활동 중인 세션의 TTL을 갱신한다
        if let Some(ref data) = data {
            let _ = self
                .redis
                .set_with_expiry(&key, data, SessionConfig::ttl_seconds() as usize)
                .await;
        }

        Ok(data)
    }

    /// 세션 파기
    ///
    /// 로그아웃 시 Redis에서 세션 레코드를 제거합니다.
    /// 세션이 이미 만료된 경우에도 성공으로 처리됩니다.
    pub async fn destroy(&self, session_id: &str) -> AppResult<()> {
        self.redis
            .del(&Self::session_key(session_id))
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))
    }

    /// 세션 ID를 담는 쿠키를 구성합니다.
    ///
    /// HttpOnly + SameSite=Lax, 프로덕션 환경에서는 Secure가 적용됩니다.
    pub fn build_cookie(session_id: String) -> Cookie<'static> {
        Cookie::build(SessionConfig::cookie_name(), session_id)
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(SessionConfig::secure_cookie())
            .max_age(CookieDuration::seconds(SessionConfig::ttl_seconds() as i64))
            .finish()
    }

    /// 세션 쿠키를 제거하는 만료된 쿠키를 구성합니다.
    pub fn removal_cookie() -> Cookie<'static> {
        Cookie::build(SessionConfig::cookie_name(), "")
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(SessionConfig::secure_cookie())
            .max_age(CookieDuration::ZERO)
            .finish()
    }

    /// 세션 레코드의 Redis 키를 반환합니다.
    fn session_key(session_id: &str) -> String {
        format!("session:{}", session_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_key_format() {
        assert_eq!(
            SessionService::session_key("abc123"),
            "session:abc123".to_string()
        );
    }

    #[test]
    fn test_build_cookie_attributes() {
        let cookie = SessionService::build_cookie("deadbeef".to_string());

        assert_eq!(cookie.value(), "deadbeef");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    }

    #[test]
    fn test_removal_cookie_expires_immediately() {
        let cookie = SessionService::removal_cookie();

        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(CookieDuration::ZERO));
    }
}
