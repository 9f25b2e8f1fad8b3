//! # Authentication Configuration Module
//!
//! OAuth 프로바이더, 세션 쿠키 등 인증 관련 설정을 관리하는 모듈입니다.
//!
//! ## 지원하는 인증 방식
//!
//! 1. **로컬 인증**: 이메일/패스워드 기반 전통적인 인증
//! 2. **Google OAuth 2.0**: Google 계정을 통한 소셜 로그인
//! 3. **쿠키 세션**: Redis 기반 서버 사이드 세션
//!
//! ## 필수 환경 변수 설정
//!
//! ### Google OAuth 설정
//! ```bash
//! export GOOGLE_CLIENT_ID="your-google-client-id"
//! export GOOGLE_CLIENT_SECRET="your-google-client-secret"
//! export GOOGLE_REDIRECT_URI="http://localhost:8080/auth/google/secrets"
//! ```
//!
//! ### 세션/OAuth 보안 설정 (선택, 기본값 있음)
//! ```bash
//! export SESSION_COOKIE_NAME="sid"
//! export SESSION_TTL_SECONDS="604800"
//! export OAUTH_STATE_SECRET="your-oauth-state-secret"
//! export OAUTH_STATE_TIMEOUT_SECONDS="600"
//! ```

use serde::{Deserialize, Serialize};
use std::env;

use crate::config::data_config::Environment;

/// 사용자 계정의 인증 프로바이더
///
/// 계정이 어떤 방식으로 생성/인증되는지 나타냅니다.
/// MongoDB 문서와 Redis 세션 데이터에 소문자 문자열로 저장됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    /// 이메일/패스워드 로컬 계정
    Local,
    /// Google OAuth 2.0 계정
    Google,
}

impl AuthProvider {
    /// 문자열에서 AuthProvider를 생성합니다. 알 수 없는 값은 `Local`로 처리합니다.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "google" => AuthProvider::Google,
            _ => AuthProvider::Local,
        }
    }
}

impl std::fmt::Display for AuthProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthProvider::Local => write!(f, "local"),
            AuthProvider::Google => write!(f, "google"),
        }
    }
}

/// Google OAuth 2.0 설정을 관리하는 구조체
///
/// Google Cloud Console 에서 생성한 OAuth 2.0 클라이언트 정보를 관리합니다.
///
/// ## Google Cloud Console 설정 가이드
///
/// 1. [Google Cloud Console](https://console.cloud.google.com/) 접속
/// 2. APIs & Services > Credentials 에서 OAuth 2.0 Client ID 생성
/// 3. 승인된 리디렉션 URI 추가: `http://localhost:8080/auth/google/secrets`
///
/// ## 보안 고려사항
///
/// - `client_secret`은 절대 클라이언트 사이드에 노출되어서는 안 됩니다
/// - 프로덕션에서는 HTTPS redirect URI만 사용하세요
pub struct GoogleOAuthConfig;

impl GoogleOAuthConfig {
    /// Google OAuth Client ID를 반환합니다.
    ///
    /// # Panics
    ///
    /// `GOOGLE_CLIENT_ID` 환경 변수가 설정되지 않은 경우 패닉이 발생합니다.
    pub fn client_id() -> String {
        env::var("GOOGLE_CLIENT_ID").expect("GOOGLE_CLIENT_ID must be set")
    }

    /// Google OAuth Client Secret을 반환합니다.
    ///
    /// 서버 사이드에서만 사용되며, 토큰 교환 시 사용됩니다.
    /// 이 값을 로그에 출력하지 마세요.
    ///
    /// # Panics
    ///
    /// `GOOGLE_CLIENT_SECRET` 환경 변수가 설정되지 않은 경우 패닉이 발생합니다.
    pub fn client_secret() -> String {
        env::var("GOOGLE_CLIENT_SECRET").expect("GOOGLE_CLIENT_SECRET must be set")
    }

    /// OAuth 인증 완료 후 리디렉션될 콜백 URI를 반환합니다.
    ///
    /// Google Cloud Console의 승인된 리디렉션 URI 목록에 등록되어 있어야 합니다.
    /// 기본값은 로컬 개발용 콜백 주소입니다.
    pub fn redirect_uri() -> String {
        env::var("GOOGLE_REDIRECT_URI")
            .unwrap_or_else(|_| "http://localhost:8080/auth/google/secrets".to_string())
    }

    /// Google Authorization 엔드포인트 URI를 반환합니다.
    pub fn auth_uri() -> String {
        env::var("GOOGLE_AUTH_URI")
            .unwrap_or_else(|_| "https://accounts.google.com/o/oauth2/auth".to_string())
    }

    /// Google 토큰 교환 엔드포인트 URI를 반환합니다.
    pub fn token_uri() -> String {
        env::var("GOOGLE_TOKEN_URI")
            .unwrap_or_else(|_| "https://oauth2.googleapis.com/token".to_string())
    }

    /// Google UserInfo 엔드포인트 URI를 반환합니다.
    ///
    /// v3 엔드포인트는 OpenID Connect 표준 필드(`sub`, `email`, `name` 등)를
    /// 반환합니다.
    pub fn userinfo_uri() -> String {
        env::var("GOOGLE_USERINFO_URI")
            .unwrap_or_else(|_| "https://www.googleapis.com/oauth2/v3/userinfo".to_string())
    }
}

/// OAuth 공통 보안 설정
///
/// CSRF 방지용 state 매개변수의 생성/만료 정책을 관리합니다.
pub struct OAuthConfig;

impl OAuthConfig {
    /// state 생성에 사용되는 시크릿을 반환합니다.
    ///
    /// 프로덕션에서는 반드시 `OAUTH_STATE_SECRET` 환경 변수를 설정하세요.
    pub fn state_secret() -> String {
        env::var("OAUTH_STATE_SECRET").unwrap_or_else(|_| "dev-oauth-state-secret".to_string())
    }

    /// state 값의 유효 시간(초)을 반환합니다. 기본값: 600초 (10분)
    pub fn state_timeout_seconds() -> u64 {
        env::var("OAUTH_STATE_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(600)
    }
}

/// 세션 쿠키 설정
///
/// 서버 사이드 세션(Redis)과 브라우저 쿠키 사이의 연결 정책을 관리합니다.
pub struct SessionConfig;

impl SessionConfig {
    /// 세션 쿠키 이름을 반환합니다. 기본값: "sid"
    pub fn cookie_name() -> String {
        env::var("SESSION_COOKIE_NAME").unwrap_or_else(|_| "sid".to_string())
    }

    /// 세션 유효 시간(초)을 반환합니다. 기본값: 604800초 (7일)
    ///
    /// 세션이 조회될 때마다 만료 시간이 갱신되는 슬라이딩 방식입니다.
    pub fn ttl_seconds() -> u64 {
        env::var("SESSION_TTL_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(60 * 60 * 24 * 7)
    }

    /// Secure 쿠키 플래그 사용 여부를 반환합니다.
    ///
    /// 프로덕션/스테이징 환경에서는 HTTPS 전용 쿠키를 강제합니다.
    pub fn secure_cookie() -> bool {
        matches!(
            Environment::current(),
            Environment::Production | Environment::Staging
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_provider_from_str() {
        assert_eq!(AuthProvider::from_str("google"), AuthProvider::Google);
        assert_eq!(AuthProvider::from_str("Google"), AuthProvider::Google);
        assert_eq!(AuthProvider::from_str("local"), AuthProvider::Local);
        assert_eq!(AuthProvider::from_str("unknown"), AuthProvider::Local);
    }

    #[test]
    fn test_auth_provider_display() {
        assert_eq!(AuthProvider::Local.to_string(), "local");
        assert_eq!(AuthProvider::Google.to_string(), "google");
    }

    #[test]
    fn test_auth_provider_serde_roundtrip() {
        let json = serde_json::to_string(&AuthProvider::Google).unwrap();
        assert_eq!(json, "\"google\"");

        let parsed: AuthProvider = serde_json::from_str("\"local\"").unwrap();
        assert_eq!(parsed, AuthProvider::Local);
    }

    #[test]
    fn test_session_config_defaults() {
        // 환경 변수 미설정 시 기본값 확인
        if env::var("SESSION_COOKIE_NAME").is_err() {
            assert_eq!(SessionConfig::cookie_name(), "sid");
        }
        if env::var("SESSION_TTL_SECONDS").is_err() {
            assert_eq!(SessionConfig::ttl_seconds(), 604800);
        }
    }

    #[test]
    fn test_oauth_state_timeout_default() {
        if env::var("OAUTH_STATE_TIMEOUT_SECONDS").is_err() {
            assert_eq!(OAuthConfig::state_timeout_seconds(), 600);
        }
    }
}
