//! # Google OAuth 2.0 인증 서비스
//!
//! Google OAuth 2.0 프로토콜을 통한 소셜 로그인 기능을 제공합니다.
//! RFC 6749 Authorization Code Grant 플로우를 따릅니다.
//!
//! ## OAuth 2.0 Authorization Code Flow
//!
//! ```text
//! ┌──────────┐                 ┌────────────┐                  ┌──────────────┐
//! │ 브라우저  │                 │  우리 서버  │                  │ Google OAuth │
//! └──────────┘                 └────────────┘                  └──────────────┘
//!      │  1. GET /auth/google        │                                │
//!      ├────────────────────────────►│ 2. state 생성 + Redis 저장      │
//!      │  3. 302 → Google 인증 페이지 │                                │
//!      │◄────────────────────────────┤                                │
//!      │  4. 사용자 인증/동의          │                                │
//!      ├────────────────────────────────────────────────────────────►│
//!      │  5. 302 → /auth/google/secrets?code=..&state=..              │
//!      │◄────────────────────────────────────────────────────────────┤
//!      ├────────────────────────────►│ 6. state 검증 (일회성 소모)      │
//!      │                             │ 7. code → access_token 교환     │
//!      │                             ├───────────────────────────────►│
//!      │                             │ 8. UserInfo 조회                │
//!      │                             ├───────────────────────────────►│
//!      │                             │ 9. find-or-create (google_id)  │
//!      │ 10. 세션 쿠키 + 302 /secrets │                                │
//!      │◄────────────────────────────┤                                │
//! ```
//!
//! ## 보안 특징
//!
//! - **State 매개변수**: SHA-256 기반 임의값을 Redis에 저장하고
//!   콜백에서 일회성으로 소모하여 CSRF를 방지합니다
//! - **Code 즉시 교환**: Authorization Code는 수신 즉시 토큰으로 교환합니다
//! - **에러 정보 제한**: 실패 원인은 로그에만 남기고 사용자에게는
//!   로그인 폼으로의 리다이렉트만 노출합니다

use sha2::{Digest, Sha256};
use std::sync::Arc;
use uuid::Uuid;

use singleton_macro::service;

use crate::{
    caching::redis::RedisClient,
    config::{GoogleOAuthConfig, OAuthConfig},
    domain::entities::users::user::User,
    domain::models::oauth::{GoogleTokenResponse, GoogleUserInfo},
    repositories::users::user_repo::UserRepository,
};
use crate::errors::errors::{AppError, AppResult};

/// Google OAuth 2.0 인증 서비스
///
/// 인증 URL 생성부터 콜백 처리, 계정 find-or-create까지의
/// 전체 소셜 로그인 플로우를 관리합니다.
///
/// ## 설정 의존성
///
/// ```bash
/// GOOGLE_CLIENT_ID=your-client-id.googleusercontent.com
/// GOOGLE_CLIENT_SECRET=your-client-secret
/// GOOGLE_REDIRECT_URI=https://yourapp.com/auth/google/secrets
/// OAUTH_STATE_SECRET=your-state-secret
/// ```
#[service(name = "googleauth")]
pub struct GoogleAuthService {
    /// 사용자 리포지토리
    ///
    /// Google 인증 성공 후 계정 조회/생성을 담당합니다.
    user_repo: Arc<UserRepository>,

    /// Redis 클라이언트
    ///
    /// OAuth state의 임시 저장과 일회성 검증에 사용됩니다.
    redis: Arc<RedisClient>,
}

impl GoogleAuthService {
    /// Google OAuth 인증 URL 생성
    ///
    /// 사용자를 Google 인증 페이지로 리다이렉트하기 위한 Authorization URL을
    /// 생성합니다. 생성된 state는 Redis에 짧은 TTL로 저장되어
    /// 콜백 시 일회성으로 검증됩니다.
    ///
    /// # 반환값
    ///
    /// * `Ok(String)` - 리다이렉트할 인증 URL
    /// * `Err(AppError::InternalError)` - state 생성 실패
    /// * `Err(AppError::RedisError)` - state 저장 실패
    pub async fn authorize_url(&self) -> AppResult<String> {
        let state = Self::generate_oauth_state()?;

        self.redis
            .set_with_expiry(
                &Self::state_key(&state),
                &1_u8,
                OAuthConfig::state_timeout_seconds() as usize,
            )
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))?;

        Ok(Self::build_authorize_url(&state))
    }

    /// state 값으로부터 인증 URL을 구성합니다.
    ///
    /// # 생성되는 URL 구조
    ///
    /// ```text
    /// https://accounts.google.com/o/oauth2/auth?
    ///   client_id=YOUR_CLIENT_ID&
    ///   redirect_uri=https://yourapp.com/auth/google/secrets&
    ///   scope=openid%20email%20profile&
    ///   response_type=code&
    ///   state=CSRF_PROTECTION_VALUE
    /// ```
    pub fn build_authorize_url(state: &str) -> String {
        let params = [
            ("client_id", GoogleOAuthConfig::client_id()),
            ("redirect_uri", GoogleOAuthConfig::redirect_uri()),
            ("scope", "openid email profile".to_string()),
            ("response_type", "code".to_string()),
            ("state", state.to_string()),
        ];

        let query_string = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}?{}", GoogleOAuthConfig::auth_uri(), query_string)
    }

    /// Authorization Code를 사용하여 사용자 인증 및 계정 처리
    ///
    /// Google OAuth 콜백에서 받은 Authorization Code를 처리하여
    /// 인증을 완료하고 계정 생성 또는 로그인을 수행합니다.
    ///
    /// # 처리 단계
    ///
    /// 1. **State 검증**: Redis에 저장된 state를 일회성으로 소모
    /// 2. **토큰 교환**: Authorization Code → Access Token
    /// 3. **사용자 정보 조회**: UserInfo v3 엔드포인트에서 프로필 획득
    /// 4. **find-or-create**: `google_id`(sub)로 기존 계정 조회, 없으면 생성
    ///
    /// # 반환값
    ///
    /// * `Ok(User)` - 인증된 사용자 엔티티
    /// * `Err(AppError::AuthenticationError)` - state 검증 실패
    /// * `Err(AppError::ConflictError)` - 같은 이메일의 로컬 계정 존재
    /// * `Err(AppError::ExternalServiceError)` - Google API 통신 오류
    pub async fn authenticate_with_code(&self, auth_code: &str, state: &str) -> AppResult<User> {
        // 1. State 검증
        self.verify_oauth_state(state).await?;

        // 2. Authorization code로 액세스 토큰 교환
        let token_response = self.exchange_code_for_token(auth_code).await?;

        // 3. 액세스 토큰으로 사용자 정보 조회
        let google_user = self.fetch_user_info(&token_response.access_token).await?;

        // 4. google_id 기준 find-or-create
        self.find_or_create_user(google_user).await
    }

    /// Authorization Code를 Access Token으로 교환
    ///
    /// OAuth 2.0 토큰 엔드포인트에 `application/x-www-form-urlencoded`
    /// POST 요청을 보냅니다. 교환된 토큰은 후속 UserInfo 호출에 사용됩니다.
    async fn exchange_code_for_token(&self, auth_code: &str) -> AppResult<GoogleTokenResponse> {
        let client = reqwest::Client::new();

        let params = [
            ("code", auth_code),
            ("client_id", &GoogleOAuthConfig::client_id()),
            ("client_secret", &GoogleOAuthConfig::client_secret()),
            ("redirect_uri", &GoogleOAuthConfig::redirect_uri()),
            ("grant_type", "authorization_code"),
        ];

        let response = client
            .post(GoogleOAuthConfig::token_uri())
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Google 토큰 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "Google 토큰 교환 실패: {}",
                error_text
            )));
        }

        response
            .json::<GoogleTokenResponse>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Google 토큰 응답 파싱 실패: {}", e)))
    }

    /// Access Token으로 Google 사용자 정보 조회
    ///
    /// UserInfo v3 엔드포인트를 호출하여 인증된 사용자의
    /// OpenID Connect 프로필을 가져옵니다.
    async fn fetch_user_info(&self, access_token: &str) -> AppResult<GoogleUserInfo> {
        let client = reqwest::Client::new();

        let response = client
            .get(GoogleOAuthConfig::userinfo_uri())
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!("Google 사용자 정보 요청 실패: {}", e))
            })?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "Google 사용자 정보 조회 실패: {}",
                error_text
            )));
        }

        response
            .json::<GoogleUserInfo>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Google 사용자 정보 파싱 실패: {}", e)))
    }

    /// Google 프로필로 계정 find-or-create
    ///
    /// `google_id`(sub)로 기존 계정을 조회하고, 없으면 프로필 이메일을
    /// 사용자명으로 하는 새 계정을 생성합니다. 같은 이메일의 로컬 계정이
    /// 이미 존재하면 유니크 제약에 의해 `ConflictError`가 반환되고,
    /// 콜백 핸들러는 이를 로그인 실패로 처리합니다.
    async fn find_or_create_user(&self, google_user: GoogleUserInfo) -> AppResult<User> {
        if let Some(existing) = self.user_repo.find_by_google_id(&google_user.sub).await? {
            log::info!("Google 사용자 로그인: {}", existing.username);
            return Ok(existing);
        }

        log::info!("새 Google 사용자 등록: {}", google_user.email);

        let user = User::new_google(google_user.email, google_user.sub);
        self.user_repo.create(user).await
    }

    /// OAuth State 매개변수 생성
    ///
    /// 타임스탬프, 임의 nonce, 서버 시크릿을 결합한 값의 SHA-256 해시를
    /// 16진수 문자열로 반환합니다.
    ///
    /// ```text
    /// state = hex(sha256("timestamp:nonce:secret"))
    /// ```
    fn generate_oauth_state() -> AppResult<String> {
        use std::time::{SystemTime, UNIX_EPOCH};

        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| AppError::InternalError(format!("시간 계산 실패: {}", e)))?
            .as_secs();

        let nonce = Uuid::new_v4().simple().to_string();
        let state_data = format!("{}:{}:{}", timestamp, nonce, OAuthConfig::state_secret());

        let digest = Sha256::digest(state_data.as_bytes());
        let state = digest
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect::<String>();

        Ok(state)
    }

    /// OAuth State 매개변수 검증 (일회성 소모)
    ///
    /// Redis에 저장된 state를 확인하고 즉시 삭제하여
    /// 재사용과 CSRF 공격을 방지합니다.
    async fn verify_oauth_state(&self, state: &str) -> AppResult<()> {
        if state.is_empty() {
            return Err(AppError::AuthenticationError(
                "유효하지 않은 OAuth state".to_string(),
            ));
        }

        let key = Self::state_key(state);

        let stored: Option<u8> = self
            .redis
            .get(&key)
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))?;

        if stored.is_none() {
            return Err(AppError::AuthenticationError(
                "만료되었거나 알 수 없는 OAuth state".to_string(),
            ));
        }

        // 일회성 보장: 검증 즉시 삭제
        let _ = self.redis.del(&key).await;

        Ok(())
    }

    /// state 값의 Redis 키를 반환합니다.
    fn state_key(state: &str) -> String {
        format!("oauth:state:{}", state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_google_env() {
        unsafe {
            std::env::set_var("GOOGLE_CLIENT_ID", "test-client-id");
            std::env::set_var("GOOGLE_CLIENT_SECRET", "test-client-secret");
            std::env::set_var(
                "GOOGLE_REDIRECT_URI",
                "http://localhost:8080/auth/google/secrets",
            );
        }
    }

    #[test]
    fn test_build_authorize_url_contains_required_params() {
        set_google_env();

        let url = GoogleAuthService::build_authorize_url("deadbeef");

        assert!(url.starts_with("https://accounts.google.com/o/oauth2/auth?"));
        assert!(url.contains("client_id=test-client-id"));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("state=deadbeef"));
        // 스코프는 URL 인코딩되어야 한다
        assert!(url.contains("scope=openid%20email%20profile"));
        assert!(url.contains(
            "redirect_uri=http%3A%2F%2Flocalhost%3A8080%2Fauth%2Fgoogle%2Fsecrets"
        ));
    }

    #[test]
    fn test_generate_oauth_state_is_hex_sha256() {
        let state = GoogleAuthService::generate_oauth_state().unwrap();

        assert_eq!(state.len(), 64);
        assert!(state.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_generate_oauth_state_is_unique_per_call() {
        let a = GoogleAuthService::generate_oauth_state().unwrap();
        let b = GoogleAuthService::generate_oauth_state().unwrap();

        assert_ne!(a, b);
    }

    #[test]
    fn test_state_key_format() {
        assert_eq!(
            GoogleAuthService::state_key("abc"),
            "oauth:state:abc".to_string()
        );
    }
}
