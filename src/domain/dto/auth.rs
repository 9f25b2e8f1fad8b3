//! 인증 요청 DTO
//!
//! 회원가입/로그인 HTML 폼(`application/x-www-form-urlencoded`)과
//! Google OAuth 콜백 쿼리 스트링의 역직렬화 타입들입니다.

use serde::Deserialize;
use validator::Validate;

use crate::utils::string_utils::deserialize_optional_string;

/// 회원가입 폼 (`POST /register`)
///
/// 사용자명은 이메일 주소 형식이어야 하며, 비밀번호는 최소 8자입니다.
/// 검증 실패 시 핸들러는 회원가입 폼으로 리다이렉트합니다.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterForm {
    /// 로그인 식별자로 사용되는 이메일 주소
    #[validate(email(message = "올바른 이메일 형식이 아닙니다"))]
    pub username: String,
    /// 평문 비밀번호 (저장 전 bcrypt 해싱됨)
    #[validate(length(min = 8, message = "비밀번호는 8자 이상이어야 합니다"))]
    pub password: String,
}

/// 로그인 폼 (`POST /login`)
///
/// 검증 규칙 없음: 형식이 틀린 입력도 동일한 인증 실패 경로를 따릅니다.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Google OAuth 콜백 쿼리 (`GET /auth/google/secrets`)
///
/// 사용자가 인증을 거부하거나 프로바이더 측 오류가 발생하면
/// `code` 대신 `error`/`error_description`이 전달됩니다.
#[derive(Debug, Deserialize, Validate)]
pub struct OAuthCallbackQuery {
    /// Authorization Code (성공 시에만 존재)
    #[serde(default)]
    #[validate(length(min = 1, message = "authorization code가 없습니다"))]
    pub code: String,
    /// CSRF 방지용 state 매개변수
    #[serde(default)]
    #[validate(length(min = 1, message = "state 매개변수가 없습니다"))]
    pub state: String,
    /// 프로바이더 측 에러 코드
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub error: Option<String>,
    /// 프로바이더 측 에러 상세 설명
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub error_description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_form_valid() {
        let form = RegisterForm {
            username: "alice@example.com".to_string(),
            password: "supersecret1".to_string(),
        };

        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_register_form_rejects_non_email_username() {
        let form = RegisterForm {
            username: "not-an-email".to_string(),
            password: "supersecret1".to_string(),
        };

        assert!(form.validate().is_err());
    }

    #[test]
    fn test_register_form_rejects_short_password() {
        let form = RegisterForm {
            username: "alice@example.com".to_string(),
            password: "short".to_string(),
        };

        assert!(form.validate().is_err());
    }

    #[test]
    fn test_oauth_callback_query_success_case() {
        let json = r#"{"code": "4/abc", "state": "deadbeef"}"#;
        let query: OAuthCallbackQuery = serde_json::from_str(json).unwrap();

        assert!(query.validate().is_ok());
        assert!(query.error.is_none());
    }

    #[test]
    fn test_oauth_callback_query_error_case() {
        // 사용자가 동의 화면에서 거부한 경우: code가 없고 error만 존재
        let json = r#"{"error": "access_denied", "error_description": "  The user denied access  "}"#;
        let query: OAuthCallbackQuery = serde_json::from_str(json).unwrap();

        assert!(query.validate().is_err());
        assert_eq!(query.error.as_deref(), Some("access_denied"));
        assert_eq!(
            query.error_description.as_deref(),
            Some("The user denied access")
        );
    }

    #[test]
    fn test_oauth_callback_query_blank_error_is_none() {
        let json = r#"{"code": "4/abc", "state": "deadbeef", "error": "   "}"#;
        let query: OAuthCallbackQuery = serde_json::from_str(json).unwrap();

        assert!(query.error.is_none());
    }
}
