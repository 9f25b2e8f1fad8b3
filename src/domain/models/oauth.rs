//! Google OAuth 2.0 와이어 모델
//!
//! Google 토큰/UserInfo 엔드포인트 응답의 역직렬화 타입들입니다.

use serde::Deserialize;

/// Google 토큰 교환 응답
///
/// `POST https://oauth2.googleapis.com/token` 의 성공 응답입니다.
/// 이 애플리케이션은 access_token만 사용하며, 나머지 필드는
/// 응답 형식 호환을 위해 보존합니다.
#[derive(Debug, Deserialize)]
pub struct GoogleTokenResponse {
    /// UserInfo API 호출에 사용되는 액세스 토큰
    pub access_token: String,
    /// 토큰 만료 시간 (초)
    #[serde(default)]
    pub expires_in: Option<i64>,
    /// 토큰 타입 (항상 "Bearer")
    #[serde(default)]
    pub token_type: Option<String>,
    /// 허가된 스코프
    #[serde(default)]
    pub scope: Option<String>,
    /// OpenID Connect ID 토큰
    #[serde(default)]
    pub id_token: Option<String>,
}

/// Google UserInfo v3 응답
///
/// `GET https://www.googleapis.com/oauth2/v3/userinfo` 의 응답으로,
/// OpenID Connect 표준 클레임을 따릅니다. `sub`가 계정 연동 키입니다.
#[derive(Debug, Deserialize)]
pub struct GoogleUserInfo {
    /// Google 계정의 고유 subject id
    pub sub: String,
    /// 사용자 이메일 주소 (로그인 식별자로 사용)
    pub email: String,
    /// 이메일 인증 여부
    #[serde(default)]
    pub email_verified: Option<bool>,
    /// 표시 이름
    #[serde(default)]
    pub name: Option<String>,
    /// 이름
    #[serde(default)]
    pub given_name: Option<String>,
    /// 프로필 사진 URL
    #[serde(default)]
    pub picture: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_token_response() {
        let json = r#"{
            "access_token": "ya29.a0AfH6SMC",
            "expires_in": 3599,
            "scope": "openid email profile",
            "token_type": "Bearer",
            "id_token": "eyJhbGciOiJSUzI1NiIs"
        }"#;

        let token: GoogleTokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(token.access_token, "ya29.a0AfH6SMC");
        assert_eq!(token.expires_in, Some(3599));
        assert_eq!(token.token_type.as_deref(), Some("Bearer"));
    }

    #[test]
    fn test_parse_userinfo_v3() {
        let json = r#"{
            "sub": "110169484474386276334",
            "email": "annabelle@gmail.com",
            "email_verified": true,
            "name": "Annabelle Sun",
            "given_name": "Annabelle",
            "picture": "https://lh3.googleusercontent.com/a/photo.jpg"
        }"#;

        let info: GoogleUserInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.sub, "110169484474386276334");
        assert_eq!(info.email, "annabelle@gmail.com");
        assert_eq!(info.email_verified, Some(true));
    }

    #[test]
    fn test_parse_userinfo_minimal_fields() {
        // email 스코프만 허가된 경우에도 역직렬화가 가능해야 한다
        let json = r#"{"sub": "123", "email": "min@gmail.com"}"#;

        let info: GoogleUserInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.sub, "123");
        assert!(info.name.is_none());
        assert!(info.picture.is_none());
    }
}
