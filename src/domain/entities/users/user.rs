//! User Entity Implementation
//!
//! 사용자 엔티티의 핵심 구현체입니다.
//! 로컬 인증과 Google OAuth 인증을 모두 지원하는 통합된 사용자 모델이며,
//! 사용자가 공유한 시크릿 한 건을 함께 보관합니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::config::AuthProvider;

/// 사용자 엔티티
///
/// 시스템의 모든 사용자를 표현하는 핵심 도메인 엔티티입니다.
/// 로컬 인증(이메일/패스워드)과 Google OAuth 인증을 모두 지원합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 로그인 식별자 (이메일 주소, unique)
    pub username: String,
    /// bcrypt 해시된 비밀번호 (OAuth 사용자의 경우 None)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    /// 인증 프로바이더
    pub auth_provider: AuthProvider,
    /// Google OAuth subject id (로컬 사용자의 경우 None)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_id: Option<String>,
    /// 사용자가 공유한 시크릿 (제출 전에는 None, 제출 시마다 덮어씀)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    /// 생성 시간
    pub created_at: DateTime,
    /// 수정 시간
    pub updated_at: DateTime,
}

impl User {
    /// 새 로컬 사용자 생성 (이메일/패스워드)
    ///
    /// 로컬 인증용 사용자를 생성합니다. 시크릿은 비어 있는 상태로 시작됩니다.
    pub fn new_local(username: String, password_hash: String) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            username,
            password_hash: Some(password_hash),
            auth_provider: AuthProvider::Local,
            google_id: None,
            secret: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// 새 Google OAuth 사용자 생성
    ///
    /// Google 프로필의 이메일을 로그인 식별자로 사용하며,
    /// 비밀번호 없이 생성됩니다.
    pub fn new_google(username: String, google_id: String) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            username,
            password_hash: None, // OAuth 사용자는 비밀번호 없음
            auth_provider: AuthProvider::Google,
            google_id: Some(google_id),
            secret: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// ID 문자열로 변환
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    /// 로컬 인증 사용자인지 확인
    pub fn is_local_auth(&self) -> bool {
        matches!(self.auth_provider, AuthProvider::Local)
    }

    /// 비밀번호 인증이 가능한 사용자인지 확인
    pub fn can_authenticate_with_password(&self) -> bool {
        self.is_local_auth() && self.password_hash.is_some()
    }

    /// 공유한 시크릿이 있는지 확인
    ///
    /// 시크릿 목록 페이지에는 이 값이 true인 사용자만 나타납니다.
    pub fn has_secret(&self) -> bool {
        self.secret.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_local_user() {
        let user = User::new_local("alice@example.com".to_string(), "$2b$04$hash".to_string());

        assert_eq!(user.username, "alice@example.com");
        assert_eq!(user.auth_provider, AuthProvider::Local);
        assert!(user.password_hash.is_some());
        assert!(user.google_id.is_none());
        assert!(user.id.is_none());
        assert!(!user.has_secret());
        assert!(user.can_authenticate_with_password());
    }

    #[test]
    fn test_new_google_user() {
        let user = User::new_google("bob@gmail.com".to_string(), "1234567890".to_string());

        assert_eq!(user.username, "bob@gmail.com");
        assert_eq!(user.auth_provider, AuthProvider::Google);
        assert!(user.password_hash.is_none());
        assert_eq!(user.google_id.as_deref(), Some("1234567890"));
        assert!(!user.is_local_auth());
        assert!(!user.can_authenticate_with_password());
    }

    #[test]
    fn test_has_secret() {
        let mut user = User::new_local("carol@example.com".to_string(), "hash".to_string());
        assert!(!user.has_secret());

        user.secret = Some("나만 아는 이야기".to_string());
        assert!(user.has_secret());
    }

    #[test]
    fn test_id_string() {
        let mut user = User::new_local("dave@example.com".to_string(), "hash".to_string());
        assert!(user.id_string().is_none());

        let oid = ObjectId::new();
        user.id = Some(oid);
        assert_eq!(user.id_string(), Some(oid.to_hex()));
    }
}
