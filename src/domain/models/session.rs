//! 세션 모델
//!
//! Redis에 저장되는 세션 레코드와, 미들웨어가 요청 컨텍스트에 올려주는
//! 인증 주체(principal) 타입을 정의합니다.

use actix_web::{HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::config::AuthProvider;
use crate::domain::entities::users::user::User;

/// Redis에 저장되는 세션 레코드
///
/// 키는 `session:{sid}` 형태이며, 세션이 조회될 때마다 TTL이 갱신됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData {
    /// 세션 소유자의 사용자 ID (ObjectId 16진수 문자열)
    pub user_id: String,
    /// 세션을 생성한 인증 방식
    pub auth_provider: AuthProvider,
    /// 세션 생성 시각 (유닉스 타임스탬프, 초)
    pub created_at: i64,
}

/// 요청 컨텍스트의 인증 주체
///
/// 세션 미들웨어가 쿠키 → Redis 세션 → MongoDB 사용자 순으로 복원하여
/// request extensions에 저장합니다. 핸들러는 이 값의 존재 여부로
/// 인증 상태를 분기합니다.
#[derive(Debug, Clone)]
pub struct SessionPrincipal {
    /// 현재 세션 ID
    pub session_id: String,
    /// 세션에 연결된 전체 사용자 레코드
    pub user: User,
}

impl SessionPrincipal {
    /// 요청 extensions에서 인증 주체를 꺼냅니다.
    ///
    /// 세션 미들웨어가 주체를 복원하지 못한 요청(비로그인)에서는 `None`을 반환합니다.
    pub fn from_request(req: &HttpRequest) -> Option<SessionPrincipal> {
        req.extensions().get::<SessionPrincipal>().cloned()
    }

    /// 주체의 사용자 ID를 반환합니다.
    pub fn user_id(&self) -> Option<String> {
        self.user.id_string()
    }
}

/// 요청이 인증된 세션을 가지고 있는지 확인합니다.
///
/// 원본 프레임워크의 `req.isAuthenticated()`에 해당하는 술어입니다.
pub fn is_authenticated(req: &HttpRequest) -> bool {
    req.extensions().get::<SessionPrincipal>().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_data_roundtrip() {
        // Redis에는 JSON 문자열로 저장되므로 직렬화 왕복이 보장되어야 한다
        let data = SessionData {
            user_id: "507f1f77bcf86cd799439011".to_string(),
            auth_provider: AuthProvider::Google,
            created_at: 1_754_000_000,
        };

        let json = serde_json::to_string(&data).unwrap();
        let parsed: SessionData = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.user_id, data.user_id);
        assert_eq!(parsed.auth_provider, AuthProvider::Google);
        assert_eq!(parsed.created_at, data.created_at);
    }
}
