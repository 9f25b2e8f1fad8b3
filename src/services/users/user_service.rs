//! # 사용자 관리 서비스 구현
//!
//! 로컬 계정의 등록과 인증을 담당하는 비즈니스 로직을 구현합니다.
//!
//! ## 보안 설계 원칙
//!
//! ### 1. 비밀번호 보안 (Password Security)
//!
//! - **bcrypt 해싱**: 적응형 해시 함수로 무차별 대입 공격 방지
//! - **환경별 Cost**: 개발(4) vs 운영(12) 환경별 보안 강도
//! - **솔트 자동 생성**: 레인보우 테이블 공격 방지
//!
//! ### 2. 인증 보안 (Authentication Security)
//!
//! - **균일한 실패 응답**: 사용자 없음/비밀번호 불일치/OAuth 전용 계정을
//!   구분하지 않는 단일 인증 실패 에러
//! - **실패 로깅**: 인증 실패 시 보안 이벤트 기록은 핸들러에서 수행

use bcrypt::{hash, verify};
use std::sync::Arc;

use singleton_macro::service;

use crate::{
    config::PasswordConfig,
    domain::dto::auth::RegisterForm,
    domain::entities::users::user::User,
    repositories::users::user_repo::UserRepository,
};
use crate::errors::errors::{AppError, AppResult};
use crate::utils::string_utils::validate_required_string;

/// 사용자 관리 비즈니스 로직 서비스
///
/// 로컬 계정의 생성과 비밀번호 검증을 담당합니다.
/// `#[service]` 매크로를 통해 싱글톤으로 관리되며,
/// UserRepository가 자동으로 주입됩니다.
#[service(name = "user")]
pub struct UserService {
    /// 사용자 데이터 액세스 리포지토리
    ///
    /// 자동 의존성 주입을 통해 UserRepository 싱글톤이 주입됩니다.
    user_repo: Arc<UserRepository>,
}

impl UserService {
    /// 새 로컬 사용자 계정 생성
    ///
    /// 회원가입 폼을 받아 비밀번호를 해싱하고 사용자를 생성합니다.
    ///
    /// # 처리 과정
    ///
    /// 1. 사용자명 정리 (공백 제거, 필수값 확인)
    /// 2. bcrypt 해싱 (환경별 cost)
    /// 3. 엔티티 생성 및 저장 (중복 시 ConflictError)
    ///
    /// # 반환값
    ///
    /// * `Ok(User)` - 생성된 사용자
    /// * `Err(AppError::ValidationError)` - 사용자명 누락
    /// * `Err(AppError::ConflictError)` - 사용자명 중복
    /// * `Err(AppError::InternalError)` - 비밀번호 해싱 실패
    pub async fn register_local(&self, form: RegisterForm) -> AppResult<User> {
        let username = validate_required_string(&form.username, "사용자명")?;

        let password_hash = hash(&form.password, PasswordConfig::bcrypt_cost())
            .map_err(|e| AppError::InternalError(format!("비밀번호 해싱 실패: {}", e)))?;

        let user = User::new_local(username, password_hash);

        let created = self.user_repo.create(user).await?;

        log::info!("새 로컬 사용자 등록: {}", created.username);

        Ok(created)
    }

    /// 로컬 계정 자격 증명 검증
    ///
    /// 사용자명으로 계정을 조회하고 bcrypt 해시를 검증합니다.
    ///
    /// 실패 원인(사용자 없음, OAuth 전용 계정, 비밀번호 불일치)은
    /// 호출자에게 구분되지 않는 단일 `AuthenticationError`로 반환됩니다.
    ///
    /// # 반환값
    ///
    /// * `Ok(User)` - 인증된 사용자 엔티티
    /// * `Err(AppError::AuthenticationError)` - 자격 증명 불일치
    /// * `Err(AppError::DatabaseError)` - 데이터베이스 오류
    pub async fn verify_credentials(&self, username: &str, password: &str) -> AppResult<User> {
        let invalid =
            || AppError::AuthenticationError("사용자명 또는 비밀번호가 올바르지 않습니다".to_string());

        let user = self
            .user_repo
            .find_by_username(username.trim())
            .await?
            .ok_or_else(invalid)?;

        // OAuth 전용 계정은 비밀번호 검증 대상이 아니다
        let password_hash = match &user.password_hash {
            Some(hash) if user.can_authenticate_with_password() => hash.clone(),
            _ => return Err(invalid()),
        };

        let matches = verify(password, &password_hash)
            .map_err(|e| AppError::InternalError(format!("비밀번호 검증 실패: {}", e)))?;

        if !matches {
            return Err(invalid());
        }

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_then_verify_hash_roundtrip() {
        // 회원가입 → 로그인 왕복의 핵심인 해시/검증 조합을 확인한다
        let password = "supersecret1";
        let hashed = hash(password, 4).unwrap();

        assert!(verify(password, &hashed).unwrap());
        assert!(!verify("wrong-password", &hashed).unwrap());
    }

    #[test]
    fn test_oauth_user_cannot_authenticate_with_password() {
        let user = User::new_google("bob@gmail.com".to_string(), "123".to_string());

        assert!(!user.can_authenticate_with_password());
    }
}
