//! 시크릿 제출/조회 서비스 구현
//!
//! 인증된 사용자의 시크릿 제출(덮어쓰기)과
//! 공개 시크릿 목록 조회를 담당합니다.

use mongodb::bson::{doc, DateTime};
use std::sync::Arc;

use singleton_macro::service;

use crate::{
    domain::entities::users::user::User,
    repositories::users::user_repo::UserRepository,
};
use crate::errors::errors::{AppError, AppResult};

/// 시크릿 비즈니스 로직 서비스
///
/// `#[service]` 매크로를 통해 싱글톤으로 관리되며,
/// UserRepository가 자동으로 주입됩니다.
#[service(name = "secret")]
pub struct SecretService {
    /// 사용자 데이터 액세스 리포지토리
    user_repo: Arc<UserRepository>,
}

impl SecretService {
    /// 현재 사용자의 시크릿 저장
    ///
    /// 제출된 문자열을 가공 없이 그대로 저장하며, 기존 시크릿은 덮어씁니다.
    /// 동시 제출은 last-write-wins 의미론을 따릅니다.
    ///
    /// # 반환값
    ///
    /// * `Ok(User)` - 갱신된 사용자 엔티티
    /// * `Err(AppError::NotFound)` - 세션의 사용자가 더 이상 존재하지 않음
    /// * `Err(AppError::DatabaseError)` - 데이터베이스 오류
    pub async fn submit_secret(&self, user_id: &str, secret: &str) -> AppResult<User> {
        let updated = self
            .user_repo
            .update(
                user_id,
                doc! {
                    "secret": secret,
                    "updated_at": DateTime::now(),
                },
            )
            .await?
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))?;

        log::info!("시크릿 제출: 사용자 {}", updated.username);

        Ok(updated)
    }

    /// 공유된 모든 시크릿 조회
    ///
    /// 시크릿을 한 번이라도 제출한 사용자들의 시크릿 문자열을 반환합니다.
    /// 작성자 정보는 노출되지 않습니다.
    pub async fn list_shared_secrets(&self) -> AppResult<Vec<String>> {
        let users = self.user_repo.find_with_secrets().await?;

        Ok(users.into_iter().filter_map(|user| user.secret).collect())
    }
}
