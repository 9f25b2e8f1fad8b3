//! # 사용자 리포지토리 구현
//!
//! 사용자 엔티티의 데이터 액세스 계층을 담당하는 리포지토리입니다.
//! MongoDB를 주 저장소로 사용하고, Redis를 통한 캐싱을 지원합니다.
//!
//! ## 특징
//!
//! - **하이브리드 스토리지**: MongoDB + Redis 캐싱
//! - **자동 의존성 주입**: 싱글톤 매크로를 통한 DI
//! - **데이터 무결성**: 유니크 제약 조건 및 인덱스 관리

use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::IndexOptions,
    IndexModel,
};
use std::sync::Arc;

use singleton_macro::repository;

use crate::{
    caching::redis::RedisClient,
    core::registry::Repository,
    db::Database,
    domain::entities::users::user::User,
};
use crate::errors::errors::AppError;

/// 사용자 데이터 액세스 리포지토리
///
/// 사용자 엔티티의 CRUD 연산과 시크릿 질의를 담당하며,
/// MongoDB 컬렉션과 Redis 캐시를 통합하여 데이터 액세스를 제공합니다.
///
/// ## 캐싱 전략
///
/// - **ID 조회**: `user:{user_id}` 키로 600초 캐싱.
///   세션 미들웨어가 매 요청 호출하는 핫 패스이므로 적극적으로 캐싱합니다.
/// - **사용자명/구글 ID 조회**: 로그인 시점에만 호출되므로 캐싱하지 않습니다.
/// - **쓰기 후 무효화**: 업데이트 성공 시 해당 사용자의 ID 캐시를 제거합니다.
///
/// ## 에러 처리
///
/// 모든 메서드는 `Result<T, AppError>`를 반환합니다:
///
/// - **DatabaseError**: MongoDB 연결 오류, 쿼리 실행 오류
/// - **ValidationError**: 잘못된 ObjectId 형식 등 입력값 검증 오류
/// - **ConflictError**: 사용자명/구글 ID 중복 등 유니크 제약 위반
#[repository(name = "user", collection = "users")]
pub struct UserRepository {
    /// MongoDB 데이터베이스 연결
    ///
    /// 자동 주입되는 데이터베이스 컴포넌트입니다.
    /// `users` 컬렉션에 대한 모든 MongoDB 연산을 담당합니다.
    db: Arc<Database>,

    /// Redis 캐시 클라이언트
    ///
    /// 자동 주입되는 Redis 클라이언트입니다.
    /// 조회 성능 향상을 위한 캐싱 레이어를 제공합니다.
    redis: Arc<RedisClient>,
}

impl UserRepository {
    /// 사용자명으로 사용자 조회
    ///
    /// 사용자명(이메일)은 시스템 전체에서 유니크하므로 최대 1개의 결과만 반환됩니다.
    /// 로컬 로그인과 회원가입 중복 확인에 사용됩니다.
    ///
    /// # 반환값
    ///
    /// * `Ok(Some(User))` - 사용자를 찾은 경우
    /// * `Ok(None)` - 해당 사용자명의 사용자가 없는 경우
    /// * `Err(AppError::DatabaseError)` - 데이터베이스 오류
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        self.collection::<User>()
            .find_one(doc! { "username": username })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// Google subject id로 사용자 조회
    ///
    /// OAuth 콜백의 find-or-create 단계에서 기존 계정 연동 여부를 확인합니다.
    pub async fn find_by_google_id(&self, google_id: &str) -> Result<Option<User>, AppError> {
        self.collection::<User>()
            .find_one(doc! { "google_id": google_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// ID로 사용자 조회
    ///
    /// 세션 미들웨어가 매 요청 호출하는 가장 빈번한 조회 패턴이므로
    /// 적극적인 캐싱을 적용합니다.
    ///
    /// # 캐싱 정책
    ///
    /// - **캐시 키**: `user:{id}` (리포지토리 매크로의 `cache_key()` 사용)
    /// - **TTL**: 600초 (10분)
    /// - **캐시 미스**: MongoDB에서 조회 후 캐시에 저장
    ///
    /// # 반환값
    ///
    /// * `Ok(Some(User))` - 사용자를 찾은 경우
    /// * `Ok(None)` - 해당 ID의 사용자가 없는 경우
    /// * `Err(AppError::ValidationError)` - 잘못된 ObjectId 형식
    /// * `Err(AppError::DatabaseError)` - 데이터베이스 오류
    pub async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 ID 형식입니다".to_string()))?;

        let cache_key = self.cache_key(id);

        // 캐시 확인
        if let Ok(Some(cached)) = self.redis.get::<User>(&cache_key).await {
            return Ok(Some(cached));
        }

        // DB 조회
        let user = self
            .collection::<User>()
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        // 캐시 저장
        if let Some(ref user) = user {
            let _ = self.redis.set_with_expiry(&cache_key, user, 600).await;
        }

        Ok(user)
    }

    /// 시크릿을 공유한 모든 사용자 조회
    ///
    /// `secret` 필드가 null이 아닌(즉, 한 번이라도 제출한) 사용자 전체를 반환합니다.
    /// 시크릿 목록 페이지에서 사용되며, 페이지네이션은 없습니다.
    pub async fn find_with_secrets(&self) -> Result<Vec<User>, AppError> {
        let cursor = self
            .collection::<User>()
            .find(doc! { "secret": { "$ne": null } })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 새 사용자 생성
    ///
    /// 사용자명의 중복 여부를 사전에 검증하고 저장합니다.
    ///
    /// # 반환값
    ///
    /// * `Ok(User)` - 생성된 사용자 (ID 포함)
    /// * `Err(AppError::ConflictError)` - 사용자명 중복
    /// * `Err(AppError::DatabaseError)` - 데이터베이스 오류
    ///
    /// # 비즈니스 규칙
    ///
    /// 1. **사용자명 유니크성**: 로컬/OAuth를 불문하고 동일 이메일로 두 계정 생성 불가
    /// 2. **ID 자동 할당**: MongoDB가 자동으로 ObjectId 생성
    pub async fn create(&self, mut user: User) -> Result<User, AppError> {
        // 중복 확인 (유니크 인덱스가 최종 방어선)
        if self.find_by_username(&user.username).await?.is_some() {
            return Err(AppError::ConflictError(
                "이미 사용 중인 사용자명입니다".to_string(),
            ));
        }

        let result = self
            .collection::<User>()
            .insert_one(&user)
            .await
            .map_err(|e| {
                // 경합으로 사전 확인을 통과한 중복 삽입은 유니크 인덱스 에러로 도착한다
                let message = e.to_string();
                if message.contains("E11000") {
                    AppError::ConflictError("이미 사용 중인 사용자명입니다".to_string())
                } else {
                    AppError::DatabaseError(message)
                }
            })?;

        user.id = Some(result.inserted_id.as_object_id().unwrap());

        Ok(user)
    }

    /// 사용자 정보 업데이트
    ///
    /// 기존 사용자의 정보를 부분적으로 업데이트하고 최신 사용자 정보를 반환합니다.
    /// 시크릿 제출(덮어쓰기)이 이 메서드를 사용합니다.
    ///
    /// # 인자
    ///
    /// * `id` - 업데이트할 사용자의 ID (ObjectId 문자열)
    /// * `update_doc` - 업데이트할 필드들을 포함한 MongoDB Document
    ///
    /// # 업데이트 연산
    ///
    /// - **MongoDB `$set` 연산자 사용**: 지정된 필드만 변경
    /// - **원자적 연산**: find_one_and_update로 조회와 업데이트를 동시에
    /// - **최신 데이터 반환**: ReturnDocument::After 옵션 사용
    ///
    /// # 캐시 관리
    ///
    /// 업데이트 성공 시 해당 사용자의 ID 캐시를 무효화합니다.
    pub async fn update(
        &self,
        id: &str,
        update_doc: mongodb::bson::Document,
    ) -> Result<Option<User>, AppError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 ID 형식입니다".to_string()))?;

        let options = mongodb::options::FindOneAndUpdateOptions::builder()
            .return_document(mongodb::options::ReturnDocument::After)
            .build();

        let updated_user = self
            .collection::<User>()
            .find_one_and_update(doc! { "_id": object_id }, doc! { "$set": update_doc })
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        // 캐시 무효화
        if updated_user.is_some() {
            let _ = self.invalidate_cache(id).await;
        }

        Ok(updated_user)
    }

    /// 데이터베이스 인덱스 생성
    ///
    /// 사용자 컬렉션에 필요한 모든 인덱스를 생성합니다.
    /// 애플리케이션 초기화 시점에 한 번 실행합니다.
    ///
    /// # 생성되는 인덱스
    ///
    /// 1. **사용자명 유니크 인덱스** - 중복 계정 방지 및 로그인 조회 최적화
    /// 2. **구글 ID 유니크(sparse) 인덱스** - OAuth 계정 연동 키.
    ///    로컬 계정에는 필드가 없으므로 sparse로 생성합니다.
    /// 3. **생성일 인덱스** - 최근 사용자 조회 및 정렬 최적화
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let collection = self.collection::<User>();

        // 사용자명 유니크 인덱스
        let username_index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("username_unique".to_string())
                    .build(),
            )
            .build();

        // 구글 ID 유니크 인덱스 (로컬 계정은 필드 없음)
        let google_id_index = IndexModel::builder()
            .keys(doc! { "google_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .sparse(true)
                    .name("google_id_unique".to_string())
                    .build(),
            )
            .build();

        // 생성일 인덱스
        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(
                IndexOptions::builder()
                    .name("created_at_desc".to_string())
                    .build(),
            )
            .build();

        collection
            .create_indexes([username_index, google_id_index, created_at_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
