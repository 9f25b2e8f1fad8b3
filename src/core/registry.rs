//! # Service Registry - 싱글톤 의존성 주입 시스템
//!
//! `#[service]` / `#[repository]` 매크로와 함께 동작하는 전역 DI 컨테이너입니다.
//! 모든 컴포넌트는 컴파일 타임에 `inventory`로 수집되고,
//! 첫 사용 시점에 지연 초기화되어 싱글톤으로 관리됩니다.
//!
//! ## 동작 원리
//!
//! ```text
//! 1. 컴파일 타임
//!    ├─ #[service] 매크로 → ServiceRegistration 생성
//!    ├─ #[repository] 매크로 → RepositoryRegistration 생성
//!    └─ inventory::collect! → 전역 레지스트리에 등록
//!
//! 2. 런타임 초기화
//!    ├─ Database, RedisClient 등 인프라 컴포넌트 직접 등록
//!    └─ ServiceLocator::set() → 전역 컨테이너에 저장
//!
//! 3. 의존성 주입
//!    ├─ Arc<T> 필드 감지 → ServiceLocator::get::<T>() 호출
//!    ├─ 이름 캐시에서 등록 정보 검색 (O(1))
//!    ├─ 생성자 함수 호출 및 캐싱
//!    └─ 이후 동일 타입 요청 시 캐시된 인스턴스 반환
//! ```
//!
//! 순환 참조는 초기화 중인 타입 집합을 추적하여 즉시 패닉으로 조기 발견합니다.

use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use log::{debug, info};
use once_cell::sync::Lazy;

/// 비즈니스 로직 서비스를 위한 공통 인터페이스
///
/// 모든 `#[service]` 매크로가 적용된 구조체가 이 trait을 자동 구현합니다.
#[async_trait]
pub trait Service: Send + Sync {
    /// 서비스의 고유 이름을 반환합니다.
    ///
    /// 레지스트리에서 서비스를 식별하는 키로 사용되며,
    /// 매크로의 `name` 인자나 구조체 이름을 기반으로 자동 생성됩니다.
    fn name(&self) -> &str;

    /// 서비스 초기화 로직을 수행합니다.
    ///
    /// 서비스가 처음 생성된 후 호출되며, 필요한 초기 설정 작업을 수행할 수 있습니다.
    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

/// 데이터 액세스 리포지토리를 위한 공통 인터페이스
///
/// 모든 `#[repository]` 매크로가 적용된 구조체가 이 trait을 자동 구현합니다.
#[async_trait]
pub trait Repository: Send + Sync {
    /// 리포지토리의 고유 이름을 반환합니다.
    fn name(&self) -> &str;

    /// 연결된 MongoDB 컬렉션의 이름을 반환합니다.
    fn collection_name(&self) -> &str;

    /// 리포지토리 초기화 로직을 수행합니다.
    ///
    /// 인덱스 생성, 연결 상태 확인 등 데이터 액세스 관련 초기화 작업을 수행합니다.
    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

/// 서비스 등록 정보
///
/// `#[service]` 매크로에 의해 자동 생성되는 등록 메타데이터입니다.
pub struct ServiceRegistration {
    /// 서비스의 고유 이름 (검색 키로 사용)
    pub name: &'static str,
    /// 인스턴스 생성 함수 (지연 초기화에 사용)
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

/// 리포지토리 등록 정보
///
/// `#[repository]` 매크로에 의해 자동 생성되는 등록 메타데이터입니다.
pub struct RepositoryRegistration {
    /// 리포지토리의 고유 이름 (검색 키로 사용)
    pub name: &'static str,
    /// 인스턴스 생성 함수 (지연 초기화에 사용)
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

// 컴파일 타임에 모든 등록 정보를 수집한다
inventory::collect!(ServiceRegistration);
inventory::collect!(RepositoryRegistration);

/// 서비스 이름 → 등록정보 매핑 캐시
/// 첫 접근 시 한 번만 구성되며, 이후 O(1) 조회 제공
static SERVICE_NAME_CACHE: Lazy<HashMap<String, &'static ServiceRegistration>> =
    Lazy::new(|| {
        let mut cache = HashMap::new();

        for registration in inventory::iter::<ServiceRegistration>() {
            cache.insert(extract_clean_name(registration.name), registration);
        }

        debug!("서비스 이름 캐시 구성 완료: {}개", cache.len());
        cache
    });

/// 리포지토리 이름 → 등록정보 매핑 캐시
/// 첫 접근 시 한 번만 구성되며, 이후 O(1) 조회 제공
static REPOSITORY_NAME_CACHE: Lazy<HashMap<String, &'static RepositoryRegistration>> =
    Lazy::new(|| {
        let mut cache = HashMap::new();

        for registration in inventory::iter::<RepositoryRegistration>() {
            cache.insert(extract_clean_name(registration.name), registration);
        }

        debug!("리포지토리 이름 캐시 구성 완료: {}개", cache.len());
        cache
    });

/// 등록된 이름에서 접미사를 제거하여 정규화합니다.
///
/// 매크로에서 생성되는 등록 이름은 `user_service`, `user_repository` 형태이므로,
/// 이를 `user`로 정규화하여 타입 이름과 매칭합니다.
fn extract_clean_name(name: &str) -> String {
    if let Some(stripped) = name.strip_suffix("_service") {
        stripped.to_string()
    } else if let Some(stripped) = name.strip_suffix("_repository") {
        stripped.to_string()
    } else {
        name.to_string()
    }
}

/// 싱글톤 의존성 주입 컨테이너
///
/// 전역 유일 컨테이너로 모든 서비스/리포지토리/인프라 컴포넌트의
/// 인스턴스 생명주기를 관리합니다.
///
/// # 주요 기능
///
/// - **싱글톤 보장**: 각 타입당 정확히 하나의 인스턴스만 생성
/// - **지연 초기화**: 첫 요청 시점에 인스턴스 생성
/// - **Thread-safe**: `RwLock`을 사용한 동시성 안전성
/// - **순환 참조 방지**: 초기화 중인 타입을 추적하여 데드락 방지
pub struct ServiceLocator {
    /// 생성된 인스턴스들의 캐시
    /// `TypeId`를 키로 사용하여 각 타입당 하나의 인스턴스를 저장
    instances: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
    /// 현재 초기화 중인 타입들 (순환 참조 방지용)
    initializing: RwLock<HashSet<TypeId>>,
}

impl ServiceLocator {
    /// 새로운 ServiceLocator 인스턴스를 생성합니다.
    /// 전역 Lazy static에서만 호출됩니다.
    fn new() -> Self {
        Self {
            instances: RwLock::new(HashMap::new()),
            initializing: RwLock::new(HashSet::new()),
        }
    }

    /// 지정된 타입의 싱글톤 인스턴스를 가져옵니다.
    ///
    /// 처리 과정:
    ///
    /// 1. **캐시 확인 (O(1))**: 이미 생성된 인스턴스가 있으면 즉시 반환
    /// 2. **순환 참조 검사**: 현재 생성 중인 타입이면 패닉
    /// 3. **타입 분석**: `UserService` → 서비스, `UserRepository` → 리포지토리
    /// 4. **레지스트리 검색 (O(1))**: 이름 캐시에서 등록 정보 조회
    /// 5. **인스턴스 생성 및 캐싱**: 생성자 함수 호출 후 저장
    ///
    /// # Panics
    ///
    /// - **순환 참조**: A → B → A 형태의 의존성 순환
    /// - **미등록 타입**: `#[service]`/`#[repository]` 매크로나
    ///   `ServiceLocator::set()`으로 등록되지 않은 타입 요청
    /// - **타입 불일치**: 등록된 타입과 요청 타입이 다른 경우
    pub fn get<T: 'static + Send + Sync>() -> Arc<T> {
        let type_id = TypeId::of::<T>();
        let type_name = std::any::type_name::<T>();

        // 이미 생성된 인스턴스 확인
        {
            let instances = LOCATOR.instances.read().unwrap();
            if let Some(instance) = instances.get(&type_id) {
                return instance
                    .clone()
                    .downcast::<T>()
                    .expect("Type mismatch in ServiceLocator");
            }
        }

        // 현재 초기화 중인지 확인 (순환 참조 방지)
        {
            let initializing = LOCATOR.initializing.read().unwrap();
            if initializing.contains(&type_id) {
                panic!(
                    "Circular dependency detected: {} is already being initialized",
                    type_name
                );
            }
        }

        // 초기화 중임을 표시
        {
            let mut initializing = LOCATOR.initializing.write().unwrap();
            initializing.insert(type_id);
        }

        let instance = Self::construct::<T>(type_name);

        // 초기화 완료 표시
        {
            let mut initializing = LOCATOR.initializing.write().unwrap();
            initializing.remove(&type_id);
        }

        instance
    }

    /// 레지스트리에서 등록 정보를 찾아 인스턴스를 생성하고 캐싱합니다.
    fn construct<T: 'static + Send + Sync>(type_name: &str) -> Arc<T> {
        let type_id = TypeId::of::<T>();
        let mut instances = LOCATOR.instances.write().unwrap();

        // 더블 체크: 락 대기 중 다른 스레드가 생성했을 수 있다
        if let Some(instance) = instances.get(&type_id) {
            return instance
                .clone()
                .downcast::<T>()
                .expect("Type mismatch in ServiceLocator");
        }

        let clean_type_name = Self::extract_clean_type_name(type_name);

        let constructor = if clean_type_name.contains("Repository") {
            let entity_name = clean_type_name
                .strip_suffix("Repository")
                .unwrap_or(&clean_type_name)
                .to_lowercase();

            REPOSITORY_NAME_CACHE
                .get(&entity_name)
                .map(|registration| registration.constructor)
                .unwrap_or_else(|| panic!("No repository found for entity: {}", entity_name))
        } else if clean_type_name.contains("Service") {
            let entity_name = clean_type_name
                .strip_suffix("Service")
                .unwrap_or(&clean_type_name)
                .to_lowercase();

            SERVICE_NAME_CACHE
                .get(&entity_name)
                .map(|registration| registration.constructor)
                .unwrap_or_else(|| panic!("No service found for entity: {}", entity_name))
        } else {
            panic!(
                "Service not found: {}. Make sure it's registered with #[service] or #[repository] macro, or manually registered with ServiceLocator::set()",
                type_name
            );
        };

        let boxed_instance = constructor();

        match boxed_instance.downcast::<Arc<T>>() {
            Ok(arc_instance) => {
                let instance = (*arc_instance).clone();
                instances.insert(type_id, instance.clone() as Arc<dyn Any + Send + Sync>);
                debug!("싱글톤 인스턴스 생성: {}", clean_type_name);
                instance
            }
            Err(_) => panic!("Type mismatch for component: {}", type_name),
        }
    }

    /// 타입 이름에서 실제 타입 이름을 추출합니다.
    ///
    /// `std::any::type_name::<T>()`는 전체 모듈 경로를 포함하므로
    /// (예: `secrets_webapp::services::users::UserService`),
    /// 마지막 세그먼트만 추출하여 매칭에 사용합니다.
    fn extract_clean_type_name(type_name: &str) -> String {
        if let Some(pos) = type_name.rfind("::") {
            type_name[pos + 2..].to_string()
        } else {
            type_name.to_string()
        }
    }

    /// 외부에서 생성된 인스턴스를 직접 등록합니다.
    ///
    /// 매크로로 관리되지 않는 인프라 컴포넌트(Database, RedisClient 등)를
    /// 애플리케이션 초기화 시점에 수동으로 등록할 때 사용됩니다.
    ///
    /// ```rust,ignore
    /// let database = Arc::new(Database::new().await?);
    /// let redis = Arc::new(RedisClient::new().await?);
    ///
    /// ServiceLocator::set(database);
    /// ServiceLocator::set(redis);
    /// ```
    ///
    /// 인프라 컴포넌트는 반드시 `initialize_all()` 호출 전에 등록되어야 합니다.
    pub fn set<T: 'static + Send + Sync>(instance: Arc<T>) {
        let type_id = TypeId::of::<T>();
        let clean_name = Self::extract_clean_type_name(std::any::type_name::<T>());

        info!("📦 컴포넌트 등록: {}", clean_name);

        let mut instances = LOCATOR.instances.write().unwrap();
        instances.insert(type_id, instance as Arc<dyn Any + Send + Sync>);
    }

    /// 모든 서비스와 리포지토리를 초기화합니다.
    ///
    /// 애플리케이션 시작 시 호출되어 등록된 모든 컴포넌트의 인스턴스를
    /// 미리 생성합니다. 지연 초기화와 달리 모든 의존성을 한 번에 해결하여
    /// 첫 요청의 지연을 제거합니다.
    ///
    /// # 초기화 순서
    ///
    /// 1. **Repository 먼저**: 데이터 계층이 비즈니스 계층보다 먼저 초기화
    /// 2. **Service 나중에**: 리포지토리 의존성이 해결된 후 서비스 초기화
    pub async fn initialize_all() -> Result<(), Box<dyn std::error::Error>> {
        let repo_registrations: Vec<_> = inventory::iter::<RepositoryRegistration>().collect();
        for registration in &repo_registrations {
            let _boxed_instance = (registration.constructor)();
            info!("  ✓ 리포지토리 생성: {}", registration.name);
        }

        let service_registrations: Vec<_> = inventory::iter::<ServiceRegistration>().collect();
        for registration in &service_registrations {
            let _boxed_instance = (registration.constructor)();
            info!("  ✓ 서비스 생성: {}", registration.name);
        }

        info!(
            "서비스 레지스트리 초기화 완료 (리포지토리 {}개, 서비스 {}개)",
            repo_registrations.len(),
            service_registrations.len()
        );

        Ok(())
    }
}

/// 전역 서비스 로케이터 인스턴스
///
/// 애플리케이션 전체에서 사용되는 유일한 ServiceLocator 인스턴스입니다.
/// `Lazy<T>`를 사용하여 첫 접근 시에만 초기화됩니다.
static LOCATOR: Lazy<ServiceLocator> = Lazy::new(ServiceLocator::new);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_clean_name() {
        assert_eq!(extract_clean_name("user_service"), "user");
        assert_eq!(extract_clean_name("user_repository"), "user");
        assert_eq!(extract_clean_name("session_service"), "session");
        assert_eq!(extract_clean_name("plain"), "plain");
    }

    #[test]
    fn test_extract_clean_type_name() {
        assert_eq!(
            ServiceLocator::extract_clean_type_name(
                "secrets_webapp::services::users::UserService"
            ),
            "UserService"
        );
        assert_eq!(
            ServiceLocator::extract_clean_type_name("UserRepository"),
            "UserRepository"
        );
    }
}
