//! # Service Registry - 싱글톤 의존성 주입 시스템
//!
//! `singleton_macro`의 `#[service]` / `#[repository]` 매크로가 확장되는 대상입니다.
//! 애플리케이션 컴포넌트(서비스, 리포지토리)를 타입별 싱글톤으로 관리합니다.
//!
//! ## 동작 원리
//!
//! ```text
//! 1. 컴파일 타임 (Component Scanning)
//!    ├─ #[service]    → ServiceRegistration 제출 ("{name}_service")
//!    ├─ #[repository] → RepositoryRegistration 제출 ("{name}_repository")
//!    └─ inventory::collect! → 전역 레지스트리에 수집
//!
//! 2. 런타임 초기화 (Infrastructure)
//!    ├─ ServiceLocator::set(Arc<Database>), ServiceLocator::set(Arc<RedisClient>)
//!    └─ ServiceLocator::set::<dyn CacheStore>(...) 등 trait 바인딩
//!
//! 3. 의존성 해결 (Autowiring)
//!    ├─ 매크로가 만든 new()의 Arc<T> 필드 → ServiceLocator::get::<T>()
//!    ├─ 캐시 확인 → 타입 이름으로 등록 정보 검색 → 생성자 호출
//!    └─ 생성 중인 타입을 다시 요청하면 순환 참조로 패닉
//! ```
//!
//! ## 이름 규칙
//!
//! 등록 이름과 타입 이름은 소문자로 바꾸고 `_`와 `service`/`repository`
//! 접미사를 뗀 값으로 비교합니다.
//!
//! | 타입 | 매크로 인자 | 검색 키 |
//! |------|-------------|---------|
//! | `AdminUserRepository` | `#[repository(name = "admin_user")]` | `adminuser` |
//! | `MemberService` | `#[service(name = "member")]` | `member` |
//! | `SmtpMailer` | `#[service(name = "smtp_mailer")]` | `smtpmailer` |
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! #[repository(name = "role", collection = "sys_role")]
//! pub struct RoleRepository {
//!     db: Arc<Database>,
//! }
//!
//! let repo = RoleRepository::instance();
//! ```

use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, PoisonError, RwLock};
use async_trait::async_trait;
use log::{debug, info};
use once_cell::sync::Lazy;

/// 비즈니스 로직 서비스 공통 인터페이스 (`#[service]`가 구현)
#[async_trait]
pub trait Service: Send + Sync {
    fn name(&self) -> &str;
    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

/// 데이터 액세스 리포지토리 공통 인터페이스 (`#[repository]`가 구현)
#[async_trait]
pub trait Repository: Send + Sync {
    fn name(&self) -> &str;
    fn collection_name(&self) -> &str;
    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

/// 서비스 등록 정보
pub struct ServiceRegistration {
    pub name: &'static str,
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

/// 리포지토리 등록 정보
pub struct RepositoryRegistration {
    pub name: &'static str,
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

inventory::collect!(ServiceRegistration);
inventory::collect!(RepositoryRegistration);

type Constructor = fn() -> Box<dyn Any + Send + Sync>;

static SERVICE_NAME_CACHE: Lazy<HashMap<String, (&'static str, Constructor)>> = Lazy::new(|| {
    let cache: HashMap<_, _> = inventory::iter::<ServiceRegistration>()
        .map(|registration| {
            (registry_key(registration.name), (registration.name, registration.constructor))
        })
        .collect();
    debug!("Service 레지스트리 구성: {}개", cache.len());
    cache
});

static REPOSITORY_NAME_CACHE: Lazy<HashMap<String, (&'static str, Constructor)>> = Lazy::new(|| {
    let cache: HashMap<_, _> = inventory::iter::<RepositoryRegistration>()
        .map(|registration| {
            (registry_key(registration.name), (registration.name, registration.constructor))
        })
        .collect();
    debug!("Repository 레지스트리 구성: {}개", cache.len());
    cache
});

/// `admin_user_repository`, `AdminUserRepository` → `adminuser`
fn registry_key(name: &str) -> String {
    let key: String = name
        .chars()
        .filter(|c| *c != '_')
        .flat_map(char::to_lowercase)
        .collect();

    for suffix in ["repository", "service"] {
        if let Some(base) = key.strip_suffix(suffix) {
            if !base.is_empty() {
                return base.to_string();
            }
        }
    }
    key
}

/// 싱글톤 의존성 주입 컨테이너
///
/// 값은 `Arc<T>`를 그대로 박싱해 저장하므로 `dyn Trait` 바인딩도 담을 수 있습니다.
pub struct ServiceLocator {
    instances: RwLock<HashMap<TypeId, Box<dyn Any + Send + Sync>>>,
    /// 현재 생성 중인 타입 (순환 참조 감지용)
    initializing: RwLock<HashSet<TypeId>>,
}

impl ServiceLocator {
    fn new() -> Self {
        Self {
            instances: RwLock::new(HashMap::new()),
            initializing: RwLock::new(HashSet::new()),
        }
    }

    /// 지정된 타입의 싱글톤 인스턴스를 가져옵니다.
    ///
    /// `set`으로 등록된 값이 우선이며, 없으면 타입 이름으로 매크로 등록 정보를
    /// 찾아 생성합니다. 생성자는 락 밖에서 호출되므로 다른 컴포넌트를 다시
    /// `get` 할 수 있습니다.
    ///
    /// # Panics
    ///
    /// 미등록 타입이나 순환 참조는 설정 오류이므로 시작 시점에 패닉으로 드러냅니다.
    pub fn get<T: ?Sized + Send + Sync + 'static>() -> Arc<T> {
        let type_id = TypeId::of::<T>();
        let type_name = std::any::type_name::<T>();

        if let Some(instance) = Self::cached::<T>(type_id) {
            return instance;
        }

        let clean_name = Self::clean_type_name(type_name);
        let (name, constructor) = match Self::registration_for(clean_name) {
            Some(entry) => entry,
            None => panic!(
                "Service not found: {}. Make sure it's registered with #[service] or #[repository], or bound with ServiceLocator::set()",
                type_name
            ),
        };

        {
            let mut initializing = LOCATOR.initializing.write().unwrap_or_else(PoisonError::into_inner);
            if !initializing.insert(type_id) {
                panic!("Circular dependency detected: {} is already being initialized", type_name);
            }
        }

        let created = constructor();

        LOCATOR
            .initializing
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&type_id);

        let instance = match created.downcast::<Arc<T>>() {
            Ok(instance) => *instance,
            Err(_) => panic!("Type mismatch for {}: registered as {}", type_name, name),
        };

        LOCATOR
            .instances
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(type_id)
            .or_insert_with(|| Box::new(instance.clone()));

        debug!("컴포넌트 생성: {}", name);
        instance
    }

    /// 외부에서 생성된 인스턴스를 직접 등록합니다.
    ///
    /// 인프라 컴포넌트(Database, RedisClient)와 trait 바인딩에 사용합니다.
    ///
    /// ```rust,ignore
    /// ServiceLocator::set(redis.clone());
    /// ServiceLocator::set::<dyn CacheStore>(redis);
    /// ```
    pub fn set<T: ?Sized + Send + Sync + 'static>(instance: Arc<T>) {
        info!("📦 Registering: {}", Self::clean_type_name(std::any::type_name::<T>()));

        LOCATOR
            .instances
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(TypeId::of::<T>(), Box::new(instance));
    }

    /// 모든 리포지토리와 서비스를 미리 생성합니다.
    ///
    /// 리포지토리를 먼저 생성한 뒤 서비스를 생성합니다. 누락된 의존성은
    /// 첫 요청이 아니라 이 시점에 드러납니다.
    pub async fn initialize_all() -> Result<(), Box<dyn std::error::Error>> {
        info!("🔄 서비스 레지스트리 초기화 시작");

        let mut repo_count = 0;
        for registration in inventory::iter::<RepositoryRegistration>() {
            let _instance = (registration.constructor)();
            info!("  ✓ {}", registration.name);
            repo_count += 1;
        }

        let mut service_count = 0;
        for registration in inventory::iter::<ServiceRegistration>() {
            let _instance = (registration.constructor)();
            info!("  ✓ {}", registration.name);
            service_count += 1;
        }

        info!("✅ 초기화 완료: 리포지토리 {}개, 서비스 {}개", repo_count, service_count);
        Ok(())
    }

    fn registration_for(clean_name: &str) -> Option<(&'static str, Constructor)> {
        let key = registry_key(clean_name);
        let (first, second) = if clean_name.ends_with("Repository") {
            (&*REPOSITORY_NAME_CACHE, &*SERVICE_NAME_CACHE)
        } else {
            (&*SERVICE_NAME_CACHE, &*REPOSITORY_NAME_CACHE)
        };

        first.get(&key).or_else(|| second.get(&key)).copied()
    }

    fn cached<T: ?Sized + Send + Sync + 'static>(type_id: TypeId) -> Option<Arc<T>> {
        LOCATOR
            .instances
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .and_then(|boxed| boxed.downcast_ref::<Arc<T>>())
            .cloned()
    }

    /// `portal_backend::services::UserService` → `UserService`
    fn clean_type_name(type_name: &str) -> &str {
        type_name.rsplit("::").next().unwrap_or(type_name)
    }
}

/// 전역 서비스 로케이터 인스턴스
static LOCATOR: Lazy<ServiceLocator> = Lazy::new(ServiceLocator::new);
