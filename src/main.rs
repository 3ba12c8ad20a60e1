//! 포털 백엔드 메인 애플리케이션
//!
//! Actix-web 기반의 HTTP 서버를 구동하고 모든 서비스를 초기화합니다.
//! MongoDB, Redis 연결을 설정한 뒤 관리자 플랫폼(`/api/admin`)과
//! 사용자 플랫폼(`/api/backend`) API를 제공합니다.

use std::io;
use std::sync::Arc;
use actix_web::{middleware, App, HttpServer};
use actix_governor::{Governor, GovernorConfigBuilder};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};
use portal_backend::caching::{redis::RedisClient, store::CacheStore};
use portal_backend::config::{RateLimitConfig, ServerConfig};
use portal_backend::core::registry::ServiceLocator;
use portal_backend::db::Database;
use portal_backend::middlewares::configure_cors;
use portal_backend::repositories::{self, users::UserRepository};
use portal_backend::routes::configure_all_routes;
use portal_backend::services::mail::{MailSender, SmtpMailer};
use portal_backend::services::support::{AppleReceiptVerifier, MongoSupportLedger, ReceiptVerifier, SupportLedger};
use portal_backend::services::users::MemberStore;

#[actix_web::main]
async fn main() -> io::Result<()> {
    load_env_file();
    init_logging();

    info!("🚀 포털 백엔드 시작중...");

    let (database, redis_client) = initialize_data_stores().await?;

    ServiceLocator::set(database);
    ServiceLocator::set(redis_client.clone());
    bind_components(redis_client);

    if let Err(e) = ServiceLocator::initialize_all().await {
        error!("❌ 서비스 초기화 실패: {}", e);
        return Err(io::Error::other(format!("서비스 초기화 실패: {}", e)));
    }

    if let Err(e) = repositories::ensure_indexes().await {
        error!("❌ 인덱스 생성 실패: {}", e);
        return Err(io::Error::other(format!("인덱스 생성 실패: {}", e)));
    }

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    start_http_server().await
}

/// trait 뒤에 둔 의존성에 운영 구현을 연결합니다
///
/// `Database`와 `RedisClient`가 등록된 뒤, `initialize_all` 전에 호출해야 합니다.
fn bind_components(redis_client: Arc<RedisClient>) {
    ServiceLocator::set::<dyn CacheStore>(redis_client);
    ServiceLocator::set::<dyn MailSender>(SmtpMailer::instance());
    ServiceLocator::set::<dyn ReceiptVerifier>(AppleReceiptVerifier::instance());
    ServiceLocator::set::<dyn MemberStore>(UserRepository::instance());
    ServiceLocator::set::<dyn SupportLedger>(MongoSupportLedger::instance());
}

/// HTTP 서버를 구성하고 실행합니다
///
/// 미들웨어는 아래에 적힌 순서의 역순으로 실행됩니다. 요청은 경로 정규화,
/// 접근 로그, CORS, 속도 제한을 차례로 거친 뒤 라우트별 인증 미들웨어에 도달합니다.
///
/// # Errors
///
/// * `std::io::Error` - 포트 바인딩 실패, 속도 제한 설정 오류 또는 서버 실행 오류
async fn start_http_server() -> io::Result<()> {
    let bind_address = format!("{}:{}", ServerConfig::host(), ServerConfig::port());

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);

    let per_second = RateLimitConfig::per_second();
    let burst_size = RateLimitConfig::burst_size();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(per_second)
        .burst_size(burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "RATE_LIMIT_PER_SECOND, RATE_LIMIT_BURST_SIZE는 0보다 커야 합니다",
            )
        })?;

    info!("🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개", per_second, burst_size);

    HttpServer::new(move || {
        App::new()
            .wrap(Governor::new(&governor_conf))
            .wrap(configure_cors())
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(configure_all_routes)
    })
    .bind(bind_address)?
    .workers(4)
    .run()
    .await
}

/// 환경별 설정 파일을 로드합니다
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
///
/// 로거 초기화 전에 호출되므로 결과는 표준 에러로 출력합니다.
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    match profile.as_str() {
        "prod" => {
            if let Err(e) = dotenv::from_filename(".env.prod") {
                eprintln!(".env.prod 파일 로드 실패: {}", e);
            }
        }
        "dev" => {
            if let Err(e) = dotenv::from_filename(".env.dev") {
                eprintln!(".env.dev 파일 로드 실패: {}", e);
            }
        }
        _ => {
            dotenv().ok();
        }
    }
}

/// 로깅 시스템을 초기화합니다
///
/// ```bash
/// RUST_LOG=debug cargo run
/// RUST_LOG=portal_backend::services=debug cargo run
/// ```
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

/// MongoDB와 Redis 연결을 초기화합니다
async fn initialize_data_stores() -> io::Result<(Arc<Database>, Arc<RedisClient>)> {
    info!("📡 데이터베이스 연결 중...");

    let database = Database::new().await.map_err(|e| {
        error!("❌ MongoDB 연결 실패: {}", e);
        io::Error::other(format!("데이터베이스 연결 실패: {}", e))
    })?;

    info!("✅ MongoDB 연결 성공");

    let redis_client = RedisClient::new().await.map_err(|e| {
        error!("❌ Redis 연결 실패: {}", e);
        io::Error::other(format!("Redis 연결 실패: {}", e))
    })?;

    info!("✅ Redis 연결 성공");

    Ok((Arc::new(database), Arc::new(redis_client)))
}
