use std::sync::Arc;

use anyhow::Context;
use auth::Authenticator;
use auth::SigningKey;
use hotel_service::config::Config;
use hotel_service::domain::hotel::ports::HotelRepository;
use hotel_service::domain::hotel::ports::RoomRepository;
use hotel_service::domain::hotel::service::HotelService;
use hotel_service::domain::user::credentials::UserCredentialStore;
use hotel_service::domain::user::ports::UserRepository;
use hotel_service::domain::user::service::UserService;
use hotel_service::inbound::http::router::create_router;
use hotel_service::inbound::http::router::AppState;
use hotel_service::outbound::repositories::InMemoryHotelRepository;
use hotel_service::outbound::repositories::InMemoryRoomRepository;
use hotel_service::outbound::repositories::InMemoryUserRepository;
use hotel_service::outbound::repositories::PostgresHotelRepository;
use hotel_service::outbound::repositories::PostgresRoomRepository;
use hotel_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

struct Repositories {
    users: Arc<dyn UserRepository>,
    hotels: Arc<dyn HotelRepository>,
    rooms: Arc<dyn RoomRepository>,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hotel_service=debug,auth=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "hotel-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;
    let database = if config.database.url.is_empty() {
        "memory"
    } else {
        "postgresql"
    };

    tracing::info!(
        http_port = config.server.http_port,
        database,
        token_lifetime_hours = config.jwt.expiration_hours,
        refresh_identity = config.gate.refresh_identity,
        "Configuration loaded"
    );

    let signing_key = SigningKey::new(&config.jwt.secret)
        .context("jwt.secret must be set (JWT__SECRET)")?;
    let authenticator = Arc::new(Authenticator::new(&signing_key, config.auth_settings()?)?);

    let repositories = connect_repositories(&config).await?;

    let user_service = Arc::new(UserService::new(
        Arc::clone(&repositories.users),
        authenticator.password_hasher().clone(),
    ));
    let hotel_service = Arc::new(HotelService::new(repositories.hotels, repositories.rooms));
    let credentials = Arc::new(UserCredentialStore::new(repositories.users));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(AppState {
        user_service,
        hotel_service,
        authenticator,
        credentials,
        refresh_identity: config.gate.refresh_identity,
    });

    axum::serve(http_listener, http_application).await?;
    tracing::info!("Server exited");

    Ok(())
}

async fn connect_repositories(config: &Config) -> Result<Repositories, anyhow::Error> {
    if config.database.url.is_empty() {
        tracing::warn!(database = "memory", "No database configured, data is not persisted");
        return Ok(Repositories {
            users: Arc::new(InMemoryUserRepository::new()),
            hotels: Arc::new(InMemoryHotelRepository::new()),
            rooms: Arc::new(InMemoryRoomRepository::new()),
        });
    }

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    Ok(Repositories {
        users: Arc::new(PostgresUserRepository::new(pg_pool.clone())),
        hotels: Arc::new(PostgresHotelRepository::new(pg_pool.clone())),
        rooms: Arc::new(PostgresRoomRepository::new(pg_pool)),
    })
}
