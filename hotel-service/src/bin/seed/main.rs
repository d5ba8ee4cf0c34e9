use std::sync::Arc;

use anyhow::Context;
use config::Environment;
use hotel_service::config::Config;
use hotel_service::domain::hotel::service::HotelService;
use hotel_service::domain::user::models::CreateUserCommand;
use hotel_service::domain::user::models::EmailAddress;
use hotel_service::domain::user::models::Password;
use hotel_service::domain::user::models::PersonName;
use hotel_service::domain::user::ports::UserServicePort;
use hotel_service::domain::user::service::UserService;
use hotel_service::outbound::repositories::PostgresHotelRepository;
use hotel_service::outbound::repositories::PostgresRoomRepository;
use hotel_service::outbound::repositories::PostgresUserRepository;
use hotel_service::seed::seed_demo_hotels;
use hotel_service::user::errors::UserError;
use serde::Deserialize;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Admin account created by the seeder, read from `SEED__EMAIL` and
/// `SEED__PASSWORD`.
#[derive(Deserialize)]
struct SeedConfig {
    email: String,
    password: String,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hotel_service=info,seed=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;
    let seed: SeedConfig = config::Config::builder()
        .add_source(Environment::with_prefix("SEED").separator("__"))
        .build()?
        .try_deserialize()
        .context("SEED__EMAIL and SEED__PASSWORD must be set")?;

    anyhow::ensure!(
        !config.database.url.is_empty(),
        "database.url must be set (DATABASE__URL) to seed"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    sqlx::migrate!("./migrations").run(&pg_pool).await?;

    let password_hasher = auth::PasswordHasher::with_cost(config.password)?;
    let user_service = UserService::new(
        Arc::new(PostgresUserRepository::new(pg_pool.clone())),
        password_hasher,
    );
    let hotel_service = HotelService::new(
        Arc::new(PostgresHotelRepository::new(pg_pool.clone())),
        Arc::new(PostgresRoomRepository::new(pg_pool)),
    );

    let admin = CreateUserCommand::new(
        PersonName::first_name("Admin".to_string())?,
        PersonName::last_name("Admin".to_string())?,
        EmailAddress::new(seed.email)?,
        Password::new(seed.password)?,
    );
    match user_service.create_user(admin).await {
        Ok(user) => tracing::info!(user_id = %user.id, email = %user.email, "Admin user seeded"),
        Err(UserError::EmailAlreadyExists(email)) => {
            tracing::info!(email = %email, "Admin user already present")
        }
        Err(e) => return Err(e.into()),
    }

    let created = seed_demo_hotels(&hotel_service).await?;
    tracing::info!(hotels = created.len(), "Seeding complete");

    Ok(())
}
