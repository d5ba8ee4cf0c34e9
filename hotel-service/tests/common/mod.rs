use std::sync::Arc;

use auth::AuthSettings;
use auth::Authenticator;
use auth::HashingCost;
use auth::JwtHandler;
use auth::ManualClock;
use auth::SigningKey;
use chrono::Utc;
use hotel_service::domain::hotel::models::AddRoomCommand;
use hotel_service::domain::hotel::models::CreateHotelCommand;
use hotel_service::domain::hotel::models::Hotel;
use hotel_service::domain::hotel::models::RoomType;
use hotel_service::domain::hotel::ports::HotelRepository;
use hotel_service::domain::hotel::ports::HotelServicePort;
use hotel_service::domain::hotel::ports::RoomRepository;
use hotel_service::domain::hotel::service::HotelService;
use hotel_service::domain::user::credentials::UserCredentialStore;
use hotel_service::domain::user::models::CreateUserCommand;
use hotel_service::domain::user::models::EmailAddress;
use hotel_service::domain::user::models::Password;
use hotel_service::domain::user::models::PersonName;
use hotel_service::domain::user::models::User;
use hotel_service::domain::user::ports::UserRepository;
use hotel_service::domain::user::ports::UserServicePort;
use hotel_service::domain::user::service::UserService;
use hotel_service::inbound::http::router::create_router;
use hotel_service::inbound::http::router::AppState;
use hotel_service::outbound::repositories::InMemoryHotelRepository;
use hotel_service::outbound::repositories::InMemoryRoomRepository;
use hotel_service::outbound::repositories::InMemoryUserRepository;
use serde_json::json;

pub const TEST_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const FOREIGN_SECRET: &str = "some-other-deployment-signing-key-32-bytes";

/// Test application that spawns a real server on in-memory repositories
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub clock: Arc<ManualClock>,
    pub user_service: Arc<UserService<dyn UserRepository>>,
    pub hotel_service: Arc<HotelService<dyn HotelRepository, dyn RoomRepository>>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        Self::spawn_with(false).await
    }

    /// Spawn the application, optionally re-resolving token subjects at the
    /// gate
    pub async fn spawn_with(refresh_identity: bool) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let clock = Arc::new(ManualClock::new(Utc::now()));
        let settings = AuthSettings {
            cost: HashingCost {
                memory_kib: 1024,
                iterations: 1,
                parallelism: 1,
            },
            clock: clock.clone(),
            ..AuthSettings::default()
        };
        let signing_key = SigningKey::new(TEST_SECRET).expect("Failed to build signing key");
        let authenticator = Arc::new(
            Authenticator::new(&signing_key, settings).expect("Failed to build authenticator"),
        );

        let users: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::new());
        let hotels: Arc<dyn HotelRepository> = Arc::new(InMemoryHotelRepository::new());
        let rooms: Arc<dyn RoomRepository> = Arc::new(InMemoryRoomRepository::new());

        let user_service = Arc::new(UserService::new(
            Arc::clone(&users),
            authenticator.password_hasher().clone(),
        ));
        let hotel_service = Arc::new(HotelService::new(hotels, rooms));

        let router = create_router(AppState {
            user_service: user_service.clone(),
            hotel_service: hotel_service.clone(),
            authenticator,
            credentials: Arc::new(UserCredentialStore::new(users)),
            refresh_identity,
        });

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            clock,
            user_service,
            hotel_service,
        }
    }

    /// Register a user directly through the domain service
    pub async fn create_user(&self, first_name: &str, email: &str, password: &str) -> User {
        let command = CreateUserCommand::new(
            PersonName::first_name(first_name.to_string()).unwrap(),
            PersonName::last_name("Tester".to_string()).unwrap(),
            EmailAddress::new(email.to_string()).unwrap(),
            Password::new(password.to_string()).unwrap(),
        );

        self.user_service
            .create_user(command)
            .await
            .expect("Failed to create user")
    }

    /// Create a hotel with one room of each type
    pub async fn create_hotel(&self, name: &str, rating: i32) -> Hotel {
        let command = CreateHotelCommand::new(name.to_string(), "France".to_string(), rating)
            .expect("Invalid hotel");
        let hotel = self
            .hotel_service
            .create_hotel(command)
            .await
            .expect("Failed to create hotel");

        for room_type in [
            RoomType::Single,
            RoomType::Double,
            RoomType::SeaSide,
            RoomType::Deluxe,
        ] {
            self.hotel_service
                .add_room(&hotel.id, AddRoomCommand::new(room_type, 99.9, 120.0).unwrap())
                .await
                .expect("Failed to add room");
        }

        self.hotel_service
            .get_hotel(&hotel.id)
            .await
            .expect("Failed to reload hotel")
    }

    /// Log in and return the raw response
    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/api/auth")
            .json(&json!({
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Log in and return the issued token
    pub async fn token_for(&self, email: &str, password: &str) -> String {
        let body: serde_json::Value = self
            .login(email, password)
            .await
            .json()
            .await
            .expect("Failed to parse response");

        body["data"]["token"]
            .as_str()
            .expect("No token in login response")
            .to_string()
    }

    /// Handler signing with a key this server does not trust
    pub fn foreign_jwt_handler(&self) -> JwtHandler {
        JwtHandler::new(&SigningKey::new(FOREIGN_SECRET).unwrap())
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with the X-Api-Token header
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).header("X-Api-Token", token)
    }

    /// Helper to make POST request with the X-Api-Token header
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).header("X-Api-Token", token)
    }

    /// Helper to make PUT request with the X-Api-Token header
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(format!("{}{}", self.address, path))
            .header("X-Api-Token", token)
    }

    /// Helper to make DELETE request with the X-Api-Token header
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .header("X-Api-Token", token)
    }
}
