use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::authenticate::authenticate;
use super::handlers::create_user::create_user;
use super::handlers::delete_user::delete_user;
use super::handlers::get_hotel::get_hotel;
use super::handlers::get_hotel_rooms::get_hotel_rooms;
use super::handlers::get_user::get_user;
use super::handlers::list_hotels::list_hotels;
use super::handlers::list_users::list_users;
use super::handlers::logout::logout;
use super::handlers::update_user::update_user;
use super::middleware::authenticate as auth_middleware;
use crate::domain::hotel::ports::HotelServicePort;
use crate::domain::user::credentials::UserCredentialStore;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub hotel_service: Arc<dyn HotelServicePort>,
    pub authenticator: Arc<Authenticator>,
    pub credentials: Arc<UserCredentialStore>,
    /// Re-resolve the token subject on every gated request.
    pub refresh_identity: bool,
}

pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new().route("/api/auth", post(authenticate));

    let protected_routes = Router::new()
        .route("/api/v1/user", post(create_user).get(list_users))
        .route(
            "/api/v1/user/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/api/v1/hotel", get(list_hotels))
        .route("/api/v1/hotel/:id", get(get_hotel))
        .route("/api/v1/hotel/:id/rooms", get(get_hotel_rooms))
        .route("/api/v1/auth/logout", post(logout))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Headers stay out of the span; the access token travels in one
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer)
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
