pub mod adapters;
pub mod config;
pub mod domain;
pub mod infra;
pub mod services;

use {
    crate::{domain::store::NotificationLog, services::reconcile::Reconciler},
    axum::{
        Router,
        extract::DefaultBodyLimit,
        routing::{get, post},
    },
    std::{sync::Arc, time::Duration},
    tower_http::timeout::TimeoutLayer,
};

#[derive(Clone)]
pub struct AppState {
    pub reconciler: Arc<Reconciler>,
    pub audit: Arc<dyn NotificationLog>,
    pub server_key: Arc<str>,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/notification",
            post(adapters::midtrans::notification_handler).get(adapters::midtrans::health_handler),
        )
        .layer(DefaultBodyLimit::max(64 * 1024)) // notifications are small JSON bodies
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .with_state(state)
}
