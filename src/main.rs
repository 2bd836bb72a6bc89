use {
    sqlx::postgres::PgPoolOptions,
    std::{sync::Arc, time::Duration},
    tix_sync::{
        AppState,
        adapters::midtrans_client::MidtransOracle,
        config::Config,
        infra::postgres::{
            inventory_repo::PgInventoryRelease, notification_repo::PgNotificationLog,
            ticket_repo::PgTicketStore,
        },
        services::reconcile::Reconciler,
    },
    tokio::signal,
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = Config::from_env();

    let pool = PgPoolOptions::new()
        .max_connections(20)
        .acquire_timeout(Duration::from_secs(3))
        .connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("failed to run migrations");

    let reconciler = Reconciler::new(
        Arc::new(PgTicketStore::new(pool.clone())),
        Arc::new(MidtransOracle::new(&config.server_key, config.environment)),
        Arc::new(PgInventoryRelease::new(pool.clone())),
    );

    let state = AppState {
        reconciler: Arc::new(reconciler),
        audit: Arc::new(PgNotificationLog::new(pool)),
        server_key: config.server_key.clone().into(),
    };

    let app = tix_sync::app(state);

    let listener = tokio::net::TcpListener::bind(config.addr())
        .await
        .expect("failed to bind listener");
    tracing::info!(addr = %config.addr(), environment = ?config.environment, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to listen for ctrl+c");
    };

    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to listen for SIGTERM")
            .recv()
            .await;
    };

    tokio::select! {
        _ = ctrl_c => tracing::info!("received ctrl+c, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
