use std::net::SocketAddr;
use std::sync::Arc;

use roam_api::{app, AppState};
use roam_store::{
    DbClient, StoreBookingRepository, StoreExperienceRepository, StorePromoRepository,
    StoreSlotRepository,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roam_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = roam_store::Config::load().expect("Failed to load config");
    tracing::info!("Starting Roam API on port {}", config.server.port);

    let db = DbClient::new(&config.database.url)
        .await
        .expect("Failed to connect to Postgres");
    db.migrate().await.expect("Failed to run migrations");

    let pool = db.pool.clone();
    let state = AppState::new(
        Arc::new(StoreExperienceRepository::new(pool.clone())),
        Arc::new(StoreSlotRepository::new(pool.clone())),
        Arc::new(StorePromoRepository::new(pool.clone())),
        Arc::new(StoreBookingRepository::new(pool)),
    );

    let app = app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
