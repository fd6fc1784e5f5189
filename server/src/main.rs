use axum::Router;
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use eventboard_server::config::Config;
use eventboard_server::routes::create_routes;
use eventboard_server::state::AppState;
use eventboard_server::store::SharedEventStore;

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env().expect("Invalid configuration");
    tracing::info!(seed_policy = %config.seed_policy, "Configuration loaded");

    let events = SharedEventStore::new();
    events
        .hydrate(config.build_storage(), config.seed_policy)
        .await;

    let state = AppState::new(events, config.placeholder_creator_id.as_str());
    let app: Router = create_routes(state, &config);

    tracing::info!("🚀 Server running at http://{}", config.bind_addr);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app).await.expect("Server failed");
}
