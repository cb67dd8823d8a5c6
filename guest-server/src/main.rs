use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing::info;

use guest_core::service::GuestService;
use guest_core::store::PgGuestStore;
use guest_server::config::ServerConfig;
use guest_server::router::{build_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "guest_server=info,tower_http=debug".to_string()),
        )
        .init();

    dotenvy::dotenv().ok();
    let config = ServerConfig::from_env();

    info!("Connecting to database: {}", config.database_url);
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;
    sqlx::migrate!().run(&pool).await?;

    let store = Arc::new(PgGuestStore::new(pool));
    let state = AppState {
        guests: GuestService::new(store),
    };
    let app = build_router(state);

    let addr = config.bind_addr();
    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
