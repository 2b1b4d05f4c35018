use std::sync::Arc;

use orrery::server::{
    config::Config, model::app::AppState, router, service::auth::TokenKeys, startup,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: Config) -> Result<(), orrery::server::error::Error> {
    let db = startup::connect_to_database(&config).await?;
    startup::bootstrap_admin(&config, &db).await?;
    let blacklist = startup::connect_to_blacklist(&config).await?;
    let images = startup::build_image_storage(&config).await?;

    let state = AppState {
        db,
        tokens: Arc::new(TokenKeys::new(
            config.jwt_secret.as_bytes(),
            config.jwt_ttl_seconds,
        )),
        blacklist,
        images,
    };

    let app = router::routes(&config.image_dir, &config.image_base_url).with_state(state);

    let listener = TcpListener::bind(&config.bind_address).await?;
    tracing::info!("Listening at http://{}", config.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
            }
        })
        .await?;

    tracing::info!("Server stopped");

    Ok(())
}
