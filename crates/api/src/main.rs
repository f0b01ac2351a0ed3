mod routes;
mod state;

use common_artydrop::{get_db_pool, settings};
use state::AppState;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings().logging.level)),
        )
        .init();

    start_server().await?;
    Ok(())
}

async fn start_server() -> color_eyre::Result<()> {
    let pool = get_db_pool().await?;
    let state = AppState::new(pool);

    let app = routes::create_router(state);

    let api_settings = &settings().api;
    let addr = format!("{}:{}", api_settings.host, api_settings.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {addr}");
    axum::serve(listener, app).await?;
    Ok(())
}
