use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;
use warp::Filter;

use agentdash::auth;
use agentdash::db::{Database, DatabaseConfig};
use agentdash::routes::{configure_routes, handle_rejection};
use agentdash::settings::Settings;
use agentdash::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("agentdash=info")),
        )
        .init();

    let settings = Settings::load()?;

    let db_config = DatabaseConfig::from_connection_string(&settings.database.url)?
        .with_max_pool_size(settings.database.max_pool_size);
    let db = Database::connect(&db_config).await?;
    tracing::info!("database ready");

    auth::seed_admin(&db, &settings.admin).await?;

    let state = AppState::new(&settings, db)?;
    if !state.agent.is_configured() {
        tracing::warn!("agent webhook URL is not set; /api/chat will fail");
    }

    let addr: SocketAddr = settings.server.address().parse()?;
    let routes = configure_routes(state).recover(handle_rejection);

    tracing::info!(%addr, "starting server");
    warp::serve(routes).run(addr).await;
    Ok(())
}
