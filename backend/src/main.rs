//! Backend entry-point: wires the HTTP server and structured logging.

use actix_web::web;
use backend::inbound::http::health::HealthState;
use backend::server::{AppSettings, create_server};
use color_eyre::eyre::{Context, Result};
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing initialisation failed; continuing without subscriber");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .context("failed to load application settings")?;
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, settings)?;
    server.await.context("server terminated abnormally")
}
