//! Backend entry-point: loads settings, wires adapters and serves the API.

mod server;

use std::io;

use ortho_config::OrthoConfig;
use tracing::{error, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use survey_backend::settings::ServerSettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load().map_err(|err| {
        error!(error = %err, "failed to load server settings");
        io::Error::new(io::ErrorKind::InvalidInput, err.to_string())
    })?;
    let config = ServerConfig::from_settings(settings)?;
    let server = create_server(config)?;
    server.await
}
