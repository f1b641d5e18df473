use std::path::PathBuf;

use anyhow::Result;
use co2_atlas::server;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(server::DEFAULT_PORT);

    let root = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("CO2_ATLAS_ROOT").ok())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    actix_web::rt::System::new().block_on(server::run(root, port))
}
