use std::{net::SocketAddr, path::PathBuf};

use clap::Parser;

/// Runtime configuration. Flags override the matching environment variables.
#[derive(Debug, Clone, Parser)]
#[command(name = "bike_store")]
#[command(about = "Bike inventory HTTP service backed by a JSON file")]
pub struct AppConfig {
    /// Address the HTTP server binds to
    #[arg(long = "bind", env = "BIKESTORE_BIND", default_value = "127.0.0.1:8080")]
    pub bind_addr: SocketAddr,

    /// JSON file holding the bike collection
    #[arg(long, env = "BIKESTORE_DATA_FILE", default_value = "bikes.json")]
    pub data_file: PathBuf,
}
