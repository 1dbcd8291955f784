//! Server configuration from command-line flags and environment variables.

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "calc_server")]
#[command(about = "Engineering formula calculator - JSON API and web front-end", long_about = None)]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "CALC_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "CALC_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Root of the category/calculation directory tree
    #[arg(long, env = "CALC_CALCULATIONS_DIR", default_value = "calculations")]
    pub calculations_dir: PathBuf,

    /// Directory with the prebuilt front-end
    #[arg(long, env = "CALC_PUBLIC_DIR", default_value = "public")]
    pub public_dir: PathBuf,

    /// Log filter used when RUST_LOG is not set (e.g. `debug`, `calc_core=debug`)
    #[arg(long, env = "CALC_LOG", default_value = "info")]
    pub log_level: String,
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
