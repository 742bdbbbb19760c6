use anyhow::Result;
use arealens_gemini::GeminiConfig;
use arealens_server::ServerOptions;
use arealens_server::run_server;
use clap::Parser;
use std::path::PathBuf;

/// Serve the real estate analysis API over HTTP.
#[derive(Debug, Parser)]
#[command(name = "arealens-server", version)]
struct Cli {
    /// Address to bind, e.g. 0.0.0.0:8000
    #[arg(
        long,
        value_name = "ADDR",
        default_value = "127.0.0.1:8000",
        env = "AREALENS_ADDR"
    )]
    addr: String,

    /// Path to the dataset snapshot CSV
    #[arg(
        long,
        value_name = "PATH",
        default_value = "data/sample_data.csv",
        env = "AREALENS_DATA"
    )]
    data: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let opts = ServerOptions {
        addr: cli.addr,
        data_path: cli.data,
        gemini: GeminiConfig::from_env(),
    };
    run_server(opts).await
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();
}
