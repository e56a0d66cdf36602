//! # OBD Dashboard CLI
//!
//! 命令行接口入口点。
//!
//! 提供：
//! - 回放录制的遥测流 (NDJSON) 并驱动完整的 dashboard
//! - 配置加载与验证
//! - 优雅关闭处理

mod cli;
mod commands;
mod error;
mod host;
mod replay;

use anyhow::Result;
use clap::Parser;
use observability::{ObservabilityConfig, Verbosity};
use tracing::info;

use cli::{Cli, Commands};
use commands::{run_info, run_replay, run_validate};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize logging based on CLI options
    init_logging(&cli)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "OBD dashboard CLI starting"
    );

    // Execute command
    let result = match &cli.command {
        Commands::Replay(args) => run_replay(args).await,
        Commands::Validate(args) => run_validate(args),
        Commands::Info(args) => run_info(args),
    };

    if let Err(ref e) = result {
        tracing::error!(error = %e, "Command failed");
    }

    result
}

/// Initialize logging based on CLI options
///
/// The Prometheus exporter is installed later by `replay` when asked for.
fn init_logging(cli: &Cli) -> Result<()> {
    observability::init_with_config(ObservabilityConfig {
        log_format: cli.log_format.into(),
        verbosity: Verbosity::from_flags(cli.quiet, cli.verbose),
        metrics_port: None,
    })
}
