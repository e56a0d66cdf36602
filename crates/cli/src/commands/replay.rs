//! `replay` command implementation.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::cli::ReplayArgs;
use crate::error::CliError;
use crate::replay::{print_dashboard, Replay, ReplayConfig};

/// Execute the `replay` command
pub async fn run_replay(args: &ReplayArgs) -> Result<()> {
    info!(input = %args.input.display(), "Loading recording");

    if !args.input.exists() {
        return Err(CliError::input_not_found(args.input.display().to_string()).into());
    }
    if let Some(ref path) = args.config {
        if !path.exists() {
            return Err(CliError::config_not_found(path.display().to_string()).into());
        }
    }

    let dashboard = config_loader::ConfigLoader::load_or_default(args.config.as_deref())
        .with_context(|| match &args.config {
            Some(path) => format!("Failed to load config from {}", path.display()),
            None => "Failed to build default config".to_string(),
        })?;

    let lines = read_lines(&args.input).await?;
    info!(
        messages = lines.len(),
        stream = %dashboard.stream.url,
        points = dashboard.lidar.point_count,
        "Configuration loaded"
    );

    if args.metrics_port != 0 {
        observability::init_metrics_only(args.metrics_port)?;
    }

    let config = ReplayConfig {
        dashboard,
        interval: Duration::from_millis(args.interval_ms.max(1)),
        frame_interval: (args.fps > 0).then(|| Duration::from_secs_f64(1.0 / args.fps as f64)),
        end_with: args.end_with,
        camera: args.camera,
        surface: args.surface.0,
        seed: args.seed,
    };

    info!("Starting replay...");
    let (session, stats) = Replay::new(config, lines)
        .run(setup_shutdown_signal())
        .await
        .context("Replay execution failed")?;

    info!(
        records = stats.dashboard.records,
        malformed = stats.dashboard.malformed,
        duration_secs = stats.duration.as_secs_f64(),
        "Replay completed"
    );

    stats.print_summary();
    print_dashboard(&session);
    Ok(())
}

async fn read_lines(path: &Path) -> Result<Vec<String>, CliError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| CliError::input_read(path.display().to_string(), e))?;
    Ok(text.lines().map(str::to_owned).collect())
}

/// Setup Ctrl+C and SIGTERM signal handlers
///
/// A handler that cannot be installed never fires.
async fn setup_shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
