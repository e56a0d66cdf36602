//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::str::FromStr;

use contracts::SurfaceSize;

/// OBD Dashboard - live vehicle telemetry dashboard, headless
#[derive(Parser, Debug)]
#[command(
    name = "obd-dashboard",
    author,
    version,
    about = "Headless OBD live dashboard",
    long_about = "Drives the live dashboard core (metric widgets, camera, simulated lidar) \n\
                  from a recorded telemetry stream and prints what the page would show."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "OBD_DASHBOARD_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "OBD_DASHBOARD_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a recorded NDJSON telemetry stream through the dashboard
    Replay(ReplayArgs),

    /// Validate configuration file
    Validate(ValidateArgs),

    /// Display the effective configuration
    Info(InfoArgs),
}

/// Arguments for the `replay` command
#[derive(Parser, Debug, Clone)]
pub struct ReplayArgs {
    /// Recorded stream: one JSON message per line
    #[arg(short, long, env = "OBD_DASHBOARD_INPUT")]
    pub input: PathBuf,

    /// Path to configuration file (TOML or JSON); built-in defaults when omitted
    #[arg(short, long, env = "OBD_DASHBOARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Delay between replayed messages in milliseconds
    #[arg(long, default_value = "100", env = "OBD_DASHBOARD_INTERVAL_MS")]
    pub interval_ms: u64,

    /// Lidar animation frame rate (0 = paint only on start)
    #[arg(long, default_value = "30", env = "OBD_DASHBOARD_FPS")]
    pub fps: u32,

    /// How the transport ends once the recording is exhausted
    #[arg(long, value_enum, default_value = "close")]
    pub end_with: EndWith,

    /// Camera behaviour; any mode but `off` toggles the camera on after connecting
    #[arg(long, value_enum, default_value = "off", env = "OBD_DASHBOARD_CAMERA")]
    pub camera: CameraMode,

    /// Lidar surface size in pixels, `WIDTHxHEIGHT`
    #[arg(long, default_value = "400x300")]
    pub surface: SurfaceArg,

    /// Seed for the lidar simulation (random when omitted)
    #[arg(long, env = "OBD_DASHBOARD_SEED")]
    pub seed: Option<u64>,

    /// Metrics server port (0 = disabled)
    #[arg(long, default_value = "0", env = "OBD_DASHBOARD_METRICS_PORT")]
    pub metrics_port: u16,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(short, long, default_value = "dashboard.toml")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Path to configuration file; built-in defaults when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Show status and camera texts
    #[arg(long)]
    pub texts: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => observability::LogFormat::Json,
            LogFormat::Pretty => observability::LogFormat::Pretty,
            LogFormat::Compact => observability::LogFormat::Compact,
        }
    }
}

/// Transport event that ends a replay
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EndWith {
    /// Orderly close
    #[default]
    Close,
    /// Transport error
    Error,
}

/// Simulated camera device
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CameraMode {
    /// Never touch the camera
    #[default]
    Off,
    /// A device that grants every request
    Simulated,
    /// A device that denies permission
    Unavailable,
}

/// `WIDTHxHEIGHT` surface size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceArg(pub SurfaceSize);

impl FromStr for SurfaceArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
        let parse = |part: &str| -> Result<f64, String> {
            let value: u32 = part
                .trim()
                .parse()
                .map_err(|_| format!("invalid dimension '{part}'"))?;
            if value == 0 {
                return Err("dimensions must be > 0".to_string());
            }
            Ok(value as f64)
        };
        Ok(Self(SurfaceSize::new(parse(w)?, parse(h)?)))
    }
}
