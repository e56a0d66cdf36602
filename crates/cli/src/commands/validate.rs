//! `validate` command implementation.

use anyhow::{Context, Result};
use contracts::DashboardConfig;
use serde::Serialize;
use tracing::info;

use crate::cli::ValidateArgs;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    config_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<ConfigSummary>,
}

#[derive(Serialize)]
struct ConfigSummary {
    version: String,
    stream_url: String,
    placeholder: String,
    lidar_points: u32,
    camera_facing: String,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(config = %args.config.display(), "Validating configuration");

    let result = validate_config(args);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Configuration validation failed")
    }
}

fn validate_config(args: &ValidateArgs) -> ValidationResult {
    let config_path = args.config.display().to_string();

    // Check file exists
    if !args.config.exists() {
        return ValidationResult {
            valid: false,
            config_path,
            error: Some(format!("File not found: {}", args.config.display())),
            warnings: None,
            summary: None,
        };
    }

    // Try to load and validate
    match config_loader::ConfigLoader::load_from_path(&args.config) {
        Ok(config) => {
            let warnings = collect_warnings(&config);
            ValidationResult {
                valid: true,
                config_path,
                error: None,
                warnings: if warnings.is_empty() {
                    None
                } else {
                    Some(warnings)
                },
                summary: Some(ConfigSummary {
                    version: format!("{:?}", config.version),
                    stream_url: config.stream.url.clone(),
                    placeholder: config.display.placeholder.clone(),
                    lidar_points: config.lidar.point_count,
                    camera_facing: format!("{:?}", config.camera.facing),
                }),
            }
        }
        Err(e) => ValidationResult {
            valid: false,
            config_path,
            error: Some(e.to_string()),
            warnings: None,
            summary: None,
        },
    }
}

/// Collect configuration warnings (non-fatal issues)
fn collect_warnings(config: &DashboardConfig) -> Vec<String> {
    let mut warnings = Vec::new();

    if config.display.dtc_no_fault_sentinel.is_empty() {
        warnings.push(
            "display.dtc_no_fault_sentinel is empty - only empty codes count as no fault"
                .to_string(),
        );
    }

    if config.display.placeholder == config.display.dtc_no_fault_label {
        warnings.push(
            "display.placeholder equals dtc_no_fault_label - missing and clear DTC look the same"
                .to_string(),
        );
    }

    if config.lidar.cluster_probability == 0.0 {
        warnings.push("lidar.cluster_probability is 0 - no obstacle clusters".to_string());
    }

    if config.lidar.point_count > 5000 {
        warnings.push(format!(
            "lidar.point_count is {} - painting may not keep up with the frame rate",
            config.lidar.point_count
        ));
    }

    warnings
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Configuration is valid: {}", result.config_path);

        if let Some(ref summary) = result.summary {
            println!("\n  Version: {}", summary.version);
            println!("  Stream: {}", summary.stream_url);
            println!("  Placeholder: {}", summary.placeholder);
            println!("  Lidar points: {}", summary.lidar_points);
            println!("  Camera facing: {}", summary.camera_facing);
        }

        if let Some(ref warnings) = result.warnings {
            println!("\n⚠ Warnings:");
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("✗ Configuration is invalid: {}", result.config_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}
