//! `info` command implementation.

use anyhow::{Context, Result};
use contracts::{DashboardConfig, Rgba};
use serde::Serialize;
use tracing::info;

use crate::cli::InfoArgs;
use crate::error::CliError;

/// Configuration info for JSON output
#[derive(Serialize)]
struct ConfigInfo {
    version: String,
    source: String,
    stream_url: String,
    display: DisplayInfo,
    lidar: LidarInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    texts: Option<TextsInfo>,
}

#[derive(Serialize)]
struct DisplayInfo {
    placeholder: String,
    dtc_no_fault_sentinel: String,
    dtc_no_fault_label: String,
}

#[derive(Serialize)]
struct LidarInfo {
    point_count: u32,
    arc_degrees: f64,
    cluster_probability: f64,
    cluster_band: [f64; 2],
    origin_offset_px: f64,
    point_color: String,
}

#[derive(Serialize)]
struct TextsInfo {
    status: Vec<(String, String)>,
    camera: Vec<(String, String)>,
}

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    let source = match &args.config {
        Some(path) => {
            info!(config = %path.display(), "Loading configuration info");
            if !path.exists() {
                return Err(CliError::config_not_found(path.display().to_string()).into());
            }
            path.display().to_string()
        }
        None => "(built-in defaults)".to_string(),
    };

    let config = config_loader::ConfigLoader::load_or_default(args.config.as_deref())
        .with_context(|| format!("Failed to load config from {source}"))?;

    let info = build_config_info(&config, &source, args.texts);
    if args.json {
        let json =
            serde_json::to_string_pretty(&info).context("Failed to serialize config info")?;
        println!("{}", json);
    } else {
        print_config_info(&info);
    }

    Ok(())
}

fn hex(color: Rgba) -> String {
    if color.a < 1.0 {
        format!("#{:02x}{:02x}{:02x} @ {:.2}", color.r, color.g, color.b, color.a)
    } else {
        format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
    }
}

fn pairs(items: &[(&str, &String)]) -> Vec<(String, String)> {
    items
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn build_config_info(config: &DashboardConfig, source: &str, texts: bool) -> ConfigInfo {
    let lidar = &config.lidar;
    let texts = texts.then(|| {
        let status = &config.status;
        let camera = &config.camera;
        TextsInfo {
            status: pairs(&[
                ("connecting", &status.connecting),
                ("connected", &status.connected),
                ("disconnected", &status.disconnected),
                ("connection_error", &status.connection_error),
                ("upstream_disconnected", &status.upstream_disconnected),
            ]),
            camera: pairs(&[
                ("show_label", &camera.show_label),
                ("hide_label", &camera.hide_label),
                ("on_status", &camera.on_status),
                ("off_status", &camera.off_status),
                ("acquiring_placeholder", &camera.acquiring_placeholder),
                ("paused_placeholder", &camera.paused_placeholder),
                ("unavailable_label", &camera.unavailable_label),
                ("unavailable_placeholder", &camera.unavailable_placeholder),
            ]),
        }
    });

    ConfigInfo {
        version: format!("{:?}", config.version),
        source: source.to_string(),
        stream_url: config.stream.url.clone(),
        display: DisplayInfo {
            placeholder: config.display.placeholder.clone(),
            dtc_no_fault_sentinel: config.display.dtc_no_fault_sentinel.clone(),
            dtc_no_fault_label: config.display.dtc_no_fault_label.clone(),
        },
        lidar: LidarInfo {
            point_count: lidar.point_count,
            arc_degrees: lidar.arc_degrees,
            cluster_probability: lidar.cluster_probability,
            cluster_band: [lidar.cluster_band.min, lidar.cluster_band.max],
            origin_offset_px: lidar.origin_offset_px,
            point_color: hex(lidar.point_color),
        },
        texts,
    }
}

fn print_config_info(info: &ConfigInfo) {
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║               OBD Dashboard Configuration                    ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    println!("📍 Source");
    println!("   ├─ Version: {}", info.version);
    println!("   ├─ File: {}", info.source);
    println!("   └─ Stream: {}", info.stream_url);

    println!("\n📊 Metrics");
    println!("   ├─ Placeholder: {}", info.display.placeholder);
    println!(
        "   └─ DTC: sentinel '{}' shown as '{}'",
        info.display.dtc_no_fault_sentinel, info.display.dtc_no_fault_label
    );

    let lidar = &info.lidar;
    println!("\n📡 Lidar");
    println!("   ├─ Points per frame: {}", lidar.point_count);
    println!("   ├─ Scan arc: {}°", lidar.arc_degrees);
    println!(
        "   ├─ Clusters: p={} in [{}, {}) of range",
        lidar.cluster_probability, lidar.cluster_band[0], lidar.cluster_band[1]
    );
    println!("   ├─ Origin offset: {} px", lidar.origin_offset_px);
    println!("   └─ Point colour: {}", lidar.point_color);

    if let Some(ref texts) = info.texts {
        for (title, items) in [("💬 Status", &texts.status), ("📷 Camera", &texts.camera)] {
            println!("\n{}", title);
            for (i, (key, value)) in items.iter().enumerate() {
                let prefix = if i == items.len() - 1 { "└─" } else { "├─" };
                println!("   {} {}: {}", prefix, key, value);
            }
        }
    }

    println!();
}
