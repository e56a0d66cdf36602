//! 配置校验模块
//!
//! 校验规则：
//! - 占位符、状态文本、摄像头标签非空
//! - point_count > 0
//! - 0 <= cluster_probability <= 1
//! - 0 <= cluster_band.min < cluster_band.max <= 1
//! - 0 < arc_degrees <= 360
//! - 点半径、标记尺寸 > 0，origin_offset_px >= 0
//! - 颜色 alpha 在 0..=1

use contracts::{ContractError, DashboardConfig, LidarConfig, Rgba};

/// 校验 DashboardConfig 配置
///
/// 返回第一个遇到的错误，或 Ok(())。
pub fn validate(config: &DashboardConfig) -> Result<(), ContractError> {
    validate_texts(config)?;
    validate_lidar(&config.lidar)?;
    Ok(())
}

fn require_text(field: &str, value: &str) -> Result<(), ContractError> {
    if value.trim().is_empty() {
        return Err(ContractError::config_validation(
            field,
            "text cannot be empty",
        ));
    }
    Ok(())
}

/// 校验所有显示文本
fn validate_texts(config: &DashboardConfig) -> Result<(), ContractError> {
    require_text("stream.url", &config.stream.url)?;
    require_text("display.placeholder", &config.display.placeholder)?;
    require_text("display.dtc_no_fault_label", &config.display.dtc_no_fault_label)?;

    let status = &config.status;
    for (field, value) in [
        ("status.connecting", &status.connecting),
        ("status.connected", &status.connected),
        ("status.disconnected", &status.disconnected),
        ("status.connection_error", &status.connection_error),
        ("status.upstream_disconnected", &status.upstream_disconnected),
    ] {
        require_text(field, value)?;
    }

    let camera = &config.camera;
    for (field, value) in [
        ("camera.show_label", &camera.show_label),
        ("camera.hide_label", &camera.hide_label),
        ("camera.on_status", &camera.on_status),
        ("camera.off_status", &camera.off_status),
        ("camera.unavailable_label", &camera.unavailable_label),
    ] {
        require_text(field, value)?;
    }

    Ok(())
}

/// 校验点云参数
fn validate_lidar(lidar: &LidarConfig) -> Result<(), ContractError> {
    if lidar.point_count == 0 {
        return Err(ContractError::config_validation(
            "lidar.point_count",
            "point_count must be > 0",
        ));
    }

    if !(0.0..=1.0).contains(&lidar.cluster_probability) {
        return Err(ContractError::config_validation(
            "lidar.cluster_probability",
            format!(
                "cluster_probability must be within [0, 1], got {}",
                lidar.cluster_probability
            ),
        ));
    }

    let band = lidar.cluster_band;
    if !(band.min >= 0.0 && band.min < band.max && band.max <= 1.0) {
        return Err(ContractError::config_validation(
            "lidar.cluster_band",
            format!(
                "cluster_band must satisfy 0 <= min < max <= 1, got [{}, {})",
                band.min, band.max
            ),
        ));
    }

    if !(lidar.arc_degrees > 0.0 && lidar.arc_degrees <= 360.0) {
        return Err(ContractError::config_validation(
            "lidar.arc_degrees",
            format!("arc_degrees must be within (0, 360], got {}", lidar.arc_degrees),
        ));
    }

    for (field, value) in [
        ("lidar.point_radius_px", lidar.point_radius_px),
        ("lidar.marker_width_px", lidar.marker_width_px),
        ("lidar.marker_height_px", lidar.marker_height_px),
    ] {
        if !(value > 0.0) {
            return Err(ContractError::config_validation(
                field,
                format!("must be > 0, got {value}"),
            ));
        }
    }

    if !(lidar.origin_offset_px >= 0.0) {
        return Err(ContractError::config_validation(
            "lidar.origin_offset_px",
            format!("must be >= 0, got {}", lidar.origin_offset_px),
        ));
    }

    for (field, color) in [
        ("lidar.background", lidar.background),
        ("lidar.marker_color", lidar.marker_color),
        ("lidar.point_color", lidar.point_color),
    ] {
        validate_color(field, color)?;
    }

    Ok(())
}

fn validate_color(field: &str, color: Rgba) -> Result<(), ContractError> {
    if !(0.0..=1.0).contains(&color.a) {
        return Err(ContractError::config_validation(
            format!("{field}.a"),
            format!("alpha must be within [0, 1], got {}", color.a),
        ));
    }
    Ok(())
}
