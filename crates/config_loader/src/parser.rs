//! 配置解析模块
//!
//! 支持 TOML (主要) 和 JSON 格式。所有字段都有默认值，空文件也是合法配置。

use contracts::{ContractError, DashboardConfig};

/// 配置文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML 格式 (推荐)
    Toml,
    /// JSON 格式
    Json,
}

impl ConfigFormat {
    /// 从文件扩展名推断格式
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// 解析 TOML 格式配置
pub fn parse_toml(content: &str) -> Result<DashboardConfig, ContractError> {
    toml::from_str(content).map_err(|e| ContractError::ConfigParse {
        message: format!("TOML parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

/// 解析 JSON 格式配置
///
/// 空白内容视为 `{}`。
pub fn parse_json(content: &str) -> Result<DashboardConfig, ContractError> {
    let content = if content.trim().is_empty() { "{}" } else { content };
    serde_json::from_str(content).map_err(|e| ContractError::ConfigParse {
        message: format!("JSON parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

/// 根据格式解析配置
pub fn parse(content: &str, format: ConfigFormat) -> Result<DashboardConfig, ContractError> {
    match format {
        ConfigFormat::Toml => parse_toml(content),
        ConfigFormat::Json => parse_json(content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::Facing;

    #[test]
    fn test_parse_empty_toml() {
        let config = parse_toml("").unwrap();
        assert_eq!(config.display.placeholder, "---");
        assert_eq!(config.lidar.point_count, 200);
    }

    #[test]
    fn test_parse_empty_json() {
        let config = parse_json("  \n").unwrap();
        assert_eq!(config.stream.url, "ws://localhost:8765");
    }

    #[test]
    fn test_parse_toml_sections() {
        let content = r#"
[stream]
url = "ws://192.168.4.1:8765"

[display]
placeholder = "N/A"

[camera]
facing = "user"

[lidar]
point_count = 64
cluster_band = { min = 0.1, max = 0.3 }
marker_color = { r = 255, g = 0, b = 0 }
"#;
        let config = parse_toml(content).unwrap();
        assert_eq!(config.stream.url, "ws://192.168.4.1:8765");
        assert_eq!(config.display.placeholder, "N/A");
        assert_eq!(config.display.dtc_no_fault_label, "None");
        assert_eq!(config.camera.facing, Facing::User);
        assert_eq!(config.lidar.point_count, 64);
        assert_eq!(config.lidar.cluster_band.max, 0.3);
        assert_eq!(config.lidar.marker_color.r, 255);
        assert_eq!(config.lidar.marker_color.a, 1.0);
    }

    #[test]
    fn test_parse_json_sections() {
        let content = r#"{
            "status": { "connected": "Online" },
            "lidar": { "arc_degrees": 120.0, "point_color": { "r": 1, "g": 2, "b": 3, "a": 0.5 } }
        }"#;
        let config = parse_json(content).unwrap();
        assert_eq!(config.status.connected, "Online");
        assert_eq!(config.status.connecting, "Status: Connecting to server...");
        assert_eq!(config.lidar.arc_degrees, 120.0);
        assert_eq!(config.lidar.point_color.a, 0.5);
    }

    #[test]
    fn test_parse_toml_syntax_error() {
        let result = parse_toml("invalid toml [[[");
        assert!(matches!(result, Err(ContractError::ConfigParse { .. })));
    }

    #[test]
    fn test_parse_unknown_facing() {
        let result = parse_toml("[camera]\nfacing = \"sideways\"\n");
        assert!(matches!(result, Err(ContractError::ConfigParse { .. })));
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            ConfigFormat::from_extension("toml"),
            Some(ConfigFormat::Toml)
        );
        assert_eq!(
            ConfigFormat::from_extension("TOML"),
            Some(ConfigFormat::Toml)
        );
        assert_eq!(
            ConfigFormat::from_extension("json"),
            Some(ConfigFormat::Json)
        );
        assert_eq!(ConfigFormat::from_extension("yaml"), None);
    }
}
