use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_H_GAP: f64 = 160.0;
pub const DEFAULT_V_GAP: f64 = 80.0;

/// Spacing used to turn rounds and rows into coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Horizontal distance between consecutive rounds.
    pub h_gap: f64,
    /// Vertical distance between consecutive leaf rows.
    pub v_gap: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            h_gap: DEFAULT_H_GAP,
            v_gap: DEFAULT_V_GAP,
        }
    }
}

impl LayoutConfig {
    pub fn with_gaps(h_gap: f64, v_gap: f64) -> Self {
        Self { h_gap, v_gap }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub layout: LayoutConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    h_gap: Option<f64>,
    v_gap: Option<f64>,
    pretty: Option<bool>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed: ConfigFile = serde_json::from_str(&contents)?;
    tracing::debug!(path = %path.display(), "loaded config file");
    Ok(apply_config_file(config, parsed))
}

fn apply_config_file(mut config: Config, parsed: ConfigFile) -> Config {
    if let Some(v) = parsed.h_gap {
        config.layout.h_gap = v;
    }
    if let Some(v) = parsed.v_gap {
        config.layout.v_gap = v;
    }
    if let Some(v) = parsed.pretty {
        config.output.pretty = v;
    }
    config
}
