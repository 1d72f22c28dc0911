use serde::{Deserialize, Serialize};

pub const DEFAULT_DATASET_URL: &str = "data/policies.json";
pub const DEFAULT_BOUNDARY_URL: &str = "https://geo.datav.aliyun.com/areas_v3/bound/100000_full.json";

/// Where the two startup documents come from. Nothing else is configurable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_dataset_url")]
    pub dataset_url: String,
    #[serde(default = "default_boundary_url")]
    pub boundary_url: String,
}

fn default_dataset_url() -> String {
    DEFAULT_DATASET_URL.to_string()
}

fn default_boundary_url() -> String {
    DEFAULT_BOUNDARY_URL.to_string()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            dataset_url: default_dataset_url(),
            boundary_url: default_boundary_url(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("invalid dashboard config: {0}")]
pub struct ConfigError(#[from] serde_json::Error);

impl DashboardConfig {
    /// Parses a JSON config object. A blank string yields the defaults.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(raw)?)
    }
}
