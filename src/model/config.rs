use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration from config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlannerConfig {
    #[serde(default)]
    pub planner: PlannerInfo,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub vision: VisionConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlannerInfo {
    /// Display name for the couple, shown in the dashboard header
    #[serde(default)]
    pub couple: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiConfig {
    /// Color overrides by role name (background, text, highlight, ...)
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisionConfig {
    /// Model used for theme generation
    #[serde(default = "default_model")]
    pub model: String,
    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

impl Default for VisionConfig {
    fn default() -> Self {
        VisionConfig {
            model: default_model(),
            api_key_env: default_api_key_env(),
        }
    }
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_gets_defaults() {
        let config: PlannerConfig = toml::from_str("").unwrap();
        assert_eq!(config.planner.couple, "");
        assert!(config.ui.colors.is_empty());
        assert_eq!(config.vision.model, "gemini-2.5-flash");
        assert_eq!(config.vision.api_key_env, "GEMINI_API_KEY");
    }

    #[test]
    fn partial_config_parses() {
        let config: PlannerConfig = toml::from_str(
            r##"
[planner]
couple = "Sam & Riley"

[ui.colors]
highlight = "#FB4196"
"##,
        )
        .unwrap();
        assert_eq!(config.planner.couple, "Sam & Riley");
        assert_eq!(config.ui.colors["highlight"], "#FB4196");
    }
}
