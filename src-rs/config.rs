use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Provider preset offered to the shell: where the provider's API lives and
/// which models the picker lists. Presets never carry credentials; the model
/// list is advisory only and is not enforced by the adapters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderPreset {
    #[serde(rename = "provider_id", alias = "provider_name")]
    pub provider_id: String,

    #[serde(default)]
    pub provider_brand: String,

    /// Base URL for the provider API
    pub base_url: String,

    /// List of models the shell offers for this provider
    #[serde(default)]
    pub models: Vec<String>,

    #[serde(default)]
    pub provider_desc: String,
}

/// User override configuration (restricted fields)
#[derive(Deserialize)]
pub struct UserOverrideConfig {
    pub providers: Option<Vec<UserProviderPreset>>,
}

/// User provider entry (matching user schema)
#[derive(Deserialize)]
pub struct UserProviderPreset {
    #[serde(rename = "provider_id", alias = "provider_name")]
    pub provider_id: String,

    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default)]
    pub models: Vec<String>,
}

/// Global application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub provider_presets: Vec<ProviderPreset>,
}

impl AppConfig {
    /// Load configuration with layered strategy:
    /// 1. Defaults (Embedded Config.toml)
    /// 2. User Config (~/.promptpad/promptpad.json) - Only providers
    /// 3. Project Config (./.promptpad/promptpad.json) - Only providers
    pub fn load() -> Result<Self> {
        let default_str = include_str!("../Config.toml");
        let mut config: AppConfig =
            toml::from_str(default_str).context("Failed to parse embedded Config.toml")?;

        if let Some(home) = dirs::home_dir() {
            let user_path = home.join(".promptpad").join("promptpad.json");
            Self::apply_patch(&mut config, user_path);
        }

        let project_path = Path::new(".promptpad").join("promptpad.json");
        Self::apply_patch(&mut config, project_path);

        Ok(config)
    }

    /// Resolved base URL for a provider id, if a preset exists.
    pub fn base_url_for(&self, provider_id: &str) -> Option<&str> {
        self.provider_presets
            .iter()
            .find(|p| p.provider_id == provider_id)
            .map(|p| p.base_url.as_str())
            .filter(|url| !url.trim().is_empty())
    }

    pub(crate) fn apply_patch<P: AsRef<Path>>(config: &mut AppConfig, path: P) {
        let path = path.as_ref();
        if !path.exists() {
            return;
        }
        let Ok(content) = fs::read_to_string(path) else {
            return;
        };

        // Parse as UserOverrideConfig to restrict fields
        match serde_json::from_str::<UserOverrideConfig>(&content) {
            Ok(patch) => {
                let Some(providers) = patch.providers else {
                    return;
                };
                for entry in providers {
                    let Some(preset) = config
                        .provider_presets
                        .iter_mut()
                        .find(|p| p.provider_id == entry.provider_id)
                    else {
                        log::warn!(
                            "Ignoring config patch for unsupported provider {}",
                            entry.provider_id
                        );
                        continue;
                    };
                    if let Some(base_url) = entry
                        .base_url
                        .as_deref()
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                    {
                        preset.base_url = base_url.to_string();
                    }
                    if !entry.models.is_empty() {
                        preset.models = entry.models;
                    }
                }
            }
            Err(e) => {
                eprintln!(
                    "Warning: Failed to parse config patch at {}: {}",
                    path.display(),
                    e
                );
            }
        }
    }
}
