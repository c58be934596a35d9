use crate::error::{AsdlcError, Result};
use crate::paths;
use crate::types::ProjectType;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// ConfigWarning
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub message: String,
}

// ---------------------------------------------------------------------------
// LlmConfig
// ---------------------------------------------------------------------------

/// Per-project overrides for the plan generator. Every field is optional;
/// environment variables take precedence over these values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

// ---------------------------------------------------------------------------
// ProjectConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub name: String,
    #[serde(default)]
    pub project_type: ProjectType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// ---------------------------------------------------------------------------
// Config (top-level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    pub project: ProjectConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm: Option<LlmConfig>,
}

fn default_version() -> u32 {
    1
}

impl Config {
    pub fn new(project_name: impl Into<String>, project_type: ProjectType) -> Self {
        Self {
            version: 1,
            project: ProjectConfig {
                name: project_name.into(),
                project_type,
                description: None,
            },
            llm: None,
        }
    }

    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Err(AsdlcError::NotInitialized);
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    /// Load the config if present. Projects created by hand may only carry
    /// `PROJECT_CONTEXT.md`, so a missing file is not an error here.
    pub fn load_optional(root: &Path) -> Result<Option<Self>> {
        match Self::load(root) {
            Ok(cfg) => Ok(Some(cfg)),
            Err(AsdlcError::NotInitialized) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.project.name.trim().is_empty() {
            warnings.push(ConfigWarning {
                message: "project.name is empty".to_string(),
            });
        }

        if let Some(llm) = &self.llm {
            if llm.max_tokens == Some(0) {
                warnings.push(ConfigWarning {
                    message: "llm.max_tokens is 0; plans will come back empty".to_string(),
                });
            }
            if let Some(t) = llm.temperature {
                if !(0.0..=2.0).contains(&t) {
                    warnings.push(ConfigWarning {
                        message: format!("llm.temperature={t} is outside 0.0-2.0"),
                    });
                }
            }
            if let Some(url) = &llm.base_url {
                if !url.starts_with("http://") && !url.starts_with("https://") {
                    warnings.push(ConfigWarning {
                        message: format!("llm.base_url '{url}' is not an http(s) URL"),
                    });
                }
            }
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::new("todo-app", ProjectType::Cli);
        let yaml = serde_yaml::to_string(&cfg).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.project.name, "todo-app");
        assert_eq!(parsed.project.project_type, ProjectType::Cli);
        assert_eq!(parsed.version, 1);
    }

    #[test]
    fn config_without_llm_backward_compat() {
        let yaml = "version: 1\nproject:\n  name: my-project\n";
        let cfg: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(cfg.llm.is_none());
        assert_eq!(cfg.project.project_type, ProjectType::WebApi);

        let out = serde_yaml::to_string(&cfg).unwrap();
        assert!(!out.contains("llm"));
    }

    #[test]
    fn config_with_llm_section() {
        let yaml = r#"
version: 1
project:
  name: my-project
  project_type: mobile
llm:
  model: gpt-4o-mini
  max_tokens: 1024
"#;
        let cfg: Config = serde_yaml::from_str(yaml).unwrap();
        let llm = cfg.llm.unwrap();
        assert_eq!(llm.model.as_deref(), Some("gpt-4o-mini"));
        assert_eq!(llm.max_tokens, Some(1024));
        assert!(llm.temperature.is_none());
    }

    #[test]
    fn load_missing_is_not_initialized() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            Config::load(dir.path()),
            Err(AsdlcError::NotInitialized)
        ));
        assert!(Config::load_optional(dir.path()).unwrap().is_none());
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        Config::new("saved", ProjectType::Desktop)
            .save(dir.path())
            .unwrap();
        let cfg = Config::load(dir.path()).unwrap();
        assert_eq!(cfg.project.name, "saved");
    }

    #[test]
    fn validate_clean_config_no_warnings() {
        assert!(Config::new("ok", ProjectType::Cli).validate().is_empty());
    }

    #[test]
    fn validate_flags_bad_llm_values() {
        let mut cfg = Config::new("ok", ProjectType::Cli);
        cfg.llm = Some(LlmConfig {
            model: None,
            max_tokens: Some(0),
            temperature: Some(3.5),
            base_url: Some("ftp://example".to_string()),
        });
        let warnings = cfg.validate();
        assert_eq!(warnings.len(), 3);
        assert!(warnings.iter().any(|w| w.message.contains("max_tokens")));
        assert!(warnings.iter().any(|w| w.message.contains("temperature=3.5")));
        assert!(warnings.iter().any(|w| w.message.contains("ftp://example")));
    }
}
