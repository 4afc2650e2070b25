use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::session::SessionConfig;
use crate::error::{map_io_err, AgentError, AgentResult};

/// Environment variable consulted when no classifier base URL is configured
pub const CLASSIFIER_URL_ENV: &str = "CLASSIFIER_BASE_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AgentConfig {
    #[serde(default)]
    pub learning: LearningConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningConfig {
    pub learning_rate: f64,
    pub discount_factor: f64,
    pub exploration_rate: f64,
    pub exploration_decay_episodes: f64,
    pub learning_rate_decay_episodes: f64,
    /// Fixed RNG seed for reproducible sessions
    pub seed: Option<u64>,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            discount_factor: 0.9,
            exploration_rate: 0.3,
            exploration_decay_episodes: 100.0,
            learning_rate_decay_episodes: 50.0,
            seed: None,
        }
    }
}

impl LearningConfig {
    pub fn validate(&self) -> AgentResult<()> {
        if !(self.learning_rate > 0.0 && self.learning_rate < 1.0) {
            return Err(AgentError::invalid_argument(format!(
                "learning_rate must be in (0, 1), got {}",
                self.learning_rate
            )));
        }
        if !(0.0..1.0).contains(&self.discount_factor) {
            return Err(AgentError::invalid_argument(format!(
                "discount_factor must be in [0, 1), got {}",
                self.discount_factor
            )));
        }
        if !(0.0..=1.0).contains(&self.exploration_rate) {
            return Err(AgentError::invalid_argument(format!(
                "exploration_rate must be in [0, 1], got {}",
                self.exploration_rate
            )));
        }
        for (field, value) in [
            ("exploration_decay_episodes", self.exploration_decay_episodes),
            ("learning_rate_decay_episodes", self.learning_rate_decay_episodes),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(AgentError::invalid_argument(format!(
                    "{} must be a positive number, got {}",
                    field, value
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub enabled: bool,
    pub base_url: Option<String>,
    pub endpoint: String,
    pub timeout_ms: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: None,
            endpoint: "/classify".to_string(),
            timeout_ms: 5_000,
        }
    }
}

impl ClassifierConfig {
    /// Configured base URL, or the one from the environment
    pub fn resolved_base_url(&self) -> Option<String> {
        self.base_url
            .clone()
            .or_else(|| std::env::var(CLASSIFIER_URL_ENV).ok())
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
    }
}

/// On-disk formats an agent configuration can be stored in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
    Toml,
}

impl ConfigFormat {
    /// Pick the format from the file extension
    pub fn from_path(path: &Path) -> AgentResult<Self> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        match ext.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "toml" => Ok(Self::Toml),
            _ => Err(AgentError::config_error(format!(
                "Unsupported agent config format '{}' for {} (expected json, yaml or toml)",
                ext,
                path.display()
            ))),
        }
    }

    fn parse(self, content: &str) -> Result<AgentConfig, String> {
        match self {
            Self::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            Self::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
            Self::Toml => toml::from_str(content).map_err(|e| e.to_string()),
        }
    }

    fn render(self, config: &AgentConfig) -> AgentResult<String> {
        Ok(match self {
            Self::Json => serde_json::to_string_pretty(config)?,
            Self::Yaml => serde_yaml::to_string(config)?,
            Self::Toml => toml::to_string(config)?,
        })
    }
}

impl AgentConfig {
    /// Read an agent configuration, filling missing sections with defaults
    ///
    /// The file is only parsed here; call [`AgentConfig::validate`] (or build an
    /// agent, which does) to check the learning and session sections.
    pub fn load(path: &Path) -> AgentResult<Self> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(map_io_err(path))?;

        format.parse(&content).map_err(|e| {
            AgentError::parse_error(format!(
                "Invalid agent config {} ({:?}): {}",
                path.display(),
                format,
                e
            ))
        })
    }

    pub fn save(&self, path: &Path) -> AgentResult<()> {
        let content = ConfigFormat::from_path(path)?.render(self)?;
        std::fs::write(path, content).map_err(map_io_err(path))
    }

    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("collection-agent")
            .join("config.toml")
    }

    /// Validate every section before an agent is built from it
    pub fn validate(&self) -> AgentResult<()> {
        self.learning.validate()?;
        self.session.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_match_reference_hyper_parameters() {
        let config = AgentConfig::default();
        assert_eq!(config.learning.learning_rate, 0.1);
        assert_eq!(config.learning.discount_factor, 0.9);
        assert_eq!(config.learning.exploration_rate, 0.3);
        assert_eq!(config.classifier.endpoint, "/classify");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_save_and_load_each_format() {
        let dir = tempdir().unwrap();
        let mut config = AgentConfig::default();
        config.learning.seed = Some(11);
        config.classifier.base_url = Some("http://localhost:8000".to_string());

        for name in ["agent.json", "agent.yaml", "agent.toml"] {
            let path = dir.path().join(name);
            config.save(&path).unwrap();
            let loaded = AgentConfig::load(&path).unwrap();
            assert_eq!(loaded, config, "format {name}");
        }
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("agent.toml");
        std::fs::write(&path, "[learning]\nexploration_rate = 0.1\n").unwrap();

        let loaded = AgentConfig::load(&path).unwrap();
        assert_eq!(loaded.learning.exploration_rate, 0.1);
        assert_eq!(loaded.learning.learning_rate, 0.1);
        assert_eq!(loaded.session, SessionConfig::default());
    }

    #[test]
    fn test_unsupported_extension_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("agent.ini");
        std::fs::write(&path, "x=1").unwrap();
        assert!(matches!(
            AgentConfig::load(&path),
            Err(AgentError::Config { .. })
        ));
        assert!(AgentConfig::default().save(&path).is_err());
    }

    #[test]
    fn test_invalid_learning_rate_is_rejected() {
        let learning = LearningConfig {
            learning_rate: 1.5,
            ..LearningConfig::default()
        };
        assert!(learning.validate().is_err());
    }

    #[test]
    fn test_non_finite_decay_is_rejected() {
        for decay in [f64::NAN, f64::INFINITY, 0.0, -5.0] {
            let learning = LearningConfig {
                exploration_decay_episodes: decay,
                ..LearningConfig::default()
            };
            assert!(learning.validate().is_err(), "exploration decay {decay}");

            let learning = LearningConfig {
                learning_rate_decay_episodes: decay,
                ..LearningConfig::default()
            };
            assert!(learning.validate().is_err(), "learning rate decay {decay}");
        }
    }

    #[test]
    fn test_malformed_section_names_file_and_field() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("agent.toml");
        std::fs::write(&path, "[learning]\nexploration_rate = \"high\"\n").unwrap();

        match AgentConfig::load(&path) {
            Err(AgentError::ParseError { message }) => {
                assert!(message.contains("agent.toml"), "{message}");
                assert!(message.contains("exploration_rate"), "{message}");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_format_follows_extension() {
        assert_eq!(
            ConfigFormat::from_path(Path::new("agent.YML")).unwrap(),
            ConfigFormat::Yaml
        );
        assert!(ConfigFormat::from_path(Path::new("agent")).is_err());
    }

    #[test]
    fn test_explicit_base_url_wins() {
        let config = ClassifierConfig {
            base_url: Some(" http://classifier:8000 ".to_string()),
            ..ClassifierConfig::default()
        };
        assert_eq!(
            config.resolved_base_url().as_deref(),
            Some("http://classifier:8000")
        );
    }
}
