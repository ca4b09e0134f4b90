//! Configuration loading, validation, and management for clawbridge.
//!
//! Loads configuration from `~/.clawbridge/config.toml` with environment
//! variable overrides. Validates all settings at startup; the assembler
//! treats the loaded values as an immutable snapshot per request.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.clawbridge/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Default tracing filter level when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Prompt assembly settings
    #[serde(default)]
    pub prompt: PromptConfig,
}

/// Settings consumed by the prompt assembler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptConfig {
    /// Prepend the instruction line that forbids artifact-wrapped code
    /// blocks in favor of markdown fences
    #[serde(default)]
    pub disable_artifacts: bool,

    /// Upper bound on the number of messages kept in the forwarded history
    #[serde(default = "default_max_context_messages")]
    pub max_context_messages: usize,

    /// Replacement prompt used when the assembled prompt is too large for
    /// the downstream model and the conversation is shipped out-of-band
    #[serde(default = "default_big_context_prompt")]
    pub big_context_prompt: String,
}

fn default_log_level() -> String {
    "info".into()
}
fn default_max_context_messages() -> usize {
    10
}
fn default_big_context_prompt() -> String {
    "You must immediately read the attached context file and reply to the \
     most recent user message in it, in the same language as the conversation."
        .into()
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            disable_artifacts: false,
            max_context_messages: default_max_context_messages(),
            big_context_prompt: default_big_context_prompt(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            prompt: PromptConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.clawbridge/config.toml).
    ///
    /// Environment variables take priority over the file:
    /// - `CLAWBRIDGE_DISABLE_ARTIFACTS` (`true`/`1`)
    /// - `CLAWBRIDGE_MAX_CONTEXT_MESSAGES`
    /// - `CLAWBRIDGE_BIG_CONTEXT_PROMPT`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;

        if let Ok(raw) = std::env::var("CLAWBRIDGE_DISABLE_ARTIFACTS") {
            config.prompt.disable_artifacts = matches!(raw.as_str(), "true" | "1");
        }

        if let Ok(raw) = std::env::var("CLAWBRIDGE_MAX_CONTEXT_MESSAGES") {
            let max = raw.parse().map_err(|_| {
                ConfigError::ValidationError(format!(
                    "CLAWBRIDGE_MAX_CONTEXT_MESSAGES must be a positive integer, got {raw:?}"
                ))
            })?;
            config.prompt.max_context_messages = max;
        }

        if let Ok(prompt) = std::env::var("CLAWBRIDGE_BIG_CONTEXT_PROMPT") {
            config.prompt.big_context_prompt = prompt;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".clawbridge")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.prompt.max_context_messages == 0 {
            return Err(ConfigError::ValidationError(
                "prompt.max_context_messages must be >= 1".into(),
            ));
        }

        if self.prompt.big_context_prompt.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "prompt.big_context_prompt must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Generate a default config TOML string (for first-run scaffolding).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&Self::default()).unwrap_or_default()
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigError> for clawbridge_core::Error {
    fn from(err: ConfigError) -> Self {
        clawbridge_core::Error::Config {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.log_level, "info");
        assert!(!config.prompt.disable_artifacts);
        assert_eq!(config.prompt.max_context_messages, 10);
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(
            parsed.prompt.max_context_messages,
            config.prompt.max_context_messages
        );
        assert_eq!(
            parsed.prompt.big_context_prompt,
            config.prompt.big_context_prompt
        );
    }

    #[test]
    fn load_from_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.prompt.max_context_messages, 10);
    }

    #[test]
    fn load_from_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "log_level = \"debug\"\n\n[prompt]\ndisable_artifacts = true\nmax_context_messages = 4"
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.log_level, "debug");
        assert!(config.prompt.disable_artifacts);
        assert_eq!(config.prompt.max_context_messages, 4);
        // untouched field keeps its default
        assert!(!config.prompt.big_context_prompt.is_empty());
    }

    #[test]
    fn zero_message_cap_is_rejected() {
        let err = toml::from_str::<AppConfig>("[prompt]\nmax_context_messages = 0")
            .unwrap()
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("max_context_messages"));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "prompt = [").unwrap();

        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    // Environment variables are process-global, so tests touching them are
    // serialized behind this lock. The guard restores prior values on drop,
    // panicking assertions included.
    static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

    struct EnvGuard {
        saved: Vec<(&'static str, Option<String>)>,
    }

    impl EnvGuard {
        fn set(vars: &[(&'static str, &str)]) -> Self {
            let saved = vars
                .iter()
                .map(|(key, _)| (*key, std::env::var(key).ok()))
                .collect();
            for (key, value) in vars {
                unsafe { std::env::set_var(key, value) };
            }
            Self { saved }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, old) in &self.saved {
                match old {
                    Some(value) => unsafe { std::env::set_var(key, value) },
                    None => unsafe { std::env::remove_var(key) },
                }
            }
        }
    }

    #[test]
    fn env_vars_override_file_values() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let home = tempfile::tempdir().unwrap();
        let _env = EnvGuard::set(&[
            ("HOME", home.path().to_str().unwrap()),
            ("CLAWBRIDGE_DISABLE_ARTIFACTS", "1"),
            ("CLAWBRIDGE_MAX_CONTEXT_MESSAGES", "7"),
            ("CLAWBRIDGE_BIG_CONTEXT_PROMPT", "Reply to the attached file."),
        ]);

        let config = AppConfig::load().unwrap();
        assert!(config.prompt.disable_artifacts);
        assert_eq!(config.prompt.max_context_messages, 7);
        assert_eq!(
            config.prompt.big_context_prompt,
            "Reply to the attached file."
        );
    }

    #[test]
    fn env_disable_artifacts_rejects_other_strings() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let home = tempfile::tempdir().unwrap();
        let _env = EnvGuard::set(&[
            ("HOME", home.path().to_str().unwrap()),
            ("CLAWBRIDGE_DISABLE_ARTIFACTS", "yes please"),
        ]);

        let config = AppConfig::load().unwrap();
        assert!(!config.prompt.disable_artifacts);
    }

    #[test]
    fn non_numeric_env_cap_is_a_validation_error() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let home = tempfile::tempdir().unwrap();
        let _env = EnvGuard::set(&[
            ("HOME", home.path().to_str().unwrap()),
            ("CLAWBRIDGE_MAX_CONTEXT_MESSAGES", "ten"),
        ]);

        let err = AppConfig::load().unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
        assert!(err.to_string().contains("CLAWBRIDGE_MAX_CONTEXT_MESSAGES"));
    }

    #[test]
    fn zero_env_cap_fails_validation() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let home = tempfile::tempdir().unwrap();
        let _env = EnvGuard::set(&[
            ("HOME", home.path().to_str().unwrap()),
            ("CLAWBRIDGE_MAX_CONTEXT_MESSAGES", "0"),
        ]);

        let err = AppConfig::load().unwrap_err();
        assert!(err.to_string().contains("max_context_messages"));
    }
}
