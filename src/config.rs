//! Runtime configuration for the bridge.
//!
//! Configuration is loaded from a JSON file or constructed programmatically.
//! On device the file is located through the `LLAMA_BRIDGE_CONFIG`
//! environment variable; without it, defaults apply.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::inference::backend::PLACEHOLDER_RESPONSE;

/// Environment variable naming the config file read by [`BridgeConfig::from_env`].
pub const CONFIG_ENV_VAR: &str = "LLAMA_BRIDGE_CONFIG";

/// Command-line arguments of the `llama-bridge` host harness.
#[derive(Parser, Debug, Clone)]
#[command(name = "llama-bridge", about = "Drive the llama JNI bridge from the command line")]
pub struct Cli {
    /// Path to configuration file (JSON).
    #[arg(short, long, default_value = "bridge.json")]
    pub config: PathBuf,

    /// Model file handed to the load call.
    #[arg(short, long, default_value = "model.gguf")]
    pub model: PathBuf,

    /// Prompt to run; repeat for several.
    #[arg(short, long, required = true)]
    pub prompt: Vec<String>,

    /// Print call counters as JSON after the run.
    #[arg(long)]
    pub stats: bool,

    /// Enable verbose logging.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Logging configuration.
    pub log: LogConfig,

    /// Inference backend selection.
    pub backend: BackendConfig,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Android logcat tag.
    pub tag: String,

    /// Maximum level: "error", "warn", "info", "debug" or "trace".
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            tag: "LlamaAndroid".to_string(),
            level: "info".to_string(),
        }
    }
}

/// Available inference backends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Returns a null handle and a fixed response; loads nothing.
    #[default]
    Placeholder,
}

/// Backend settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Which backend serves the JNI calls.
    pub kind: BackendKind,

    /// Response returned by the placeholder backend.
    pub placeholder_response: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            kind: BackendKind::Placeholder,
            placeholder_response: PLACEHOLDER_RESPONSE.to_string(),
        }
    }
}

impl BridgeConfig {
    /// Load configuration from a JSON file, falling back to defaults for missing fields.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let data = std::fs::read_to_string(path)?;
            let config: BridgeConfig = serde_json::from_str(&data)?;
            Ok(config)
        } else {
            tracing::warn!("Config file not found at {:?}, using defaults", path);
            Ok(BridgeConfig::default())
        }
    }

    /// Load configuration from the file named by [`CONFIG_ENV_VAR`].
    ///
    /// An unset variable yields the defaults. A file that is missing,
    /// unreadable or malformed is an error. Logs nothing, so it can run
    /// before the logger is installed.
    pub fn try_from_env() -> anyhow::Result<Self> {
        let Some(path) = std::env::var_os(CONFIG_ENV_VAR) else {
            return Ok(BridgeConfig::default());
        };
        let path = PathBuf::from(path);

        let data = std::fs::read_to_string(&path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        serde_json::from_str(&data).with_context(|| format!("cannot parse {}", path.display()))
    }

    /// Like [`BridgeConfig::try_from_env`], but warns and returns the
    /// defaults instead of failing.
    pub fn from_env() -> Self {
        BridgeConfig::try_from_env().unwrap_or_else(|e| {
            tracing::warn!("Invalid config from {CONFIG_ENV_VAR}: {e:#}, using defaults");
            BridgeConfig::default()
        })
    }
}

/// Serialises tests that read or write [`CONFIG_ENV_VAR`].
#[cfg(test)]
pub(crate) fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    static LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
    LOCK.lock().unwrap_or_else(|e| e.into_inner())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = BridgeConfig::default();
        assert_eq!(cfg.log.tag, "LlamaAndroid");
        assert_eq!(cfg.log.level, "info");
        assert_eq!(cfg.backend.kind, BackendKind::Placeholder);
        assert_eq!(cfg.backend.placeholder_response, PLACEHOLDER_RESPONSE);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"log": {{"level": "debug"}}}}"#).unwrap();

        let cfg = BridgeConfig::load(file.path()).unwrap();
        assert_eq!(cfg.log.level, "debug");
        assert_eq!(cfg.log.tag, "LlamaAndroid");
        assert_eq!(cfg.backend, BackendConfig::default());
    }

    #[test]
    fn test_backend_section() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"backend": {{"kind": "placeholder", "placeholder_response": "stub"}}}}"#
        )
        .unwrap();

        let cfg = BridgeConfig::load(file.path()).unwrap();
        assert_eq!(cfg.backend.kind, BackendKind::Placeholder);
        assert_eq!(cfg.backend.placeholder_response, "stub");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = BridgeConfig::load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(cfg, BridgeConfig::default());
    }

    #[test]
    fn test_malformed_file_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(BridgeConfig::load(file.path()).is_err());
    }

    #[test]
    fn test_unknown_backend_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"backend": {{"kind": "cuda"}}}}"#).unwrap();
        assert!(BridgeConfig::load(file.path()).is_err());
    }

    #[test]
    fn test_env_unset_uses_defaults() {
        let _guard = env_lock();
        std::env::remove_var(CONFIG_ENV_VAR);

        assert_eq!(BridgeConfig::try_from_env().unwrap(), BridgeConfig::default());
        assert_eq!(BridgeConfig::from_env(), BridgeConfig::default());
    }

    #[test]
    fn test_env_valid_file_is_loaded() {
        let _guard = env_lock();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"log": {{"tag": "QrLlama", "level": "warn"}}}}"#).unwrap();
        std::env::set_var(CONFIG_ENV_VAR, file.path());

        let cfg = BridgeConfig::from_env();
        std::env::remove_var(CONFIG_ENV_VAR);

        assert_eq!(cfg.log.tag, "QrLlama");
        assert_eq!(cfg.log.level, "warn");
        assert_eq!(cfg.backend, BackendConfig::default());
    }

    #[test]
    fn test_env_malformed_file_falls_back() {
        let _guard = env_lock();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        std::env::set_var(CONFIG_ENV_VAR, file.path());

        let err = BridgeConfig::try_from_env().unwrap_err();
        let cfg = BridgeConfig::from_env();
        std::env::remove_var(CONFIG_ENV_VAR);

        assert!(err.to_string().starts_with("cannot parse"));
        assert_eq!(cfg, BridgeConfig::default());
    }

    #[test]
    fn test_env_missing_file_falls_back() {
        let _guard = env_lock();
        let dir = tempfile::tempdir().unwrap();
        std::env::set_var(CONFIG_ENV_VAR, dir.path().join("absent.json"));

        let err = BridgeConfig::try_from_env().unwrap_err();
        let cfg = BridgeConfig::from_env();
        std::env::remove_var(CONFIG_ENV_VAR);

        assert!(err.to_string().starts_with("cannot read"));
        assert_eq!(cfg, BridgeConfig::default());
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["llama-bridge", "--prompt", "hi", "-p", "again"]);
        assert_eq!(cli.config, PathBuf::from("bridge.json"));
        assert_eq!(cli.model, PathBuf::from("model.gguf"));
        assert_eq!(cli.prompt, vec!["hi", "again"]);
        assert!(!cli.stats);
    }

    #[test]
    fn test_cli_requires_prompt() {
        assert!(Cli::try_parse_from(["llama-bridge"]).is_err());
    }
}
