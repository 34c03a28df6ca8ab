use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

pub const DEFAULT_FALLBACK_MESSAGE: &str = "翻譯發生錯誤，請稍後再試。";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub system_config: SystemConfig,
    #[serde(default)]
    pub translator_config: TranslatorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Settings for the hosted model that performs the translation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatorConfig {
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default = "default_target_language")]
    pub target_language: String,
    #[serde(default = "default_fallback_message")]
    pub fallback_message: String,
}

fn default_provider() -> String {
    "gemini".to_string()
}

fn default_model() -> String {
    "gemini-1.5-flash-latest".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_target_language() -> String {
    "Traditional Chinese".to_string()
}

fn default_fallback_message() -> String {
    DEFAULT_FALLBACK_MESSAGE.to_string()
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            base_url: default_base_url(),
            api_key: String::new(),
            temperature: None,
            target_language: default_target_language(),
            fallback_message: default_fallback_message(),
        }
    }
}

impl TranslatorConfig {
    /// True when the key is blank or still an unexpanded `${VAR}` placeholder.
    pub fn api_key_missing(&self) -> bool {
        let key = self.api_key.trim();
        key.is_empty() || (key.starts_with("${") && key.ends_with('}'))
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            anyhow::bail!("Configuration file not found: {}", path);
        }

        let content = load_text_file(path)?;
        Self::parse(path, &content)
    }

    /// Parses `content`, choosing JSON or YAML by the extension of `path`.
    pub fn parse(path: &str, content: &str) -> Result<Self> {
        let content = substitute_env_vars(content);

        let path_lower = path.to_lowercase();
        let mut config: Config = if path_lower.ends_with(".jsonld") || path_lower.ends_with(".json") {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };
        config.apply_api_key_env(API_KEY_ENV);
        Ok(config)
    }

    /// Load the first candidate file that exists. A file that exists but
    /// fails to load is an error; defaults apply only when none exists.
    pub fn discover(paths: &[String]) -> Result<Self> {
        match paths.iter().find(|path| Path::new(path.as_str()).exists()) {
            Some(path) => {
                let config = Self::load(path)
                    .with_context(|| format!("Failed to load config from {}", path))?;
                info!("Loaded configuration from: {}", path);
                Ok(config)
            }
            None => {
                info!("No configuration file found (tried {:?}); using defaults", paths);
                Ok(Self::from_env())
            }
        }
    }

    /// Configuration used when no file is found: defaults plus `GEMINI_API_KEY`.
    pub fn from_env() -> Self {
        Self::from_env_var(API_KEY_ENV)
    }

    fn from_env_var(var: &str) -> Self {
        let mut config = Config::default();
        config.apply_api_key_env(var);
        config
    }

    fn apply_api_key_env(&mut self, var: &str) {
        if self.translator_config.api_key_missing() {
            if let Ok(key) = std::env::var(var) {
                self.translator_config.api_key = key;
            }
        }
    }
}

/// Replace `${VAR_NAME}` with the environment value, leaving unknown variables untouched.
pub fn substitute_env_vars(content: &str) -> String {
    let pattern = Regex::new(r"\$\{(\w+)\}").expect("static regex");
    pattern
        .replace_all(content, |caps: &regex::Captures| {
            std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
        })
        .into_owned()
}

/// Read a text file as UTF-8, dropping a byte-order mark if present.
fn load_text_file(path: &str) -> Result<String> {
    let bytes = fs::read(path)?;
    let (content, _, had_errors) = encoding_rs::UTF_8.decode(&bytes);
    if had_errors {
        warn!("Configuration file {} contains invalid UTF-8", path);
    }
    Ok(content.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_a_bare_deployment() {
        let config = Config::default();
        assert_eq!(config.system_config.host, "0.0.0.0");
        assert_eq!(config.system_config.port, 5000);
        assert_eq!(config.translator_config.model, "gemini-1.5-flash-latest");
        assert_eq!(config.translator_config.target_language, "Traditional Chinese");
        assert_eq!(config.translator_config.fallback_message, DEFAULT_FALLBACK_MESSAGE);
        assert!(config.translator_config.temperature.is_none());
    }

    #[test]
    fn parses_yaml_with_partial_sections() {
        let yaml = "system_config:\n  port: 8080\ntranslator_config:\n  api_key: abc\n  temperature: 0.2\n";
        let config = Config::parse("conf.yaml", yaml).unwrap();
        assert_eq!(config.system_config.port, 8080);
        assert_eq!(config.system_config.host, "0.0.0.0");
        assert_eq!(config.translator_config.api_key, "abc");
        assert_eq!(config.translator_config.temperature, Some(0.2));
        assert_eq!(config.translator_config.provider, "gemini");
    }

    #[test]
    fn parses_json_by_extension() {
        let json = r#"{"translator_config": {"model": "gemini-2.0-flash", "api_key": "k"}}"#;
        let config = Config::parse("conf.json", json).unwrap();
        assert_eq!(config.translator_config.model, "gemini-2.0-flash");
        assert_eq!(config.system_config.port, 5000);
    }

    #[test]
    fn substitutes_known_env_vars_only() {
        std::env::set_var("SPEECH_TRANSLATOR_TEST_KEY", "secret");
        let out = substitute_env_vars("a: ${SPEECH_TRANSLATOR_TEST_KEY}\nb: ${SPEECH_TRANSLATOR_UNSET_VAR}");
        assert_eq!(out, "a: secret\nb: ${SPEECH_TRANSLATOR_UNSET_VAR}");
    }

    #[test]
    fn unresolved_placeholder_counts_as_missing_key() {
        let mut translator = TranslatorConfig::default();
        assert!(translator.api_key_missing());
        translator.api_key = "${SPEECH_TRANSLATOR_UNSET_VAR}".to_string();
        assert!(translator.api_key_missing());
        translator.api_key = "real-key".to_string();
        assert!(!translator.api_key_missing());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(Config::load("does/not/exist.yaml").is_err());
    }

    fn write_config(dir: &tempfile::TempDir, name: &str, bytes: &[u8]) -> String {
        let path = dir.path().join(name);
        fs::write(&path, bytes).unwrap();
        path.to_str().unwrap().to_string()
    }

    #[test]
    fn loads_yaml_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            "conf.yaml",
            "system_config:\n  port: 7001\ntranslator_config:\n  api_key: from-file\n".as_bytes(),
        );

        let config = Config::load(&path).unwrap();
        assert_eq!(config.system_config.port, 7001);
        assert_eq!(config.translator_config.api_key, "from-file");
    }

    #[test]
    fn strips_byte_order_mark_when_loading() {
        let dir = tempfile::tempdir().unwrap();
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(br#"{"system_config": {"port": 7002}, "translator_config": {"api_key": "k"}}"#);
        let path = write_config(&dir, "conf.json", &bytes);

        let config = Config::load(&path).unwrap();
        assert_eq!(config.system_config.port, 7002);
    }

    #[test]
    fn placeholder_key_falls_back_to_environment() {
        std::env::set_var("SPEECH_TRANSLATOR_TEST_FALLBACK_KEY", "env-key");
        let mut config = Config::default();
        config.translator_config.api_key = "${SPEECH_TRANSLATOR_UNSET_VAR}".to_string();

        config.apply_api_key_env("SPEECH_TRANSLATOR_TEST_FALLBACK_KEY");
        assert_eq!(config.translator_config.api_key, "env-key");
    }

    #[test]
    fn configured_key_is_not_overridden_by_environment() {
        std::env::set_var("SPEECH_TRANSLATOR_TEST_OVERRIDE_KEY", "env-key");
        let mut config = Config::parse("conf.yaml", "translator_config:\n  api_key: file-key\n").unwrap();

        config.apply_api_key_env("SPEECH_TRANSLATOR_TEST_OVERRIDE_KEY");
        assert_eq!(config.translator_config.api_key, "file-key");
    }

    #[test]
    fn defaults_take_key_from_environment() {
        std::env::set_var("SPEECH_TRANSLATOR_TEST_DEFAULT_KEY", "env-key");
        let config = Config::from_env_var("SPEECH_TRANSLATOR_TEST_DEFAULT_KEY");
        assert_eq!(config.translator_config.api_key, "env-key");
        assert_eq!(config.system_config.port, 5000);

        let config = Config::from_env_var("SPEECH_TRANSLATOR_UNSET_VAR");
        assert!(config.translator_config.api_key_missing());
    }

    #[test]
    fn discover_uses_first_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.yaml").to_str().unwrap().to_string();
        let present = write_config(&dir, "conf.yaml", b"system_config:\n  port: 7003\n");

        let config = Config::discover(&[missing, present]).unwrap();
        assert_eq!(config.system_config.port, 7003);
    }

    #[test]
    fn discover_fails_on_broken_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let broken = write_config(&dir, "conf.yaml", b"system_config: [unterminated\n");
        let fallback = write_config(&dir, "conf.json", br#"{"system_config": {"port": 7004}}"#);

        let err = Config::discover(&[broken.clone(), fallback]).unwrap_err();
        assert!(err.to_string().contains(&broken));
    }

    #[test]
    fn discover_uses_defaults_when_no_file_exists() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("conf.yaml").to_str().unwrap().to_string();

        let config = Config::discover(&[missing]).unwrap();
        assert_eq!(config.system_config.port, 5000);
        assert_eq!(config.translator_config.model, "gemini-1.5-flash-latest");
    }
}
