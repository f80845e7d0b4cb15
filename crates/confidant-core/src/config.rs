use crate::error::ConfigError;
use regex::Regex;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub audio: AudioConfig,

    #[serde(default)]
    pub phrases: PhraseSection,

    #[serde(default)]
    pub timing: TimingConfig,

    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub speech: SpeechConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeneralConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AudioConfig {
    #[serde(default = "default_device_name")]
    pub device_name: String,

    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    #[serde(default = "default_chunk_samples")]
    pub chunk_samples: usize,

    #[serde(default = "default_model_path")]
    pub model_path: String,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            device_name: default_device_name(),
            sample_rate: default_sample_rate(),
            chunk_samples: default_chunk_samples(),
            model_path: default_model_path(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PhraseSection {
    #[serde(default = "default_wake_phrase")]
    pub wake: String,

    #[serde(default = "default_end_phrase")]
    pub end: String,

    #[serde(default = "default_done_phrase")]
    pub done: String,

    #[serde(default = "default_command_pre")]
    pub command_pre: String,

    #[serde(default = "default_command_post")]
    pub command_post: String,
}

impl Default for PhraseSection {
    fn default() -> Self {
        Self {
            wake: default_wake_phrase(),
            end: default_end_phrase(),
            done: default_done_phrase(),
            command_pre: default_command_pre(),
            command_post: default_command_post(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct TimingConfig {
    #[serde(default = "default_command_timeout")]
    pub command_timeout_secs: u64,

    #[serde(default = "default_silence_timeout")]
    pub silence_timeout_secs: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            command_timeout_secs: default_command_timeout(),
            silence_timeout_secs: default_silence_timeout(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LlmConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SpeechConfig {
    /// Speech command override; platform default is used when unset.
    #[serde(default)]
    pub program: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_device_name() -> String {
    "default".to_string()
}

fn default_sample_rate() -> u32 {
    crate::types::SAMPLE_RATE
}

fn default_chunk_samples() -> usize {
    crate::types::CHUNK_SAMPLES
}

fn default_model_path() -> String {
    "vosk-model-small-en-us-0.15".to_string()
}

fn default_wake_phrase() -> String {
    "listen up".to_string()
}

fn default_end_phrase() -> String {
    "go for it".to_string()
}

fn default_done_phrase() -> String {
    "that will do".to_string()
}

fn default_command_pre() -> String {
    "hocus pocus".to_string()
}

fn default_command_post() -> String {
    "abracadabra".to_string()
}

fn default_command_timeout() -> u64 {
    30
}

fn default_silence_timeout() -> u64 {
    5
}

fn default_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "gemma2:latest".to_string()
}

/// Interpolate `${VAR}` patterns with environment variable values.
fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let re = Regex::new(r"\$\{([^}]+)\}").unwrap();
    let mut result = input.to_string();
    let mut errors = Vec::new();

    for cap in re.captures_iter(input) {
        let var_name = &cap[1];
        match std::env::var(var_name) {
            Ok(val) => {
                result = result.replace(&cap[0], &val);
            }
            Err(_) => {
                errors.push(var_name.to_string());
            }
        }
    }

    if let Some(first_missing) = errors.into_iter().next() {
        return Err(ConfigError::EnvVarNotFound(first_missing));
    }

    Ok(result)
}

impl AppConfig {
    /// Load configuration from a TOML file, with environment variable
    /// interpolation.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let interpolated = interpolate_env_vars(&content)?;
        let config: AppConfig = toml::from_str(&interpolated)?;
        Ok(config)
    }

    /// Load from a file when it exists, otherwise fall back to defaults.
    /// A config file is optional; every field has a usable default.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::debug!("no config file at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Parse configuration from a TOML string (for testing).
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let interpolated = interpolate_env_vars(s)?;
        let config: AppConfig = toml::from_str(&interpolated)?;
        Ok(config)
    }

    /// Freeze the phrase and timing surface into the immutable form the
    /// voice pipeline consumes. Phrases are stored lowercase so substring
    /// matching against recognizer output needs no further casing.
    pub fn phrase_config(&self) -> PhraseConfig {
        PhraseConfig {
            wake_phrase: self.phrases.wake.to_lowercase(),
            end_phrase: self.phrases.end.to_lowercase(),
            done_phrase: self.phrases.done.to_lowercase(),
            command_pre: self.phrases.command_pre.to_lowercase(),
            command_post: self.phrases.command_post.to_lowercase(),
            command_timeout: Duration::from_secs(self.timing.command_timeout_secs),
            silence_timeout: Duration::from_secs(self.timing.silence_timeout_secs),
        }
    }
}

/// Trigger phrases and timeouts, read-only once the session starts.
#[derive(Debug, Clone)]
pub struct PhraseConfig {
    pub wake_phrase: String,
    pub end_phrase: String,
    pub done_phrase: String,
    pub command_pre: String,
    pub command_post: String,
    pub command_timeout: Duration,
    pub silence_timeout: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_parse_valid_toml() {
        let toml_str = r#"
[general]
log_level = "debug"

[audio]
device_name = "USB Microphone"
sample_rate = 16000
model_path = "./models/vosk-small"

[phrases]
wake = "hey you"
end = "off you go"
done = "enough"

[timing]
command_timeout_secs = 20
silence_timeout_secs = 3

[llm]
base_url = "http://localhost:11434"
model = "llama3:latest"
"#;
        let config = AppConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.audio.device_name, "USB Microphone");
        assert_eq!(config.audio.model_path, "./models/vosk-small");
        assert_eq!(config.phrases.wake, "hey you");
        assert_eq!(config.phrases.end, "off you go");
        assert_eq!(config.phrases.done, "enough");
        assert_eq!(config.timing.command_timeout_secs, 20);
        assert_eq!(config.timing.silence_timeout_secs, 3);
        assert_eq!(config.llm.model, "llama3:latest");
    }

    #[test]
    fn test_config_default_values() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.audio.device_name, "default");
        assert_eq!(config.audio.sample_rate, 16000);
        assert_eq!(config.audio.chunk_samples, 8000);
        assert_eq!(config.phrases.wake, "listen up");
        assert_eq!(config.phrases.end, "go for it");
        assert_eq!(config.phrases.done, "that will do");
        assert_eq!(config.phrases.command_pre, "hocus pocus");
        assert_eq!(config.phrases.command_post, "abracadabra");
        assert_eq!(config.timing.command_timeout_secs, 30);
        assert_eq!(config.timing.silence_timeout_secs, 5);
        assert_eq!(config.llm.base_url, "http://localhost:11434");
        assert_eq!(config.llm.model, "gemma2:latest");
        assert!(config.speech.program.is_none());
    }

    #[test]
    fn test_config_env_var_interpolation() {
        std::env::set_var("CONFIDANT_TEST_MODEL", "mistral:latest");
        let toml_str = r#"
[llm]
model = "${CONFIDANT_TEST_MODEL}"
"#;
        let config = AppConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.llm.model, "mistral:latest");
        std::env::remove_var("CONFIDANT_TEST_MODEL");
    }

    #[test]
    fn test_config_missing_env_var_error() {
        let toml_str = r#"
[llm]
model = "${DEFINITELY_DOES_NOT_EXIST_12345}"
"#;
        let result = AppConfig::from_toml_str(toml_str);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("DEFINITELY_DOES_NOT_EXIST_12345"));
    }

    #[test]
    fn test_config_invalid_toml_error() {
        let toml_str = "this is not valid toml [[[";
        assert!(AppConfig::from_toml_str(toml_str).is_err());
    }

    #[test]
    fn test_config_load_from_file() {
        let dir = std::env::temp_dir().join("confidant_test_config");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("test.toml");
        std::fs::write(
            &path,
            r#"
[general]
log_level = "warn"

[phrases]
wake = "wake up"
"#,
        )
        .unwrap();

        let config = AppConfig::load_from_file(&path).unwrap();
        assert_eq!(config.general.log_level, "warn");
        assert_eq!(config.phrases.wake, "wake up");

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_config_load_from_file_not_found() {
        let result = AppConfig::load_from_file(std::path::Path::new("/nonexistent/path.toml"));
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("failed to read config file"));
    }

    #[test]
    fn test_config_load_or_default_missing_file() {
        let config =
            AppConfig::load_or_default(std::path::Path::new("/nonexistent/path.toml")).unwrap();
        assert_eq!(config.phrases.wake, "listen up");
    }

    #[test]
    fn test_phrase_config_lowercases_and_converts_timeouts() {
        let toml_str = r#"
[phrases]
wake = "Listen Up"
done = "THAT WILL DO"

[timing]
command_timeout_secs = 12
silence_timeout_secs = 4
"#;
        let config = AppConfig::from_toml_str(toml_str).unwrap();
        let phrases = config.phrase_config();
        assert_eq!(phrases.wake_phrase, "listen up");
        assert_eq!(phrases.done_phrase, "that will do");
        assert_eq!(phrases.end_phrase, "go for it");
        assert_eq!(phrases.command_timeout, Duration::from_secs(12));
        assert_eq!(phrases.silence_timeout, Duration::from_secs(4));
    }
}
