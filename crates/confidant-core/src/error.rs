use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("environment variable not found: {0}")]
    EnvVarNotFound(String),
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("input device not found: {0}")]
    DeviceNotFound(String),

    #[error("no default input device available")]
    NoInputDevice,

    #[error("failed to enumerate devices: {0}")]
    DeviceEnumeration(String),

    #[error("failed to build input stream: {0}")]
    StreamBuild(String),

    #[error("failed to start input stream: {0}")]
    StreamStart(String),
}

#[derive(Debug, Error)]
pub enum VoiceError {
    #[error("speech model not found at '{0}'")]
    ModelNotFound(String),

    #[error("failed to load speech model from '{0}'")]
    ModelLoad(String),

    #[error("failed to create recognizer: {0}")]
    RecognizerInit(String),

    #[error(transparent)]
    Audio(#[from] AudioError),
}

#[derive(Debug, Error)]
pub enum SpeakError {
    #[error("failed to run speech command '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("speech command '{command}' exited with {status}")]
    CommandFailed {
        command: String,
        status: std::process::ExitStatus,
    },
}
