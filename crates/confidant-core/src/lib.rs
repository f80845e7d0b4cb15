pub mod command;
pub mod config;
pub mod error;
pub mod text;
pub mod types;

pub use command::SpecialCommand;
pub use config::{AppConfig, PhraseConfig};
pub use error::{AudioError, ConfigError, SpeakError, VoiceError};
pub use types::{AudioChunk, ConversationState, RecognitionResult, CHUNK_SAMPLES, SAMPLE_RATE};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audio_chunk_creation() {
        let chunk = AudioChunk {
            samples: vec![0, 128, -128, 32767],
            sample_rate: 16000,
        };
        assert_eq!(chunk.samples.len(), 4);
        assert_eq!(chunk.sample_rate, 16000);
    }

    #[test]
    fn test_recognition_result_fields() {
        let result = RecognitionResult {
            text: "hello world".to_string(),
            is_final: true,
        };
        assert_eq!(result.text, "hello world");
        assert!(result.is_final);
    }

    #[test]
    fn test_conversation_state_default_is_idle() {
        assert_eq!(ConversationState::default(), ConversationState::Idle);
    }
}
