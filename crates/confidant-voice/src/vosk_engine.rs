use crate::engine::SpeechEngine;
use confidant_core::{AudioChunk, RecognitionResult, VoiceError};
use vosk::{DecodingState, Model, Recognizer};

/// Streaming recognition backed by a local Vosk model. Holds one decoding
/// window at a time; `reset` rebuilds the recognizer so each listening
/// operation starts from clean acoustic state.
pub struct VoskEngine {
    model: Model,
    sample_rate: f32,
    recognizer: Recognizer,
}

impl VoskEngine {
    pub fn new(model_path: &str, sample_rate: u32) -> Result<Self, VoiceError> {
        if !std::path::Path::new(model_path).exists() {
            return Err(VoiceError::ModelNotFound(model_path.to_string()));
        }

        let model =
            Model::new(model_path).ok_or_else(|| VoiceError::ModelLoad(model_path.to_string()))?;
        let recognizer = Self::build_recognizer(&model, sample_rate as f32)?;

        tracing::info!(model_path, sample_rate, "vosk engine initialized");
        Ok(Self {
            model,
            sample_rate: sample_rate as f32,
            recognizer,
        })
    }

    fn build_recognizer(model: &Model, sample_rate: f32) -> Result<Recognizer, VoiceError> {
        let mut recognizer = Recognizer::new(model, sample_rate).ok_or_else(|| {
            VoiceError::RecognizerInit("vosk recognizer construction failed".to_string())
        })?;
        recognizer.set_words(false);
        recognizer.set_max_alternatives(0);
        Ok(recognizer)
    }
}

impl SpeechEngine for VoskEngine {
    fn reset(&mut self) {
        match Self::build_recognizer(&self.model, self.sample_rate) {
            Ok(recognizer) => self.recognizer = recognizer,
            // Keep the old window rather than kill the loop
            Err(e) => tracing::warn!("recognizer reset failed: {e}"),
        }
    }

    fn accept(&mut self, chunk: &AudioChunk) -> Result<Option<RecognitionResult>, VoiceError> {
        let state = match self.recognizer.accept_waveform(&chunk.samples) {
            Ok(state) => state,
            Err(e) => {
                // Malformed audio decodes as silence; the loop continues
                tracing::warn!("vosk rejected waveform: {e:?}");
                return Ok(None);
            }
        };

        match state {
            DecodingState::Finalized => {
                let text = self
                    .recognizer
                    .result()
                    .single()
                    .map(|r| r.text.trim().to_string())
                    .unwrap_or_default();
                if text.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(RecognitionResult::finalized(text)))
                }
            }
            DecodingState::Running => {
                let partial = self.recognizer.partial_result().partial.trim().to_string();
                if partial.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(RecognitionResult::partial(partial)))
                }
            }
            DecodingState::Failed => {
                tracing::debug!("vosk decode failed for this window");
                Ok(None)
            }
        }
    }

    fn flush(&mut self) -> Option<RecognitionResult> {
        let partial = self.recognizer.partial_result().partial.trim().to_string();
        if partial.is_empty() {
            None
        } else {
            Some(RecognitionResult::partial(partial))
        }
    }
}
