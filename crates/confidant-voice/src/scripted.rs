use crate::engine::SpeechEngine;
use confidant_core::{AudioChunk, RecognitionResult, VoiceError};
use std::collections::VecDeque;

/// A deterministic engine for tests and development without a speech model.
/// Each accepted chunk consumes the next step of the script; an exhausted
/// script decodes as silence.
pub struct ScriptedEngine {
    script: VecDeque<Option<RecognitionResult>>,
    pending_partial: Option<String>,
    resets: usize,
}

impl ScriptedEngine {
    pub fn new() -> Self {
        Self {
            script: VecDeque::new(),
            pending_partial: None,
            resets: 0,
        }
    }

    pub fn push_final(&mut self, text: &str) -> &mut Self {
        self.script.push_back(Some(RecognitionResult::finalized(text)));
        self
    }

    pub fn push_partial(&mut self, text: &str) -> &mut Self {
        self.script.push_back(Some(RecognitionResult::partial(text)));
        self
    }

    pub fn push_silence(&mut self) -> &mut Self {
        self.script.push_back(None);
        self
    }

    /// Number of times a listening operation started a fresh window.
    pub fn resets(&self) -> usize {
        self.resets
    }
}

impl Default for ScriptedEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SpeechEngine for ScriptedEngine {
    fn reset(&mut self) {
        self.pending_partial = None;
        self.resets += 1;
    }

    fn accept(&mut self, _chunk: &AudioChunk) -> Result<Option<RecognitionResult>, VoiceError> {
        let step = self.script.pop_front().flatten();
        match &step {
            Some(result) if result.is_final => self.pending_partial = None,
            Some(result) => self.pending_partial = Some(result.text.clone()),
            None => {}
        }
        Ok(step)
    }

    fn flush(&mut self) -> Option<RecognitionResult> {
        self.pending_partial
            .take()
            .map(RecognitionResult::partial)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use confidant_core::{CHUNK_SAMPLES, SAMPLE_RATE};

    fn chunk() -> AudioChunk {
        AudioChunk {
            samples: vec![0; CHUNK_SAMPLES],
            sample_rate: SAMPLE_RATE,
        }
    }

    #[test]
    fn test_scripted_engine_plays_back_script() {
        let mut engine = ScriptedEngine::new();
        engine.push_partial("turn the").push_final("turn the lights on");

        let first = engine.accept(&chunk()).unwrap().unwrap();
        assert!(!first.is_final);
        assert_eq!(first.text, "turn the");

        let second = engine.accept(&chunk()).unwrap().unwrap();
        assert!(second.is_final);
        assert_eq!(second.text, "turn the lights on");
    }

    #[test]
    fn test_exhausted_script_decodes_as_silence() {
        let mut engine = ScriptedEngine::new();
        assert!(engine.accept(&chunk()).unwrap().is_none());
    }

    #[test]
    fn test_flush_returns_pending_partial_once() {
        let mut engine = ScriptedEngine::new();
        engine.push_partial("half a phra");
        engine.accept(&chunk()).unwrap();

        let flushed = engine.flush().unwrap();
        assert_eq!(flushed.text, "half a phra");
        assert!(!flushed.is_final);
        assert!(engine.flush().is_none());
    }

    #[test]
    fn test_final_result_clears_pending_partial() {
        let mut engine = ScriptedEngine::new();
        engine.push_partial("turn the").push_final("turn the lights on");
        engine.accept(&chunk()).unwrap();
        engine.accept(&chunk()).unwrap();
        assert!(engine.flush().is_none());
    }

    #[test]
    fn test_reset_clears_pending_and_counts() {
        let mut engine = ScriptedEngine::new();
        engine.push_partial("stale");
        engine.accept(&chunk()).unwrap();
        engine.reset();
        assert!(engine.flush().is_none());
        assert_eq!(engine.resets(), 1);
    }
}
