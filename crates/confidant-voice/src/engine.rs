use confidant_core::{AudioChunk, RecognitionResult, VoiceError};

/// A streaming speech-to-text engine. One logical listening operation owns
/// the engine at a time; callers `reset` at the start of each operation so
/// acoustic context never leaks from one pass into the next.
pub trait SpeechEngine: Send {
    /// Discard all decoding state, beginning a fresh recognition window.
    fn reset(&mut self);

    /// Feed one chunk of audio. Returns a partial or final result when the
    /// engine produced non-empty text for this chunk, `None` otherwise.
    /// Decode failures are reported as `None` — never fatal to the loop.
    fn accept(&mut self, chunk: &AudioChunk) -> Result<Option<RecognitionResult>, VoiceError>;

    /// Take the pending partial transcript, if any, as a best-effort result
    /// when a listening operation times out mid-utterance.
    fn flush(&mut self) -> Option<RecognitionResult>;
}
