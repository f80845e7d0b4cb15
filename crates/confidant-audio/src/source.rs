use confidant_core::{AudioChunk, AudioError};
use async_trait::async_trait;
use std::time::Duration;

/// A pull-based supplier of captured audio. Exactly one consumer drains a
/// source at a time; the conversation state machine, not locking, enforces
/// that wake detection and command collection never overlap.
#[async_trait(?Send)]
pub trait SoundSource {
    /// Begin producing chunks. Idempotent; clears any audio left over from
    /// a previous session before the stream opens.
    fn start(&mut self) -> Result<(), AudioError>;

    /// Stop producing chunks. Idempotent.
    fn stop(&mut self);

    fn is_running(&self) -> bool;

    /// Wait up to `wait` for the next chunk. `None` means no audio arrived
    /// within the window; callers poll with short waits so their timeout
    /// checks stay responsive.
    async fn next_chunk(&mut self, wait: Duration) -> Option<AudioChunk>;
}
