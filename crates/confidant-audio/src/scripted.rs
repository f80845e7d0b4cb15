use crate::source::SoundSource;
use confidant_core::{AudioChunk, AudioError, CHUNK_SAMPLES, SAMPLE_RATE};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::time::Duration;

/// A canned sound source for tests and development without a microphone.
/// Yields its queued chunks immediately, then simulates silence by sleeping
/// out each requested wait (which cooperates with a paused tokio clock).
pub struct ScriptedSource {
    chunks: VecDeque<AudioChunk>,
    running: bool,
    starts: usize,
    stops: usize,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self {
            chunks: VecDeque::new(),
            running: false,
            starts: 0,
            stops: 0,
        }
    }

    /// A source preloaded with `n` silent chunks.
    pub fn with_silent_chunks(n: usize) -> Self {
        let mut source = Self::new();
        for _ in 0..n {
            source.push_chunk();
        }
        source
    }

    /// Queue one silent chunk. The scripted engine pairs each chunk it is
    /// fed with the next step of its script, so chunk contents are inert.
    pub fn push_chunk(&mut self) {
        self.chunks.push_back(AudioChunk {
            samples: vec![0; CHUNK_SAMPLES],
            sample_rate: SAMPLE_RATE,
        });
    }

    pub fn starts(&self) -> usize {
        self.starts
    }

    pub fn stops(&self) -> usize {
        self.stops
    }
}

impl Default for ScriptedSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl SoundSource for ScriptedSource {
    fn start(&mut self) -> Result<(), AudioError> {
        if !self.running {
            self.running = true;
            self.starts += 1;
        }
        Ok(())
    }

    fn stop(&mut self) {
        if self.running {
            self.running = false;
            self.stops += 1;
        }
    }

    fn is_running(&self) -> bool {
        self.running
    }

    async fn next_chunk(&mut self, wait: Duration) -> Option<AudioChunk> {
        match self.chunks.pop_front() {
            Some(chunk) => Some(chunk),
            None => {
                tokio::time::sleep(wait).await;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_source_yields_queued_chunks() {
        let mut source = ScriptedSource::with_silent_chunks(2);
        assert!(source.next_chunk(Duration::from_millis(1)).await.is_some());
        assert!(source.next_chunk(Duration::from_millis(1)).await.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_scripted_source_simulates_silence_when_empty() {
        let mut source = ScriptedSource::new();
        let before = tokio::time::Instant::now();
        let chunk = source.next_chunk(Duration::from_secs(1)).await;
        assert!(chunk.is_none());
        assert!(before.elapsed() >= Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_scripted_source_start_is_idempotent() {
        let mut source = ScriptedSource::new();
        source.start().unwrap();
        source.start().unwrap();
        assert!(source.is_running());
        assert_eq!(source.starts(), 1);

        source.stop();
        source.stop();
        assert!(!source.is_running());
        assert_eq!(source.stops(), 1);
    }
}
