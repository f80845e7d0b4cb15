use crate::echo::EchoFilter;
use crate::engine::SpeechEngine;
use confidant_audio::SoundSource;
use confidant_core::VoiceError;
use std::time::Duration;
use tokio::time::Instant;

/// Default wait per queue poll; keeps timeout checks granular.
const POLL_WAIT: Duration = Duration::from_millis(500);

/// Turns a stream of audio chunks into a single phrase per call. Every call
/// begins a fresh recognition window on the engine.
pub struct PhraseRecognizer {
    poll_wait: Duration,
}

impl PhraseRecognizer {
    pub fn new() -> Self {
        Self {
            poll_wait: POLL_WAIT,
        }
    }

    /// Listen until a final non-empty phrase arrives or `timeout` elapses.
    /// On timeout the pending partial is returned as a best-effort
    /// transcript; an empty string means nothing was heard. Echoes of the
    /// system's own speech are discarded and listening continues.
    ///
    /// Starts the source if it was stopped, and in that case stops it again
    /// before returning — a source it did not start is left running for the
    /// enclosing wake/command loop.
    pub async fn listen_for_phrase(
        &self,
        engine: &mut dyn SpeechEngine,
        source: &mut dyn SoundSource,
        echo: &EchoFilter,
        timeout: Option<Duration>,
    ) -> Result<String, VoiceError> {
        let started_here = !source.is_running();
        if started_here {
            source.start()?;
        }

        let result = self.listen_inner(engine, source, echo, timeout).await;

        if started_here {
            source.stop();
        }
        result
    }

    async fn listen_inner(
        &self,
        engine: &mut dyn SpeechEngine,
        source: &mut dyn SoundSource,
        echo: &EchoFilter,
        timeout: Option<Duration>,
    ) -> Result<String, VoiceError> {
        engine.reset();
        let start = Instant::now();

        loop {
            if let Some(limit) = timeout {
                if start.elapsed() >= limit {
                    break;
                }
            }

            let Some(chunk) = source.next_chunk(self.poll_wait).await else {
                continue;
            };
            let Some(result) = engine.accept(&chunk)? else {
                continue;
            };

            if result.is_final {
                let text = result.text.trim().to_string();
                if text.is_empty() {
                    continue;
                }
                if echo.is_echo(&text) {
                    tracing::debug!("ignoring system echo, continuing to listen");
                    continue;
                }
                tracing::info!("recognized: {text}");
                return Ok(text);
            }
            tracing::trace!("partial: {}", result.text);
        }

        // Timed out — fall back to whatever partial decoding accumulated
        tracing::debug!("recognition timed out");
        if let Some(partial) = engine.flush() {
            let text = partial.text.trim().to_string();
            if !text.is_empty() && !echo.is_echo(&text) {
                tracing::debug!("returning final partial: {text}");
                return Ok(text);
            }
        }
        Ok(String::new())
    }
}

impl Default for PhraseRecognizer {
    fn default() -> Self {
        Self::new()
    }
}
