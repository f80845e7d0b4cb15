use crate::echo::EchoFilter;
use crate::engine::SpeechEngine;
use crate::recognizer::PhraseRecognizer;
use confidant_audio::SoundSource;
use confidant_core::{PhraseConfig, VoiceError};
use std::time::Duration;
use tokio::time::Instant;

/// Sentinel returned when the overall timeout expires with nothing heard.
pub const NO_COMMAND_HEARD: &str = "Sorry, I didn't hear your command.";

/// Per-segment listen window; short so the silence and overall timeout
/// checks between segments stay responsive.
const SEGMENT_WAIT: Duration = Duration::from_secs(1);

/// Accumulates spoken segments into one command string after activation.
pub struct CommandCollector {
    recognizer: PhraseRecognizer,
}

impl CommandCollector {
    pub fn new() -> Self {
        Self {
            recognizer: PhraseRecognizer::new(),
        }
    }

    /// Collect until the end phrase is heard, the overall command timeout
    /// elapses, or silence follows already-accumulated speech for longer
    /// than the silence timeout. The end phrase and anything after it are
    /// discarded; segments that echo the system's own speech never reach
    /// the accumulator.
    pub async fn collect(
        &self,
        engine: &mut dyn SpeechEngine,
        source: &mut dyn SoundSource,
        echo: &EchoFilter,
        phrases: &PhraseConfig,
    ) -> Result<String, VoiceError> {
        tracing::info!(
            "listening for command, say '{}' when done",
            phrases.end_phrase
        );
        source.start()?;

        let mut command = String::new();
        let started = Instant::now();
        let mut last_activity = Instant::now();

        loop {
            if started.elapsed() >= phrases.command_timeout {
                tracing::info!(
                    "overall listening timeout reached ({:?})",
                    phrases.command_timeout
                );
                if command.is_empty() {
                    return Ok(NO_COMMAND_HEARD.to_string());
                }
                break;
            }

            if !command.is_empty() && last_activity.elapsed() >= phrases.silence_timeout {
                tracing::info!(
                    "silence for {:?}, finishing command",
                    phrases.silence_timeout
                );
                break;
            }

            let segment = self
                .recognizer
                .listen_for_phrase(engine, source, echo, Some(SEGMENT_WAIT))
                .await?;
            if segment.is_empty() {
                continue;
            }

            tracing::debug!("heard segment: {segment}");
            last_activity = Instant::now();

            // Index into the lowered string only; lowercasing can change
            // byte lengths, so it must not be used to slice `segment`
            let lowered = segment.to_lowercase();
            if let Some(idx) = lowered.find(&phrases.end_phrase) {
                let before = lowered[..idx].trim();
                if !before.is_empty() {
                    command.push_str(before);
                    command.push(' ');
                }
                tracing::debug!("end phrase heard, finishing command");
                break;
            }

            command.push_str(&segment);
            command.push(' ');
        }

        Ok(command.trim().to_string())
    }
}

impl Default for CommandCollector {
    fn default() -> Self {
        Self::new()
    }
}
