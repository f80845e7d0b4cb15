use crate::engine::SpeechEngine;
use confidant_audio::SoundSource;
use confidant_core::VoiceError;
use std::time::Duration;

const POLL_WAIT: Duration = Duration::from_millis(500);

/// Lenient match set for a wake phrase: the full phrase, its first and last
/// words, and for phrases of three or more words the leading and trailing
/// two-word spans. Multi-word phrases routinely come back garbled from the
/// recognizer; any fragment is enough to activate.
pub fn wake_variants(phrase: &str) -> Vec<String> {
    let phrase = phrase.to_lowercase();
    let mut variants = vec![phrase.clone()];

    let words: Vec<&str> = phrase.split_whitespace().collect();
    if words.len() > 1 {
        variants.push(words[0].to_string());
        variants.push(words[words.len() - 1].to_string());
        if words.len() > 2 {
            variants.push(words[..2].join(" "));
            variants.push(words[words.len() - 2..].join(" "));
        }
    }
    variants
}

/// Scans recognizer output for the configured activation phrase. Runs in an
/// unbounded loop; cancellation is external (process interrupt) only.
pub struct WakeWordDetector {
    variants: Vec<String>,
}

impl WakeWordDetector {
    pub fn new(wake_phrase: &str) -> Self {
        let variants = wake_variants(wake_phrase);
        tracing::debug!("wake variants: {variants:?}");
        Self { variants }
    }

    fn matches(&self, text: &str) -> bool {
        self.variants.iter().any(|v| text.contains(v.as_str()))
    }

    /// Block until any wake variant appears in a partial or final result.
    /// Starts the source if needed and leaves it running for the command
    /// loop that follows.
    pub async fn detect(
        &self,
        engine: &mut dyn SpeechEngine,
        source: &mut dyn SoundSource,
    ) -> Result<(), VoiceError> {
        source.start()?;
        engine.reset();
        tracing::info!("listening for wake phrase");

        loop {
            let Some(chunk) = source.next_chunk(POLL_WAIT).await else {
                continue;
            };
            let Some(result) = engine.accept(&chunk)? else {
                continue;
            };

            let text = result.text.to_lowercase();
            if text.is_empty() || !self.matches(&text) {
                continue;
            }

            if result.is_final {
                tracing::info!("wake phrase detected in final result");
            } else {
                // Consume the open window so the fragment does not bleed
                // into command collection
                engine.reset();
                tracing::info!("wake phrase detected in partial result");
            }
            return Ok(());
        }
    }
}
