use confidant_core::text::{normalize, similarity};
use std::time::Instant;

/// Similarity at or above this marks recognized text as the system hearing
/// its own speech.
const ECHO_THRESHOLD: f64 = 0.7;

struct SpokenMemory {
    text: String,
    at: Instant,
}

/// Tracks the single most recent system utterance and suppresses recognized
/// text that is likely an acoustic echo of it. The wake/command loop listens
/// continuously — including while the system itself is speaking over nearby
/// speakers — and must not re-trigger on its own voice.
#[derive(Default)]
pub struct EchoFilter {
    last_spoken: Option<SpokenMemory>,
}

impl EchoFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record what the system just said, overwriting any prior utterance.
    /// Only the most recent utterance is kept.
    pub fn record_spoken(&mut self, text: &str) {
        let normalized = normalize(text);
        if normalized.is_empty() {
            return;
        }
        tracing::debug!("recorded spoken text: '{normalized}'");
        self.last_spoken = Some(SpokenMemory {
            text: normalized,
            at: Instant::now(),
        });
    }

    /// Whether `candidate` is similar enough to the last system utterance
    /// to be the microphone picking up our own speech.
    pub fn is_echo(&self, candidate: &str) -> bool {
        let Some(memory) = &self.last_spoken else {
            return false;
        };
        let cleaned = normalize(candidate);
        if cleaned.is_empty() {
            return false;
        }
        let score = similarity(&cleaned, &memory.text);
        if score >= ECHO_THRESHOLD {
            tracing::debug!(
                score,
                age_ms = memory.at.elapsed().as_millis() as u64,
                "suppressing echo: '{cleaned}'"
            );
            true
        } else {
            false
        }
    }

    /// The normalized text of the last system utterance, if any.
    pub fn last_spoken(&self) -> Option<&str> {
        self.last_spoken.as_ref().map(|m| m.text.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_memory_is_never_echo() {
        let filter = EchoFilter::new();
        assert!(!filter.is_echo("anything at all"));
    }

    #[test]
    fn test_exact_repeat_is_echo() {
        let mut filter = EchoFilter::new();
        filter.record_spoken("The capital of France is Paris.");
        assert!(filter.is_echo("the capital of france is paris"));
    }

    #[test]
    fn test_substring_of_spoken_is_echo() {
        let mut filter = EchoFilter::new();
        filter.record_spoken("The capital of France is Paris.");
        assert!(filter.is_echo("capital of france"));
    }

    #[test]
    fn test_candidate_containing_spoken_is_echo() {
        let mut filter = EchoFilter::new();
        filter.record_spoken("yes");
        assert!(filter.is_echo("yes what can I do"));
    }

    #[test]
    fn test_unrelated_text_is_not_echo() {
        let mut filter = EchoFilter::new();
        filter.record_spoken("The capital of France is Paris.");
        assert!(!filter.is_echo("turn the lights on"));
    }

    #[test]
    fn test_empty_candidate_is_not_echo() {
        let mut filter = EchoFilter::new();
        filter.record_spoken("hello");
        assert!(!filter.is_echo(""));
        assert!(!filter.is_echo("?!"));
    }

    #[test]
    fn test_record_overwrites_previous_utterance() {
        let mut filter = EchoFilter::new();
        filter.record_spoken("first response");
        filter.record_spoken("entirely different words");
        assert!(!filter.is_echo("first response please"));
        assert!(filter.is_echo("entirely different words"));
    }

    #[test]
    fn test_record_empty_keeps_previous() {
        let mut filter = EchoFilter::new();
        filter.record_spoken("keep me");
        filter.record_spoken("   ");
        assert_eq!(filter.last_spoken(), Some("keep me"));
    }

    #[test]
    fn test_partial_word_overlap_below_threshold() {
        let mut filter = EchoFilter::new();
        filter.record_spoken("what is the weather like today");
        // 2 of 6 words shared, well under 0.7
        assert!(!filter.is_echo("what books should i read today"));
    }
}
