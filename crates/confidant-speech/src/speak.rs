use confidant_core::SpeakError;
use async_trait::async_trait;
use regex::Regex;
use tokio::process::Command;

/// Remove `<think>...</think>` blocks and any other tag-like substrings
/// before vocalizing. Models occasionally leak reasoning markup that should
/// never reach the speakers.
pub fn strip_markup(text: &str) -> String {
    let think = Regex::new(r"(?s)<think>.*?</think>").unwrap();
    let tags = Regex::new(r"<[^>]+>").unwrap();
    let without_think = think.replace_all(text, "");
    tags.replace_all(&without_think, "").trim().to_string()
}

/// The speech-output collaborator. `say` returns the exact text it spoke so
/// the caller can feed it back into the echo filter.
#[async_trait]
pub trait Speaker: Send + Sync {
    async fn say(&self, text: &str) -> Result<String, SpeakError>;
}

// ── SystemSpeaker ─────────────────────────────────────────────

/// Speaks through the platform speech command, blocking until playback
/// completes. Recognition is not drained while this runs; the echo filter
/// exists precisely because capture keeps buffering in the meantime.
pub struct SystemSpeaker {
    program: String,
}

impl SystemSpeaker {
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
        }
    }

    #[cfg(target_os = "macos")]
    fn default_program() -> &'static str {
        "say"
    }

    #[cfg(not(target_os = "macos"))]
    fn default_program() -> &'static str {
        "espeak"
    }
}

impl Default for SystemSpeaker {
    fn default() -> Self {
        Self::new(Self::default_program())
    }
}

#[async_trait]
impl Speaker for SystemSpeaker {
    async fn say(&self, text: &str) -> Result<String, SpeakError> {
        let cleaned = strip_markup(text);
        if cleaned.is_empty() {
            tracing::debug!("nothing to speak (empty after markup strip)");
            return Ok(String::new());
        }

        tracing::info!("speaking: {cleaned}");
        let status = Command::new(&self.program)
            .arg(&cleaned)
            .status()
            .await
            .map_err(|source| SpeakError::Spawn {
                command: self.program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(SpeakError::CommandFailed {
                command: self.program.clone(),
                status,
            });
        }
        Ok(cleaned)
    }
}
