/// Capture sample rate expected by the recognizer (16 kHz mono).
pub const SAMPLE_RATE: u32 = 16_000;

/// Samples per capture chunk (0.5 s at 16 kHz).
pub const CHUNK_SAMPLES: usize = 8_000;

/// A fixed-size block of 16-bit PCM samples from the microphone.
#[derive(Debug, Clone)]
pub struct AudioChunk {
    pub samples: Vec<i16>,
    pub sample_rate: u32,
}

/// A transcription produced by a speech engine. Final results close the
/// engine's decoding window; partial results are provisional and may be
/// superseded by a later result for the same utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionResult {
    pub text: String,
    pub is_final: bool,
}

impl RecognitionResult {
    pub fn partial(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_final: false,
        }
    }

    pub fn finalized(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_final: true,
        }
    }
}

/// Conversation state held by the controller. `AwaitingWake` is
/// behaviorally identical to `Idle`: both wait for the wake phrase.
/// Command collection only ever runs in `Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConversationState {
    #[default]
    Idle,
    AwaitingWake,
    Active,
}

impl ConversationState {
    pub fn is_active(self) -> bool {
        self == ConversationState::Active
    }
}
