use crate::collect::{CommandCollector, NO_COMMAND_HEARD};
use crate::dispatch::{dispatch, Reply};
use crate::echo::EchoFilter;
use crate::engine::SpeechEngine;
use crate::wake::WakeWordDetector;
use confidant_audio::SoundSource;
use confidant_core::{ConversationState, PhraseConfig, VoiceError};
use confidant_llm::LlmQuery;
use confidant_speech::Speaker;

const ACKNOWLEDGEMENT: &str = "yes";
const FAREWELL: &str = "Goodbye!";

enum Flow {
    Continue,
    Exit,
}

/// The state machine tying the voice pipeline together: idle until the wake
/// phrase, then an active conversation of collect/dispatch/speak cycles
/// until the done phrase (or a bracketed exit) ends it.
pub struct ConversationController {
    phrases: PhraseConfig,
    wake: WakeWordDetector,
    collector: CommandCollector,
    engine: Box<dyn SpeechEngine>,
    source: Box<dyn SoundSource>,
    echo: EchoFilter,
    llm: Box<dyn LlmQuery>,
    speaker: Box<dyn Speaker>,
    state: ConversationState,
}

impl ConversationController {
    pub fn new(
        phrases: PhraseConfig,
        engine: Box<dyn SpeechEngine>,
        source: Box<dyn SoundSource>,
        llm: Box<dyn LlmQuery>,
        speaker: Box<dyn Speaker>,
    ) -> Self {
        let wake = WakeWordDetector::new(&phrases.wake_phrase);
        Self {
            phrases,
            wake,
            collector: CommandCollector::new(),
            engine,
            source,
            echo: EchoFilter::new(),
            llm,
            speaker,
            state: ConversationState::Idle,
        }
    }

    pub fn state(&self) -> ConversationState {
        self.state
    }

    /// Run the conversation loop until a bracketed exit command. External
    /// interruption (Ctrl-C) is handled by the caller racing this future
    /// and then calling [`shutdown`](Self::shutdown).
    pub async fn run(&mut self) -> Result<(), VoiceError> {
        loop {
            match self.state {
                ConversationState::Idle | ConversationState::AwaitingWake => {
                    self.wake
                        .detect(self.engine.as_mut(), self.source.as_mut())
                        .await?;
                    self.state = ConversationState::Active;
                }
                ConversationState::Active => {
                    if let Flow::Exit = self.step_active().await? {
                        return Ok(());
                    }
                }
            }
        }
    }

    /// One collect/dispatch/speak cycle inside an active conversation. The
    /// wake word is never re-required between cycles; only the done phrase
    /// (or exit) leaves `Active`.
    async fn step_active(&mut self) -> Result<Flow, VoiceError> {
        self.speak(ACKNOWLEDGEMENT).await;

        let command = self
            .collector
            .collect(
                self.engine.as_mut(),
                self.source.as_mut(),
                &self.echo,
                &self.phrases,
            )
            .await?;

        if command == NO_COMMAND_HEARD {
            // Nothing heard at all: apologize and re-enter collection
            // within the same active session
            self.speak(NO_COMMAND_HEARD).await;
            return Ok(Flow::Continue);
        }

        if command.is_empty() {
            return Ok(Flow::Continue);
        }

        if command.to_lowercase().contains(&self.phrases.done_phrase) {
            tracing::info!("done phrase detected, exiting conversation");
            self.speak(FAREWELL).await;
            self.state = ConversationState::Idle;
            return Ok(Flow::Continue);
        }

        match dispatch(&command, &self.phrases, self.llm.as_ref()).await {
            Reply::Text(response) => {
                self.speak(&response).await;
                tracing::info!(
                    "ready for next command, say '{}' after speaking or '{}' to exit",
                    self.phrases.end_phrase,
                    self.phrases.done_phrase,
                );
                Ok(Flow::Continue)
            }
            Reply::Exit => {
                self.speak(FAREWELL).await;
                Ok(Flow::Exit)
            }
        }
    }

    /// Speak and remember what was said so the recognizer can tell our own
    /// voice apart from the user's. Speech failures degrade to log noise;
    /// the conversation keeps going.
    async fn speak(&mut self, text: &str) {
        match self.speaker.say(text).await {
            Ok(spoken) if !spoken.is_empty() => self.echo.record_spoken(&spoken),
            Ok(_) => {}
            Err(e) => tracing::warn!("speech synthesis failed: {e}"),
        }
    }

    /// Release the audio stream.
    pub fn shutdown(&mut self) {
        self.source.stop();
    }
}
