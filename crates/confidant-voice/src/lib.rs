pub mod collect;
pub mod controller;
pub mod dispatch;
pub mod echo;
pub mod engine;
pub mod recognizer;
pub mod scripted;
pub mod wake;
#[cfg(feature = "vosk")]
pub mod vosk_engine;

pub use collect::{CommandCollector, NO_COMMAND_HEARD};
pub use controller::ConversationController;
pub use dispatch::{dispatch, Reply};
pub use echo::EchoFilter;
pub use engine::SpeechEngine;
pub use recognizer::PhraseRecognizer;
pub use scripted::ScriptedEngine;
pub use wake::{wake_variants, WakeWordDetector};
#[cfg(feature = "vosk")]
pub use vosk_engine::VoskEngine;
