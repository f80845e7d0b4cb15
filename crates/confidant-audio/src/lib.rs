pub mod capture;
pub mod scripted;
pub mod source;

pub use capture::AudioCapture;
pub use scripted::ScriptedSource;
pub use source::SoundSource;
