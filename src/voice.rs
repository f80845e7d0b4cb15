use confidant_audio::AudioCapture;
use confidant_core::{AppConfig, VoiceError};
use confidant_llm::{LlmQuery, OllamaClient};
use confidant_speech::{Speaker, SystemSpeaker};
use confidant_voice::ConversationController;
use confidant_voice::SpeechEngine;

/// Run the hands-free pipeline until a spoken exit or Ctrl-C. Errors here
/// mean voice mode could not run; the caller decides what to fall back to.
pub async fn run(config: &AppConfig) -> Result<(), VoiceError> {
    let engine = build_engine(config)?;

    let phrases = config.phrase_config();
    println!("Say '{}' to get my attention.", phrases.wake_phrase);
    println!("After speaking a command, say '{}' to send it.", phrases.end_phrase);
    println!("Say '{}' to end a conversation.", phrases.done_phrase);
    println!(
        "Say '{} exit {}' to quit entirely.",
        phrases.command_pre, phrases.command_post
    );

    let llm = OllamaClient::new(&config.llm.base_url, &config.llm.model);
    let models = llm.list_models().await;
    if models.is_empty() {
        println!("No models found. Make sure Ollama is running with models installed.");
    } else {
        println!("Available models: {}", models.join(", "));
    }

    let source = AudioCapture::new(
        &config.audio.device_name,
        config.audio.sample_rate,
        config.audio.chunk_samples,
    );
    let speaker: Box<dyn Speaker> = Box::new(
        config
            .speech
            .program
            .as_deref()
            .map(SystemSpeaker::new)
            .unwrap_or_default(),
    );

    let mut controller = ConversationController::new(
        phrases,
        engine,
        Box::new(source),
        Box::new(llm),
        speaker,
    );

    let result = tokio::select! {
        r = controller.run() => r,
        _ = tokio::signal::ctrl_c() => {
            println!("\nGoodbye!");
            Ok(())
        }
    };
    controller.shutdown();
    result
}

#[cfg(feature = "vosk")]
fn build_engine(config: &AppConfig) -> Result<Box<dyn SpeechEngine>, VoiceError> {
    let engine = confidant_voice::VoskEngine::new(
        &config.audio.model_path,
        config.audio.sample_rate,
    )?;
    Ok(Box::new(engine))
}

#[cfg(not(feature = "vosk"))]
fn build_engine(_config: &AppConfig) -> Result<Box<dyn SpeechEngine>, VoiceError> {
    Err(VoiceError::RecognizerInit(
        "built without the 'vosk' feature; voice mode is unavailable".to_string(),
    ))
}
