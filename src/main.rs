mod repl;
mod voice;

use anyhow::{Context, Result};
use clap::Parser;
use confidant_core::{AppConfig, SpecialCommand, VoiceError};
use confidant_llm::{LlmQuery, OllamaClient};
use confidant_speech::{Speaker, SystemSpeaker};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "confidant",
    about = "Voice or CLI interaction with local language models"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Run in command-line interface mode
    #[arg(long)]
    cli: bool,

    /// Execute a specific command directly and exit
    #[arg(long)]
    command: Option<String>,

    /// Set the wake phrase
    #[arg(long = "hi", env = "HI_PHRASE")]
    wake_phrase: Option<String>,

    /// Set the end phrase that closes a spoken command
    #[arg(long = "go", env = "GO_PHRASE")]
    end_phrase: Option<String>,

    /// Set the phrase that ends a conversation
    #[arg(long = "done", env = "DONE_PHRASE")]
    done_phrase: Option<String>,

    /// Path to the Vosk speech recognition model
    #[arg(long, env = "VOSK_MODEL_PATH")]
    model_path: Option<String>,

    /// Language model identifier
    #[arg(long, env = "MODEL")]
    model: Option<String>,

    /// Text to send directly to the language model
    text: Vec<String>,
}

impl Cli {
    /// Fold flag and environment overrides into the loaded config so the
    /// rest of the program only ever reads one frozen source of truth.
    fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(wake) = &self.wake_phrase {
            config.phrases.wake = wake.clone();
        }
        if let Some(end) = &self.end_phrase {
            config.phrases.end = end.clone();
        }
        if let Some(done) = &self.done_phrase {
            config.phrases.done = done.clone();
        }
        if let Some(model_path) = &self.model_path {
            config.audio.model_path = model_path.clone();
        }
        if let Some(model) = &self.model {
            config.llm.model = model.clone();
        }
    }
}

async fn run_direct_command(command: &str, llm: &dyn LlmQuery) {
    println!("Executing command: {command}");
    match SpecialCommand::parse(command) {
        SpecialCommand::ListModels => {
            let models = llm.list_models().await;
            if models.is_empty() {
                println!(
                    "No models found. Make sure Ollama is running with models installed."
                );
            } else {
                println!("Available models: {}", models.join(", "));
            }
        }
        SpecialCommand::Exit => {}
        SpecialCommand::Unknown(cmd) => println!("Unknown command: {cmd}"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("failed to load config from {:?}", cli.config))?;
    cli.apply_overrides(&mut config);

    let env_filter = EnvFilter::try_new(&config.general.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let phrases = config.phrase_config();
    let llm = OllamaClient::new(&config.llm.base_url, &config.llm.model);
    let speaker = config
        .speech
        .program
        .as_deref()
        .map(SystemSpeaker::new)
        .unwrap_or_default();

    if let Some(command) = cli.command.as_deref() {
        run_direct_command(command, &llm).await;
        return Ok(());
    }

    let initial_text = if cli.text.is_empty() {
        None
    } else {
        Some(cli.text.join(" "))
    };

    // Free text without --cli is a one-shot query
    if let Some(query) = &initial_text {
        if !cli.cli {
            println!("Sending to LLM: '{query}'");
            let response = llm.send(query).await;
            println!("Response: {response}");
            if let Err(e) = speaker.say(&response).await {
                tracing::warn!("speech synthesis failed: {e}");
            }
            return Ok(());
        }
    }

    if cli.cli {
        return repl::run(&phrases, &llm, &speaker, initial_text.as_deref()).await;
    }

    match voice::run(&config).await {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::warn!("voice mode unavailable: {e}");
            if let VoiceError::ModelNotFound(path) = &e {
                println!("Speech model not found at {path}");
                println!("Download one from https://alphacephei.com/vosk/models and unpack it,");
                println!("or point VOSK_MODEL_PATH at your model directory.");
            }
            println!("Falling back to CLI mode...");
            repl::run(&phrases, &llm, &speaker, None).await
        }
    }
}
