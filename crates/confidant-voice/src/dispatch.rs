use confidant_core::command::{extract_bracketed, SpecialCommand};
use confidant_core::PhraseConfig;
use confidant_llm::LlmQuery;

/// Outcome of dispatching one piece of user input.
#[derive(Debug, PartialEq, Eq)]
pub enum Reply {
    /// Something to show and speak.
    Text(String),
    /// The user asked to quit the program.
    Exit,
}

/// Route one command: bracket-delimited special commands are handled here,
/// everything else is forwarded to the language model. Shared by the voice
/// controller and the CLI loop so both paths honor the same syntax.
pub async fn dispatch(input: &str, phrases: &PhraseConfig, llm: &dyn LlmQuery) -> Reply {
    if let Some(inner) = extract_bracketed(input, &phrases.command_pre, &phrases.command_post) {
        tracing::info!("special command detected: '{inner}'");
        return match SpecialCommand::parse(&inner) {
            SpecialCommand::ListModels => {
                let models = llm.list_models().await;
                if models.is_empty() {
                    Reply::Text(
                        "No models found. Make sure Ollama is running with models installed."
                            .to_string(),
                    )
                } else {
                    Reply::Text(format!("Available models: {}", models.join(", ")))
                }
            }
            SpecialCommand::Exit => Reply::Exit,
            SpecialCommand::Unknown(cmd) => Reply::Text(format!(
                "Unknown command: {cmd}. Try 'list models' or 'exit'."
            )),
        };
    }

    tracing::info!("sending to LLM: '{input}'");
    Reply::Text(llm.send(input).await)
}
