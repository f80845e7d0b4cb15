use anyhow::Result;
use confidant_core::PhraseConfig;
use confidant_llm::LlmQuery;
use confidant_speech::Speaker;
use confidant_voice::{dispatch, Reply};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Interactive line loop sharing the voice pipeline's command syntax.
/// `initial` is processed as the first input before reading stdin.
pub async fn run(
    phrases: &PhraseConfig,
    llm: &dyn LlmQuery,
    speaker: &dyn Speaker,
    initial: Option<&str>,
) -> Result<()> {
    println!("Confidant is active in CLI mode.");
    println!("Type your questions and press Enter. Responses are spoken aloud.");
    println!(
        "Special commands: {} [command] {}",
        phrases.command_pre, phrases.command_post
    );
    println!(
        "  Example: {} list models {}",
        phrases.command_pre, phrases.command_post
    );
    println!("Type 'exit' to quit.");
    println!();

    let models = llm.list_models().await;
    if models.is_empty() {
        println!("No models found. Make sure Ollama is running with models installed.");
    } else {
        println!("Available models: {}", models.join(", "));
    }

    if let Some(text) = initial {
        if !process(text, phrases, llm, speaker).await {
            return Ok(());
        }
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("exit") {
            println!("Goodbye!");
            break;
        }
        if !process(input, phrases, llm, speaker).await {
            break;
        }
    }

    Ok(())
}

/// Returns false when the input asked to quit.
async fn process(
    input: &str,
    phrases: &PhraseConfig,
    llm: &dyn LlmQuery,
    speaker: &dyn Speaker,
) -> bool {
    match dispatch(input, phrases, llm).await {
        Reply::Text(response) => {
            println!("{response}");
            if let Err(e) = speaker.say(&response).await {
                tracing::warn!("speech synthesis failed: {e}");
            }
            true
        }
        Reply::Exit => {
            println!("Goodbye!");
            false
        }
    }
}
