use async_trait::async_trait;
use confidant_audio::ScriptedSource;
use confidant_core::{PhraseConfig, SpeakError};
use confidant_llm::LlmQuery;
use confidant_speech::Speaker;
use confidant_voice::{ConversationController, ScriptedEngine};
use std::sync::{Arc, Mutex};
use std::time::Duration;

struct RecordingLlm {
    requests: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl LlmQuery for RecordingLlm {
    async fn send(&self, request: &str) -> String {
        self.requests.lock().unwrap().push(request.to_string());
        format!("you said: {request}")
    }

    async fn list_models(&self) -> Vec<String> {
        vec!["gemma2:latest".to_string(), "llama3:8b".to_string()]
    }
}

struct RecordingSpeaker {
    spoken: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl Speaker for RecordingSpeaker {
    async fn say(&self, text: &str) -> Result<String, SpeakError> {
        self.spoken.lock().unwrap().push(text.to_string());
        Ok(text.to_string())
    }
}

fn phrases() -> PhraseConfig {
    PhraseConfig {
        wake_phrase: "listen up".to_string(),
        end_phrase: "go for it".to_string(),
        done_phrase: "that will do".to_string(),
        command_pre: "hocus pocus".to_string(),
        command_post: "abracadabra".to_string(),
        command_timeout: Duration::from_secs(30),
        silence_timeout: Duration::from_secs(5),
    }
}

#[tokio::test(start_paused = true)]
async fn test_full_session_wake_to_exit() {
    // A whole conversation: garbled wake fragment, an echoed acknowledgement,
    // a two-segment command, a model listing, then a spoken exit.
    let mut engine = ScriptedEngine::new();
    engine
        .push_final("something unrelated entirely")
        .push_partial("listen u")
        .push_final("yes")
        .push_final("turn the lights")
        .push_final("on in the kitchen go for it")
        .push_final("hocus pocus list models abracadabra go for it")
        .push_final("hocus pocus exit abracadabra go for it");
    let mut source = ScriptedSource::new();
    for _ in 0..7 {
        source.push_chunk();
    }

    let requests = Arc::new(Mutex::new(Vec::new()));
    let spoken = Arc::new(Mutex::new(Vec::new()));
    let llm = RecordingLlm {
        requests: Arc::clone(&requests),
    };
    let speaker = RecordingSpeaker {
        spoken: Arc::clone(&spoken),
    };

    let mut controller = ConversationController::new(
        phrases(),
        Box::new(engine),
        Box::new(source),
        Box::new(llm),
        Box::new(speaker),
    );

    controller.run().await.unwrap();
    controller.shutdown();

    // The two-segment command reached the LLM as one string; the bracket
    // commands and the echoed "yes" did not
    assert_eq!(
        requests.lock().unwrap().as_slice(),
        ["turn the lights on in the kitchen"],
    );

    let spoken = spoken.lock().unwrap();
    assert_eq!(
        spoken.as_slice(),
        [
            "yes",
            "you said: turn the lights on in the kitchen",
            "yes",
            "Available models: gemma2:latest, llama3:8b",
            "yes",
            "Goodbye!",
        ],
    );
}

#[tokio::test(start_paused = true)]
async fn test_done_phrase_ends_conversation_but_not_session() {
    let mut engine = ScriptedEngine::new();
    engine
        .push_final("listen up")
        .push_final("that will do go for it")
        // A second wake re-activates the same session
        .push_final("listen up")
        .push_final("hocus pocus exit abracadabra go for it");
    let mut source = ScriptedSource::new();
    for _ in 0..4 {
        source.push_chunk();
    }

    let requests = Arc::new(Mutex::new(Vec::new()));
    let spoken = Arc::new(Mutex::new(Vec::new()));
    let llm = RecordingLlm {
        requests: Arc::clone(&requests),
    };
    let speaker = RecordingSpeaker {
        spoken: Arc::clone(&spoken),
    };

    let mut controller = ConversationController::new(
        phrases(),
        Box::new(engine),
        Box::new(source),
        Box::new(llm),
        Box::new(speaker),
    );

    controller.run().await.unwrap();

    let spoken = spoken.lock().unwrap();
    assert_eq!(
        spoken.as_slice(),
        ["yes", "Goodbye!", "yes", "Goodbye!"],
    );
    assert!(requests.lock().unwrap().is_empty());
}
