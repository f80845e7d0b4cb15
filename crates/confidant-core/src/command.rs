//! Bracket-delimited control commands. Input containing the configured
//! pre-phrase followed by the post-phrase is treated as a system command
//! rather than something to send to the language model.

/// Extract the text strictly between `pre` and `post`, if both appear in
/// order. Matching is case-insensitive; the extracted text is trimmed.
/// Nothing between the phrases still counts as a (empty, unknown) command.
pub fn extract_bracketed(input: &str, pre: &str, post: &str) -> Option<String> {
    let lowered = input.to_lowercase();
    let pre = pre.to_lowercase();
    let post = post.to_lowercase();

    let start = lowered.find(&pre)? + pre.len();
    let end = lowered[start..].find(&post)? + start;
    Some(lowered[start..end].trim().to_string())
}

/// A recognized (or unrecognized) bracket command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialCommand {
    ListModels,
    Exit,
    Unknown(String),
}

impl SpecialCommand {
    pub fn parse(text: &str) -> Self {
        match text.to_lowercase().trim() {
            "list models" => SpecialCommand::ListModels,
            "exit" => SpecialCommand::Exit,
            other => SpecialCommand::Unknown(other.to_string()),
        }
    }
}
