use serde::{Deserialize, Serialize};

/// One single-shot generation request: a system instruction, a user
/// instruction, and a creativity knob. No streaming, no multi-turn state.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub system: String,
    pub user: String,
    pub temperature: f32,
}

// --- Wire types for the Responses API ---

#[derive(Debug, Serialize)]
pub(crate) struct ResponsesRequest {
    pub model: String,
    pub input: Vec<InputMessage>,
    pub temperature: f32,
}

#[derive(Debug, Serialize)]
pub(crate) struct InputMessage {
    pub role: &'static str,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResponsesPayload {
    #[serde(default)]
    pub output_text: Option<String>,
    #[serde(default)]
    pub output: Vec<OutputItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OutputItem {
    #[serde(default)]
    pub content: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ContentPart {
    #[serde(default)]
    pub text: Option<String>,
}

impl ResponsesPayload {
    /// Pull the generated text out of the payload: a consolidated
    /// `output_text` when present, otherwise every non-empty text fragment
    /// from the nested output items, joined by newlines.
    pub fn output_text(&self) -> String {
        if let Some(text) = &self.output_text {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                return trimmed.to_string();
            }
        }

        self.output
            .iter()
            .flat_map(|item| item.content.iter())
            .filter_map(|part| part.text.as_deref())
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
