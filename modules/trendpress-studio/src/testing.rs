// Test mocks for the studio pipeline.
//
// Two mocks matching the two external trait boundaries:
// - MockSignalSource (SignalSource) — HashMap-based query→stories
// - MockTextGenerator (TextGenerator) — scripted per-call responses
//
// No network, no credentials. `cargo test` in seconds.

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use ai_client::{AiError, GenerationRequest, TextGenerator};
use hn_client::Story;

use crate::traits::SignalSource;

// ---------------------------------------------------------------------------
// MockSignalSource
// ---------------------------------------------------------------------------

/// HashMap-based signal source. Unregistered queries return an empty hit
/// list (or an error with [`MockSignalSource::failing_by_default`]).
/// Builder pattern: `.on_query()`, `.on_any()`.
pub struct MockSignalSource {
    by_query: HashMap<String, Vec<Story>>,
    any: Option<Vec<Story>>,
    fail_unregistered: bool,
}

impl MockSignalSource {
    pub fn new() -> Self {
        Self {
            by_query: HashMap::new(),
            any: None,
            fail_unregistered: false,
        }
    }

    /// Register a fixed hit list for one query.
    pub fn on_query(mut self, query: &str, stories: Vec<Story>) -> Self {
        self.by_query.insert(query.to_string(), stories);
        self
    }

    /// Register a hit list returned for every query without its own entry.
    pub fn on_any(mut self, stories: Vec<Story>) -> Self {
        self.any = Some(stories);
        self
    }

    /// Make unregistered queries fail instead of returning nothing.
    pub fn failing_by_default(mut self) -> Self {
        self.fail_unregistered = true;
        self
    }
}

impl Default for MockSignalSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SignalSource for MockSignalSource {
    async fn search(&self, query: &str) -> Result<Vec<Story>> {
        if let Some(stories) = self.by_query.get(query) {
            return Ok(stories.clone());
        }
        if let Some(stories) = &self.any {
            return Ok(stories.clone());
        }
        if self.fail_unregistered {
            return Err(anyhow!("MockSignalSource: query not registered: {query}"));
        }
        Ok(Vec::new())
    }
}

// ---------------------------------------------------------------------------
// MockTextGenerator
// ---------------------------------------------------------------------------

/// One scripted generator response.
pub enum ScriptedResponse {
    Text(String),
    Fail(String),
}

/// Scripted text generator. Responses are consumed in order; once the script
/// is exhausted the last entry repeats. Captures every request for
/// prompt-content assertions.
pub struct MockTextGenerator {
    script: Mutex<Vec<ScriptedResponse>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl MockTextGenerator {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn returning(text: &str) -> Self {
        Self::new().then_text(text)
    }

    pub fn failing(message: &str) -> Self {
        Self::new().then_fail(message)
    }

    pub fn then_text(self, text: &str) -> Self {
        self.script
            .lock()
            .unwrap()
            .push(ScriptedResponse::Text(text.to_string()));
        self
    }

    pub fn then_fail(self, message: &str) -> Self {
        self.script
            .lock()
            .unwrap()
            .push(ScriptedResponse::Fail(message.to_string()));
        self
    }

    /// Requests seen so far, in call order.
    pub fn seen_requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockTextGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn generate(&self, request: &GenerationRequest) -> ai_client::Result<String> {
        self.requests.lock().unwrap().push(request.clone());

        let mut script = self.script.lock().unwrap();
        let response = if script.len() > 1 {
            script.remove(0)
        } else if let Some(last) = script.first() {
            match last {
                ScriptedResponse::Text(t) => ScriptedResponse::Text(t.clone()),
                ScriptedResponse::Fail(m) => ScriptedResponse::Fail(m.clone()),
            }
        } else {
            ScriptedResponse::Fail("MockTextGenerator: empty script".to_string())
        };

        match response {
            ScriptedResponse::Text(t) => Ok(t),
            ScriptedResponse::Fail(m) => Err(AiError::Api {
                status: 500,
                message: m,
            }),
        }
    }
}
