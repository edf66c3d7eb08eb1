//! Shared fixtures for integration tests.

#![allow(dead_code, clippy::unwrap_used, clippy::panic)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use support_router::agent::{
    AgentConfig, ChatRequest, ChatResponse, Label, LlmProvider, Orchestrator, PromptSet,
    TokenUsage,
};
use support_router::error::AgentError;

/// Which role a prompt was rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Classify,
    Expert(Label),
    Synthesize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    Fail,
    Hang,
}

/// Provider that recognizes the default prompts and answers per role.
///
/// The classifier gets `classifier_reply`; each expert answers
/// `"<label> notes: ..."`; the synthesizer wraps the expert notes it was
/// given. Faults can be injected per role.
pub struct ScriptedProvider {
    classifier_reply: String,
    faults: Vec<(Call, Fault)>,
    calls: Mutex<Vec<(Call, String)>>,
}

impl ScriptedProvider {
    pub fn new(classifier_reply: &str) -> Self {
        Self {
            classifier_reply: classifier_reply.to_string(),
            faults: Vec::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_fault(mut self, call: Call, fault: Fault) -> Self {
        self.faults.push((call, fault));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().iter().map(|(c, _)| *c).collect()
    }

    pub fn prompt_for(&self, call: Call) -> Option<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .find(|(c, _)| *c == call)
            .map(|(_, p)| p.clone())
    }

    fn identify(prompt: &str) -> Call {
        if prompt.contains("ONE WORD ONLY") {
            return Call::Classify;
        }
        if prompt.contains("Expert notes") {
            return Call::Synthesize;
        }
        Label::ALL
            .into_iter()
            .find(|label| prompt.contains(label.domain()))
            .map_or_else(|| panic!("unrecognized prompt: {prompt}"), Call::Expert)
    }
}

pub fn expert_notes(label: Label) -> String {
    format!("{label} notes: check the {label} records")
}

pub fn final_reply(notes: &str) -> String {
    format!("Thanks for reaching out! In short: {notes}.")
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, AgentError> {
        let prompt = request.prompt.clone();
        let call = Self::identify(&prompt);
        self.calls.lock().unwrap().push((call, prompt.clone()));

        match self.faults.iter().find(|(c, _)| *c == call).map(|(_, f)| *f) {
            Some(Fault::Fail) => {
                return Err(AgentError::ApiRequest {
                    message: "service unavailable".to_string(),
                    code: Some("503".to_string()),
                });
            }
            Some(Fault::Hang) => {
                tokio::time::sleep(Duration::from_secs(60)).await;
            }
            None => {}
        }

        let content = match call {
            Call::Classify => self.classifier_reply.clone(),
            Call::Expert(label) => expert_notes(label),
            Call::Synthesize => {
                let notes = Label::ALL
                    .into_iter()
                    .map(expert_notes)
                    .find(|notes| prompt.contains(notes.as_str()))
                    .unwrap_or_default();
                final_reply(&notes)
            }
        };

        Ok(ChatResponse {
            content,
            usage: TokenUsage {
                prompt_tokens: 20,
                completion_tokens: 10,
                total_tokens: 30,
            },
            finish_reason: Some("stop".to_string()),
        })
    }
}

pub fn test_config() -> AgentConfig {
    AgentConfig::builder()
        .api_key("test-key")
        .timeout(Duration::from_millis(200))
        .build()
        .unwrap()
}

pub fn orchestrator(provider: &Arc<ScriptedProvider>) -> Orchestrator {
    Orchestrator::with_prompts(
        Arc::clone(provider) as Arc<dyn LlmProvider>,
        &test_config(),
        &PromptSet::defaults(),
    )
}
