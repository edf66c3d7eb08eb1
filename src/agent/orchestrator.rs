//! Orchestrator for the classify → answer → synthesize workflow.
//!
//! A run walks a fixed state machine:
//!
//! ```text
//! Start ──classify──▶ Classified ──answer──▶ Answered ──synthesize──▶ Synthesized
//! ```
//!
//! Each run owns its [`WorkflowState`]; the only thing shared between
//! concurrent runs is the provider handle.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use super::classifier::{Classification, ClassifierAgent};
use super::config::AgentConfig;
use super::expert::ExpertPanel;
use super::label::Label;
use super::prompt::PromptSet;
use super::provider::LlmProvider;
use super::synthesizer::SynthesizerAgent;
use crate::error::{AgentError, WorkflowError};

/// Position of a run in the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Query accepted, nothing generated yet.
    Start,
    /// Label chosen.
    Classified,
    /// Expert answer produced.
    Answered,
    /// Final answer produced. Terminal.
    Synthesized,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Start => "start",
            Self::Classified => "classified",
            Self::Answered => "answered",
            Self::Synthesized => "synthesized",
        })
    }
}

/// Workflow step that issues a provider call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    /// `Start → Classified`.
    Classify,
    /// `Classified → Answered`.
    Answer,
    /// `Answered → Synthesized`.
    Synthesize,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Classify => "classifying",
            Self::Answer => "answering",
            Self::Synthesize => "synthesizing",
        })
    }
}

/// Mutable record of one run.
///
/// Fields are only set through the transition methods, which reject any call
/// made from the wrong stage, so the label always exists before the expert
/// answer and the expert answer before the final answer.
#[derive(Debug, Clone)]
pub struct WorkflowState {
    query: String,
    classification: Option<Classification>,
    expert_answer: Option<String>,
    final_answer: Option<String>,
    stage: Stage,
    history: Vec<Stage>,
}

impl WorkflowState {
    /// Starts a run for `query`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::EmptyInput`] for an empty or whitespace-only query.
    pub fn new(query: &str) -> Result<Self, WorkflowError> {
        if query.trim().is_empty() {
            return Err(WorkflowError::EmptyInput);
        }
        Ok(Self {
            query: query.to_string(),
            classification: None,
            expert_answer: None,
            final_answer: None,
            stage: Stage::Start,
            history: vec![Stage::Start],
        })
    }

    fn advance(&mut self, from: Stage, to: Stage) -> Result<(), WorkflowError> {
        if self.stage != from {
            return Err(WorkflowError::OutOfOrder {
                stage: self.stage,
                attempted: to,
            });
        }
        self.stage = to;
        self.history.push(to);
        Ok(())
    }

    /// `Start → Classified`. Returns the label to dispatch on.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::OutOfOrder`] unless the run is at `Start`.
    pub fn record_classification(
        &mut self,
        classification: Classification,
    ) -> Result<Label, WorkflowError> {
        self.advance(Stage::Start, Stage::Classified)?;
        let label = classification.label();
        self.classification = Some(classification);
        Ok(label)
    }

    /// `Classified → Answered`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::OutOfOrder`] unless the run is at `Classified`.
    pub fn record_expert_answer(&mut self, answer: String) -> Result<(), WorkflowError> {
        self.advance(Stage::Classified, Stage::Answered)?;
        self.expert_answer = Some(answer);
        Ok(())
    }

    /// Query and expert answer for the synthesizer.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::OutOfOrder`] unless the run is at `Answered`.
    pub fn synthesis_input(&self) -> Result<(&str, &str), WorkflowError> {
        match (self.stage, self.expert_answer.as_deref()) {
            (Stage::Answered, Some(answer)) => Ok((&self.query, answer)),
            _ => Err(WorkflowError::OutOfOrder {
                stage: self.stage,
                attempted: Stage::Synthesized,
            }),
        }
    }

    /// `Answered → Synthesized`. The last mutation of a run.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::OutOfOrder`] unless the run is at `Answered`.
    pub fn record_final_answer(&mut self, answer: String) -> Result<&str, WorkflowError> {
        self.advance(Stage::Answered, Stage::Synthesized)?;
        Ok(self.final_answer.insert(answer))
    }

    /// The customer's message.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Classifier outcome, once classified.
    pub const fn classification(&self) -> Option<&Classification> {
        self.classification.as_ref()
    }

    /// Dispatch label, once classified.
    pub fn label(&self) -> Option<Label> {
        self.classification.as_ref().map(Classification::label)
    }

    /// Raw expert answer, once answered.
    pub fn expert_answer(&self) -> Option<&str> {
        self.expert_answer.as_deref()
    }

    /// Final answer, once synthesized.
    pub fn final_answer(&self) -> Option<&str> {
        self.final_answer.as_deref()
    }

    /// Current stage.
    pub const fn stage(&self) -> Stage {
        self.stage
    }

    /// Every stage entered so far, in order.
    pub fn history(&self) -> &[Stage] {
        &self.history
    }
}

/// Outcome of a successful run.
///
/// Carries the final reply plus routing metadata. The raw expert answer is
/// deliberately absent.
#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    /// Customer-facing reply.
    pub response: String,
    /// Label the query was dispatched on.
    pub label: Label,
    /// Whether the classifier answer was unusable and the default label applied.
    pub fallback: bool,
    /// Stages visited, in order.
    pub stages: Vec<Stage>,
    /// Tokens used across all three calls.
    pub total_tokens: u32,
    /// Wall-clock time of the run.
    pub elapsed_ms: u64,
}

/// Orchestrates the support workflow.
///
/// Holds the three agent roles and the shared provider handle. Cheap to share
/// behind an `Arc`; runs never mutate it.
pub struct Orchestrator {
    provider: Arc<dyn LlmProvider>,
    classifier: ClassifierAgent,
    experts: ExpertPanel,
    synthesizer: SynthesizerAgent,
}

impl Orchestrator {
    /// Creates a new orchestrator with the given provider and configuration.
    ///
    /// Loads prompt templates from the directory specified in
    /// [`AgentConfig::prompt_dir`], falling back to compiled-in defaults.
    pub fn new(provider: Arc<dyn LlmProvider>, config: &AgentConfig) -> Self {
        let prompts = PromptSet::load(config.prompt_dir.as_deref());
        Self::with_prompts(provider, config, &prompts)
    }

    /// Creates a new orchestrator with explicit prompt templates.
    pub fn with_prompts(
        provider: Arc<dyn LlmProvider>,
        config: &AgentConfig,
        prompts: &PromptSet,
    ) -> Self {
        Self {
            provider,
            classifier: ClassifierAgent::new(config, prompts.classifier.clone()),
            experts: ExpertPanel::new(config, prompts),
            synthesizer: SynthesizerAgent::new(config, prompts.synthesizer.clone()),
        }
    }

    /// Name of the provider backing every call.
    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Runs the workflow and returns only the final reply.
    ///
    /// # Errors
    ///
    /// See [`Orchestrator::run_detailed`].
    pub async fn run(&self, query: &str) -> Result<String, WorkflowError> {
        self.run_detailed(query).await.map(|result| result.response)
    }

    /// Runs the workflow.
    ///
    /// # Steps
    ///
    /// 1. Reject an empty query before any provider call
    /// 2. Classify the query into a [`Label`]
    /// 3. Dispatch to exactly one expert
    /// 4. Synthesize the final reply from the expert answer
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::EmptyInput`] for an empty query and
    /// [`WorkflowError::GenerationFailure`] when any provider call fails. A
    /// failed run returns nothing else: no partial or expert-only answer.
    pub async fn run_detailed(&self, query: &str) -> Result<RunResult, WorkflowError> {
        let start = Instant::now();
        let mut state = WorkflowState::new(query)?;
        let mut total_tokens: u32 = 0;

        // Start → Classified
        let (classification, response) = self
            .classifier
            .classify(&*self.provider, state.query())
            .await
            .map_err(|source| generation_failure(Step::Classify, source))?;
        total_tokens = total_tokens.saturating_add(response.usage.total_tokens);
        let fallback = classification.is_fallback();
        let label = state.record_classification(classification)?;
        debug!(label = %label, fallback, "query classified");

        // Classified → Answered
        let expert = self.experts.expert(label);
        let response = expert
            .answer(&*self.provider, state.query())
            .await
            .map_err(|source| generation_failure(Step::Answer, source))?;
        total_tokens = total_tokens.saturating_add(response.usage.total_tokens);
        state.record_expert_answer(response.content)?;
        debug!(label = %label, "expert answered");

        // Answered → Synthesized
        let (query, expert_answer) = state.synthesis_input()?;
        let response = self
            .synthesizer
            .synthesize(&*self.provider, query, expert_answer)
            .await
            .map_err(|source| generation_failure(Step::Synthesize, source))?;
        total_tokens = total_tokens.saturating_add(response.usage.total_tokens);
        let final_answer = state.record_final_answer(response.content)?.to_string();

        let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        info!(label = %label, fallback, total_tokens, elapsed_ms, "run complete");

        Ok(RunResult {
            response: final_answer,
            label,
            fallback,
            stages: state.history().to_vec(),
            total_tokens,
            elapsed_ms,
        })
    }
}

fn generation_failure(step: Step, source: AgentError) -> WorkflowError {
    WorkflowError::GenerationFailure { step, source }
}

impl fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Orchestrator")
            .field("provider", &self.provider.name())
            .field("default_label", &self.classifier.default_label())
            .finish_non_exhaustive()
    }
}
