//! Domain expert agents.
//!
//! Every expert has the same contract, "answer a query within one support
//! domain", and differs only in its label and prompt template. The
//! [`ExpertPanel`] holds exactly one expert per [`Label`].

use std::time::Duration;

use async_trait::async_trait;

use super::config::AgentConfig;
use super::label::Label;
use super::prompt::{PromptSet, build_expert_prompt};
use super::provider::LlmProvider;
use super::traits::{Agent, AgentResponse};
use crate::error::AgentError;

/// Agent that answers a customer query for one support domain.
pub struct ExpertAgent {
    label: Label,
    model: String,
    max_tokens: u32,
    temperature: f32,
    timeout: Duration,
    template: String,
}

impl ExpertAgent {
    /// Creates the expert for `label` with the given prompt template.
    #[must_use]
    pub fn new(label: Label, config: &AgentConfig, template: String) -> Self {
        Self {
            label,
            model: config.expert_model.clone(),
            max_tokens: config.expert_max_tokens,
            temperature: config.temperature,
            timeout: config.timeout,
            template,
        }
    }

    /// Domain this expert answers for.
    pub const fn label(&self) -> Label {
        self.label
    }

    /// Produces the raw expert answer for `query`.
    ///
    /// The generated text is returned as-is after trimming; there is no retry
    /// and no content validation beyond rejecting an empty answer.
    ///
    /// # Errors
    ///
    /// Propagates provider failures and timeouts, and returns
    /// [`AgentError::EmptyResponse`] when the model produced no text.
    pub async fn answer(
        &self,
        provider: &dyn LlmProvider,
        query: &str,
    ) -> Result<AgentResponse, AgentError> {
        let prompt = build_expert_prompt(&self.template, query);
        self.execute(provider, &prompt)
            .await?
            .require_content(self.name())
    }
}

#[async_trait]
impl Agent for ExpertAgent {
    fn name(&self) -> &'static str {
        self.label.agent_name()
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn temperature(&self) -> f32 {
        self.temperature
    }

    fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// One expert per label.
///
/// Lookup is an exhaustive `match`, so a label without an expert (or an
/// expert without a label) does not compile.
pub struct ExpertPanel {
    order: ExpertAgent,
    delivery: ExpertAgent,
    payment: ExpertAgent,
    account: ExpertAgent,
}

impl ExpertPanel {
    /// Builds the panel from configuration and prompt templates.
    #[must_use]
    pub fn new(config: &AgentConfig, prompts: &PromptSet) -> Self {
        let expert = |label: Label| ExpertAgent::new(label, config, prompts.expert(label).to_string());
        Self {
            order: expert(Label::Order),
            delivery: expert(Label::Delivery),
            payment: expert(Label::Payment),
            account: expert(Label::Account),
        }
    }

    /// Expert registered for `label`.
    pub const fn expert(&self, label: Label) -> &ExpertAgent {
        match label {
            Label::Order => &self.order,
            Label::Delivery => &self.delivery,
            Label::Payment => &self.payment,
            Label::Account => &self.account,
        }
    }

    /// All experts in label order.
    pub fn iter(&self) -> impl Iterator<Item = &ExpertAgent> {
        Label::ALL.into_iter().map(|label| self.expert(label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AgentConfig {
        AgentConfig::builder()
            .api_key("test")
            .expert_model("llama-3.3-70b-versatile")
            .expert_max_tokens(512)
            .build()
            .unwrap_or_else(|_| unreachable!())
    }

    #[test]
    fn test_panel_has_one_expert_per_label() {
        let panel = ExpertPanel::new(&config(), &PromptSet::defaults());
        for label in Label::ALL {
            assert_eq!(panel.expert(label).label(), label);
        }
        let names: Vec<&str> = panel.iter().map(Agent::name).collect();
        assert_eq!(
            names,
            [
                "order_expert",
                "delivery_expert",
                "payment_expert",
                "account_expert"
            ]
        );
    }

    #[test]
    fn test_expert_uses_its_own_template() {
        let mut prompts = PromptSet::defaults();
        prompts.delivery = "Delivery desk: {query}".to_string();
        let panel = ExpertPanel::new(&config(), &prompts);
        assert_eq!(
            build_expert_prompt(&panel.expert(Label::Delivery).template, "late parcel"),
            "Delivery desk: late parcel"
        );
        assert_ne!(
            panel.expert(Label::Order).template,
            panel.expert(Label::Delivery).template
        );
    }

    #[test]
    fn test_agent_properties() {
        let panel = ExpertPanel::new(&config(), &PromptSet::defaults());
        let expert = panel.expert(Label::Payment);
        assert_eq!(expert.model(), "llama-3.3-70b-versatile");
        assert_eq!(expert.max_tokens(), 512);
        assert_eq!(expert.timeout(), config().timeout);
    }
}
