//! Classifier agent.
//!
//! Asks the model which support domain a message belongs to and turns the
//! answer into a [`Label`]. An answer outside the label set does not fail the
//! run: it resolves to the configured default label and is reported as a
//! [`Classification::Fallback`].

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::warn;

use super::config::AgentConfig;
use super::label::Label;
use super::prompt::build_classifier_prompt;
use super::provider::LlmProvider;
use super::traits::{Agent, AgentResponse};
use crate::error::AgentError;

/// Outcome of classifying a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Classification {
    /// The model answered with a valid label.
    Matched {
        /// Label the model chose.
        label: Label,
    },
    /// The model answered with something else; the default label is used.
    Fallback {
        /// Normalized model output.
        raw: String,
        /// Default label used for dispatch.
        label: Label,
    },
}

impl Classification {
    /// Interprets raw classifier output.
    ///
    /// The output is trimmed and lowercased; anything that is then not exactly
    /// one of the label tokens (including an empty answer) yields `default`.
    pub fn from_output(raw: &str, default: Label) -> Self {
        Label::parse(raw).map_or_else(
            || Self::Fallback {
                raw: raw.trim().to_lowercase(),
                label: default,
            },
            |label| Self::Matched { label },
        )
    }

    /// Label used for dispatch.
    pub const fn label(&self) -> Label {
        match self {
            Self::Matched { label } | Self::Fallback { label, .. } => *label,
        }
    }

    /// Whether the default label was substituted.
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

/// Agent that routes a message to a support domain.
pub struct ClassifierAgent {
    model: String,
    max_tokens: u32,
    temperature: f32,
    timeout: Duration,
    default_label: Label,
    template: String,
}

impl ClassifierAgent {
    /// Creates a new classifier with the given configuration and prompt template.
    #[must_use]
    pub fn new(config: &AgentConfig, template: String) -> Self {
        Self {
            model: config.classifier_model.clone(),
            max_tokens: config.classifier_max_tokens,
            temperature: config.temperature,
            timeout: config.timeout,
            default_label: config.default_label,
            template,
        }
    }

    /// Label used when the model answers outside the label set.
    pub const fn default_label(&self) -> Label {
        self.default_label
    }

    /// Classifies `query`.
    ///
    /// # Errors
    ///
    /// Propagates provider failures and timeouts. A malformed but successful
    /// answer is never an error.
    pub async fn classify(
        &self,
        provider: &dyn LlmProvider,
        query: &str,
    ) -> Result<(Classification, AgentResponse), AgentError> {
        let prompt = build_classifier_prompt(&self.template, query);
        let response = self.execute(provider, &prompt).await?;
        let classification = Classification::from_output(&response.content, self.default_label);

        if let Classification::Fallback { raw, label } = &classification {
            warn!(
                raw_label = raw.as_str(),
                fallback = %label,
                "classifier answered outside the label set, using default label"
            );
        }

        Ok((classification, response))
    }
}

#[async_trait]
impl Agent for ClassifierAgent {
    fn name(&self) -> &'static str {
        "classifier"
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

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use test_case::test_case;

    #[test_case("delivery", Label::Delivery)]
    #[test_case(" Account\n", Label::Account ; "padded and capitalized")]
    fn test_matched(raw: &str, expected: Label) {
        let c = Classification::from_output(raw, Label::Order);
        assert_eq!(c, Classification::Matched { label: expected });
        assert!(!c.is_fallback());
    }

    #[test_case("I think this is order-related" ; "sentence")]
    #[test_case("" ; "empty")]
    #[test_case("ORDERS!!" ; "decorated")]
    fn test_fallback_to_order(raw: &str) {
        let c = Classification::from_output(raw, Label::Order);
        assert_eq!(c.label(), Label::Order);
        assert!(c.is_fallback());
    }

    #[test]
    fn test_fallback_uses_configured_default() {
        let c = Classification::from_output("  Needs A Human ", Label::Account);
        assert_eq!(
            c,
            Classification::Fallback {
                raw: "needs a human".to_string(),
                label: Label::Account,
            }
        );
    }

    #[test]
    fn test_agent_properties() {
        use super::super::prompt::CLASSIFIER_PROMPT;
        let config = AgentConfig::builder()
            .api_key("test")
            .classifier_model("llama-3.1-8b-instant")
            .default_label("payment")
            .build()
            .unwrap_or_else(|_| unreachable!());
        let agent = ClassifierAgent::new(&config, CLASSIFIER_PROMPT.to_string());
        assert_eq!(agent.name(), "classifier");
        assert_eq!(agent.model(), "llama-3.1-8b-instant");
        assert_eq!(agent.max_tokens(), config.classifier_max_tokens);
        assert_eq!(agent.default_label(), Label::Payment);
    }

    proptest! {
        #[test]
        fn prop_unrecognized_output_always_falls_back_to_order(raw in ".*") {
            let normalized = raw.trim().to_lowercase();
            prop_assume!(!Label::ALL.iter().any(|l| l.as_str() == normalized));

            let first = Classification::from_output(&raw, Label::Order);
            let second = Classification::from_output(&raw, Label::Order);
            prop_assert_eq!(first.label(), Label::Order);
            prop_assert!(first.is_fallback());
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_valid_label_survives_padding_and_case(
            idx in 0usize..4,
            upper in any::<bool>(),
            pad in "[ \t\n]{0,4}",
        ) {
            let label = Label::ALL[idx];
            let token = if upper { label.as_str().to_uppercase() } else { label.as_str().to_string() };
            let raw = format!("{pad}{token}{pad}");
            prop_assert_eq!(
                Classification::from_output(&raw, Label::Order),
                Classification::Matched { label }
            );
        }
    }
}
