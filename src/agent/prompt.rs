//! Prompt templates and rendering.
//!
//! Each agent owns one template with `{query}` (and, for the synthesizer,
//! `{expert_response}`) placeholders. Rendering is a pure string operation,
//! kept apart from the provider call so it can be tested on its own.

use std::fmt::Write;
use std::path::{Path, PathBuf};

use tracing::warn;

use super::label::Label;

/// Prompt for the classifier agent.
pub const CLASSIFIER_PROMPT: &str = "You are a classifier that reads a customer message and decides which support expert
should handle it. You must answer with ONE WORD ONLY from this list:

- order
- delivery
- payment
- account

Customer message:
{query}

Answer with exactly one of: order, delivery, payment, account.";

/// Prompt for the synthesizer agent.
pub const SYNTHESIZER_PROMPT: &str = "You are a senior customer support agent.
Your goal is to communicate with empathy, clarity, and professionalism.

Rewrite the expert's technical/raw answer into a friendly final reply.

Guidelines:
- Start with a brief acknowledgement of the customer's situation.
- Clearly answer their question using the expert's content.
- Keep it short and easy to understand.
- If relevant, suggest the next best step.
- Never mention the expert, these notes, or that the answer was prepared in several steps.

Customer question:
{query}

Expert notes (DO NOT show this section explicitly to the customer):
{expert_response}

Now write the final message to the customer.";

/// Default prompt directory under the user's home.
const DEFAULT_PROMPT_DIR: &str = ".config/support-router/prompts";

/// Filename for the classifier prompt template.
const CLASSIFIER_FILENAME: &str = "classifier.md";
/// Filename for the synthesizer prompt template.
const SYNTHESIZER_FILENAME: &str = "synthesizer.md";

/// Placeholders the classifier and expert templates must contain.
const QUERY_ONLY: &[&str] = &["query"];
/// Placeholders the synthesizer template must contain.
const SYNTHESIZER_PLACEHOLDERS: &[&str] = &["query", "expert_response"];

/// Filename for an expert's prompt template.
const fn expert_filename(label: Label) -> &'static str {
    match label {
        Label::Order => "order.md",
        Label::Delivery => "delivery.md",
        Label::Payment => "payment.md",
        Label::Account => "account.md",
    }
}

/// Builds the compiled-in prompt for an expert from its domain metadata.
#[must_use]
pub fn default_expert_prompt(label: Label) -> String {
    let domain = label.domain();
    let article = if domain.starts_with(['A', 'E', 'I', 'O', 'U']) {
        "an"
    } else {
        "a"
    };
    let mut prompt = format!(
        "You are {article} {domain} expert for an e-commerce platform.\n\nYour expertise includes:\n"
    );
    for topic in label.topics() {
        let _ = writeln!(prompt, "- {topic}");
    }
    let _ = write!(
        prompt,
        "\nCustomer question:\n{{query}}\n\n\
         Provide a helpful, clear, and concise answer. If you need {} to help further, \
         politely ask the customer to provide them.",
        label.details_hint()
    );
    prompt
}

/// A set of prompt templates for all agents.
///
/// Loaded from external template files when available, falling back to
/// compiled-in defaults. Use [`PromptSet::load`] to resolve the prompt
/// directory from CLI flags, environment variables, or the default path.
#[derive(Debug, Clone)]
pub struct PromptSet {
    /// Classifier template.
    pub classifier: String,
    /// Order expert template.
    pub order: String,
    /// Delivery expert template.
    pub delivery: String,
    /// Payment expert template.
    pub payment: String,
    /// Account expert template.
    pub account: String,
    /// Synthesizer template.
    pub synthesizer: String,
}

impl PromptSet {
    /// Loads prompts from the given directory, falling back to compiled-in defaults.
    ///
    /// Resolution order for `prompt_dir`:
    /// 1. Explicit `prompt_dir` argument (from `--prompt-dir` or config)
    /// 2. `SUPPORT_ROUTER_PROMPT_DIR` environment variable
    /// 3. `~/.config/support-router/prompts/`
    ///
    /// Each file is loaded independently; a missing file uses its default.
    #[must_use]
    pub fn load(prompt_dir: Option<&Path>) -> Self {
        let resolved_dir = prompt_dir
            .map(PathBuf::from)
            .or_else(|| {
                std::env::var("SUPPORT_ROUTER_PROMPT_DIR")
                    .ok()
                    .map(PathBuf::from)
            })
            .or_else(Self::default_dir);

        let load_file = |filename: &str, required: &[&str], default: String| -> String {
            let Some(path) = resolved_dir.as_ref().map(|dir| dir.join(filename)) else {
                return default;
            };
            match std::fs::read_to_string(&path) {
                Ok(content) if !content.trim().is_empty() => {
                    let missing = missing_placeholders(&content, required);
                    if !missing.is_empty() {
                        warn!(
                            path = %path.display(),
                            missing = ?missing,
                            "prompt template lacks required placeholders"
                        );
                    }
                    content
                }
                _ => default,
            }
        };

        let expert = |label: Label| {
            load_file(
                expert_filename(label),
                QUERY_ONLY,
                default_expert_prompt(label),
            )
        };

        Self {
            classifier: load_file(CLASSIFIER_FILENAME, QUERY_ONLY, CLASSIFIER_PROMPT.to_string()),
            order: expert(Label::Order),
            delivery: expert(Label::Delivery),
            payment: expert(Label::Payment),
            account: expert(Label::Account),
            synthesizer: load_file(
                SYNTHESIZER_FILENAME,
                SYNTHESIZER_PLACEHOLDERS,
                SYNTHESIZER_PROMPT.to_string(),
            ),
        }
    }

    /// Returns compiled-in defaults without checking the filesystem.
    #[must_use]
    pub fn defaults() -> Self {
        Self {
            classifier: CLASSIFIER_PROMPT.to_string(),
            order: default_expert_prompt(Label::Order),
            delivery: default_expert_prompt(Label::Delivery),
            payment: default_expert_prompt(Label::Payment),
            account: default_expert_prompt(Label::Account),
            synthesizer: SYNTHESIZER_PROMPT.to_string(),
        }
    }

    /// Template for the expert handling `label`.
    pub fn expert(&self, label: Label) -> &str {
        match label {
            Label::Order => &self.order,
            Label::Delivery => &self.delivery,
            Label::Payment => &self.payment,
            Label::Account => &self.account,
        }
    }

    /// Writes the compiled-in default prompts to the given directory.
    ///
    /// Creates the directory if it does not exist. Existing files are
    /// **not** overwritten; use this for initial scaffolding only.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if directory creation or file writing fails.
    pub fn write_defaults(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
        std::fs::create_dir_all(dir)?;

        let defaults = Self::defaults();
        let mut templates = vec![(CLASSIFIER_FILENAME, defaults.classifier.as_str())];
        templates.extend(
            Label::ALL
                .iter()
                .map(|&label| (expert_filename(label), defaults.expert(label))),
        );
        templates.push((SYNTHESIZER_FILENAME, defaults.synthesizer.as_str()));

        let mut written = Vec::new();
        for (filename, content) in templates {
            let path = dir.join(filename);
            if !path.exists() {
                std::fs::write(&path, content)?;
                written.push(path);
            }
        }

        Ok(written)
    }

    /// Returns the default prompt directory under the user's home.
    ///
    /// Returns `None` if the home directory cannot be determined.
    #[must_use]
    pub fn default_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(DEFAULT_PROMPT_DIR))
    }
}

/// Names from `required` whose `{name}` placeholder does not appear in
/// `template`.
#[must_use]
pub fn missing_placeholders<'a>(template: &str, required: &[&'a str]) -> Vec<&'a str> {
    required
        .iter()
        .copied()
        .filter(|name| !template.contains(&format!("{{{name}}}")))
        .collect()
}

/// Substitutes `{name}` placeholders in a single pass.
///
/// Substituted values are copied verbatim and never re-scanned, so a customer
/// message containing `{expert_response}` stays literal. Unknown placeholders
/// and stray braces are left as they are.
#[must_use]
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let substitution = after.find('}').and_then(|close| {
            let name = &after[..close];
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, close))
        });
        match substitution {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);

    out
}

/// Renders the classifier prompt.
#[must_use]
pub fn build_classifier_prompt(template: &str, query: &str) -> String {
    render(template, &[("query", query)])
}

/// Renders an expert prompt.
#[must_use]
pub fn build_expert_prompt(template: &str, query: &str) -> String {
    render(template, &[("query", query)])
}

/// Renders the synthesizer prompt.
#[must_use]
pub fn build_synthesizer_prompt(template: &str, query: &str, expert_response: &str) -> String {
    render(
        template,
        &[("query", query), ("expert_response", expert_response)],
    )
}
