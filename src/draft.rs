//! AI drafting collaborator.
//!
//! The tracker hands a policy snapshot and a free-text instruction to an
//! external text-generation service and gets an HTML email draft back. The
//! service is opaque: one narrow trait, a deterministic stub in tests, and
//! an HTTP implementation with a hard timeout. Failures never touch policy
//! data.

use std::time::Duration;

use serde::Deserialize;
use serde_json::json;

use crate::domain::Policy;

/// The drafting collaborator failed.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("no drafting service is configured; set assistant_url in config.toml")]
    NotConfigured,
    #[error("the drafting request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("the drafting service returned an error: {0}")]
    Provider(String),
    #[error("the drafting service response carried no content")]
    MissingContent,
}

/// Produces an HTML email draft from a policy snapshot and an instruction.
pub trait Assistant {
    /// Generate an HTML draft.
    ///
    /// # Errors
    ///
    /// Returns a [`GenerationError`] on any provider or transport failure.
    fn generate(&self, policy: &Policy, instruction: &str) -> Result<String, GenerationError>;
}

/// Summarise a policy for the drafting service.
///
/// Includes the client and policy details, any still-outstanding
/// requirements, and the most recent communication notes.
#[must_use]
pub fn build_prompt(policy: &Policy, instruction: &str) -> String {
    use std::fmt::Write;

    let mut prompt = format!(
        "You are an assistant at an insurance agency. Draft HTML email content for the \
         client below.\n\nClient: {} <{}>\nPolicy: {} {} policy {}, effective {}\nStatus: {}\n",
        policy.client_name,
        policy.client_email,
        policy.carrier,
        policy.policy_type,
        policy.policy_number,
        policy.effective_date,
        policy.status,
    );

    let outstanding: Vec<_> = policy.outstanding().collect();
    if outstanding.is_empty() {
        prompt.push_str("All underwriting requirements are met.\n");
    } else {
        prompt.push_str("Outstanding requirements:\n");
        for req in outstanding {
            let _ = writeln!(prompt, "- {} ({}): {}", req.name, req.status, req.description);
        }
    }

    // Most recent notes first, capped to keep the prompt small.
    let recent: Vec<_> = policy.communications.iter().rev().take(5).collect();
    if !recent.is_empty() {
        prompt.push_str("Recent communication notes:\n");
        for note in recent {
            let _ = writeln!(prompt, "- [{}] {}", note.timestamp.format("%Y-%m-%d"), note.note);
        }
    }

    let _ = write!(prompt, "\nInstruction: {instruction}");
    prompt
}

/// HTTP drafting service.
///
/// POSTs `{"policy": …, "userPrompt": …}` and expects
/// `{"htmlContent": "…"}` back, the wire shape of the original service.
#[derive(Debug, Clone)]
pub struct HttpAssistant {
    url: String,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DraftResponse {
    html_content: Option<String>,
    error: Option<String>,
}

impl HttpAssistant {
    /// A drafting client for the given endpoint.
    #[must_use]
    pub const fn new(url: String, timeout: Duration) -> Self {
        Self { url, timeout }
    }
}

impl Assistant for HttpAssistant {
    fn generate(&self, policy: &Policy, instruction: &str) -> Result<String, GenerationError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()?;

        tracing::debug!("Requesting draft from {}", self.url);
        let response = client
            .post(&self.url)
            .json(&json!({
                "policy": policy,
                "userPrompt": build_prompt(policy, instruction),
            }))
            .send()?;

        if !response.status().is_success() {
            let status = response.status();
            let body: DraftResponse = response.json().unwrap_or(DraftResponse {
                html_content: None,
                error: None,
            });
            return Err(GenerationError::Provider(
                body.error.unwrap_or_else(|| status.to_string()),
            ));
        }

        let body: DraftResponse = response.json()?;
        if let Some(error) = body.error {
            return Err(GenerationError::Provider(error));
        }
        body.html_content.ok_or(GenerationError::MissingContent)
    }
}
