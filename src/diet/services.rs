use anyhow::anyhow;
use tracing::{debug, error, info, instrument, warn};

use crate::{
    config::GeminiConfig,
    diet::prompt::{build_prompt, sanitize_response},
    errors::PlanError,
    llm::LlmClient,
    nutrition::{calculator::compute_targets, dto::UserProfile},
};

/// Sanitized markup fragment returned by the model. Untrusted: render it sandboxed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanResult {
    pub html: String,
}

/// One best-effort plan generation: credential check, targets, prompt, model call, sanitize.
///
/// The credential is checked before anything else so a misconfigured host never
/// reaches the network. Model failures are logged here and collapsed into
/// `PlanError::ExternalService`; there is no retry.
#[instrument(skip_all, fields(goal = profile.goal.as_str()))]
pub async fn request_plan(
    config: &GeminiConfig,
    llm: &dyn LlmClient,
    profile: &UserProfile,
) -> Result<PlanResult, PlanError> {
    if !config.has_credential() {
        warn!("gemini api key missing; refusing plan request");
        return Err(PlanError::Configuration);
    }

    let targets = compute_targets(profile);
    let prompt = build_prompt(profile, &targets);
    debug!(
        calories = targets.calories,
        water_liters = targets.water_liters,
        prompt_len = prompt.len(),
        "prompt built"
    );

    let raw = llm.generate(&prompt).await.map_err(|e| {
        error!(error = ?e, "diet plan generation failed");
        PlanError::ExternalService(e)
    })?;

    let html = sanitize_response(&raw);
    if html.is_empty() {
        error!("model returned an empty plan");
        return Err(PlanError::ExternalService(anyhow!("empty plan after sanitizing")));
    }

    info!(html_len = html.len(), "diet plan generated");
    Ok(PlanResult { html })
}
