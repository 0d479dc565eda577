/*!
 * The four pipeline stages.
 *
 * Each stage builds its prompt from the request fields and upstream stage
 * texts, then hands it to a [`StageInvoker`]. The invoker never fails: a
 * generator error, a timeout or a cancellation becomes the stage's inline
 * error text.
 */

use log::{debug, warn};
use std::time::{Duration, Instant};

use super::cancellation::CancellationToken;
use super::prompts;
use crate::campaign::model::{CampaignRequest, StageName, StageOutput};
use crate::errors::ProviderError;
use crate::knowledge::KnowledgeLookup;
use crate::providers::{GenerationRequest, TextGenerator};

/// Generation parameters shared by all stages of a run
#[derive(Debug, Clone, PartialEq)]
pub struct StageSettings {
    pub model: String,
    pub temperature: f32,
    /// Upper bound on one generator call
    pub timeout: Duration,
}

/// Runs one prompt through the generator for a stage
pub struct StageInvoker<'a> {
    generator: &'a dyn TextGenerator,
    settings: &'a StageSettings,
    cancel: Option<&'a CancellationToken>,
}

impl<'a> StageInvoker<'a> {
    pub fn new(
        generator: &'a dyn TextGenerator,
        settings: &'a StageSettings,
        cancel: Option<&'a CancellationToken>,
    ) -> Self {
        Self {
            generator,
            settings,
            cancel,
        }
    }

    /// Generate the stage text, substituting inline error text on failure.
    pub async fn invoke(&self, stage: StageName, prompt: String) -> StageOutput {
        let start = Instant::now();

        match self.generate(prompt).await {
            Ok(text) => {
                debug!(
                    "{} finished in {:.2}s ({} chars)",
                    stage.agent_name(),
                    start.elapsed().as_secs_f32(),
                    text.len()
                );
                StageOutput::generated(stage, text)
            }
            Err(err) => {
                warn!("{} failed: {}", stage.agent_name(), err);
                StageOutput::failed(stage, err.inline_text(), err.to_string())
            }
        }
    }

    async fn generate(&self, prompt: String) -> Result<String, ProviderError> {
        if self.cancel.is_some_and(|token| token.is_cancelled()) {
            return Err(ProviderError::Cancelled);
        }

        let request = GenerationRequest::new(self.settings.model.clone(), prompt)
            .temperature(self.settings.temperature);
        let call = tokio::time::timeout(self.settings.timeout, self.generator.generate(request));

        let outcome = match self.cancel {
            Some(token) => {
                tokio::select! {
                    outcome = call => outcome,
                    _ = token.cancelled() => return Err(ProviderError::Cancelled),
                }
            }
            None => call.await,
        };

        outcome.unwrap_or(Err(ProviderError::Timeout(self.settings.timeout)))
    }
}

/// Translates the source content into the target language
pub struct TranslationStage;

impl TranslationStage {
    pub fn prompt(request: &CampaignRequest) -> String {
        prompts::translation_prompt(request.content(), request.target_language().display_name())
    }

    pub async fn run(invoker: &StageInvoker<'_>, request: &CampaignRequest) -> StageOutput {
        invoker.invoke(StageName::Translation, Self::prompt(request)).await
    }
}

/// Adapts the translated text to the target region's culture
pub struct CulturalAdaptationStage;

impl CulturalAdaptationStage {
    pub fn prompt(translation: &str, request: &CampaignRequest, knowledge: &dyn KnowledgeLookup) -> String {
        let region = request.target_region().display_name();
        let cultural_context = knowledge.cultural_context(region);
        prompts::cultural_adaptation_prompt(translation, region, &cultural_context)
    }

    pub async fn run(
        invoker: &StageInvoker<'_>,
        translation: &StageOutput,
        request: &CampaignRequest,
        knowledge: &dyn KnowledgeLookup,
    ) -> StageOutput {
        let prompt = Self::prompt(&translation.text, request, knowledge);
        invoker.invoke(StageName::CulturalAdaptation, prompt).await
    }
}

/// Reviews the adapted text against the region's compliance rules
///
/// Rules are looked up by region only; the industry appears in the prompt but
/// does not narrow the rules.
pub struct ComplianceStage;

impl ComplianceStage {
    pub fn prompt(adapted: &str, request: &CampaignRequest, knowledge: &dyn KnowledgeLookup) -> String {
        let region = request.target_region().display_name();
        let rules = knowledge.compliance_rules(region);
        prompts::compliance_prompt(adapted, region, &request.industry().prompt_label(), &rules)
    }

    pub async fn run(
        invoker: &StageInvoker<'_>,
        cultural_adaptation: &StageOutput,
        request: &CampaignRequest,
        knowledge: &dyn KnowledgeLookup,
    ) -> StageOutput {
        let prompt = Self::prompt(&cultural_adaptation.text, request, knowledge);
        invoker.invoke(StageName::ComplianceCheck, prompt).await
    }
}

/// Decides whether the campaign needs human review
pub struct ExceptionStage;

impl ExceptionStage {
    pub fn prompt(translation: &str, cultural_adaptation: &str, compliance_check: &str) -> String {
        prompts::exception_prompt(translation, cultural_adaptation, compliance_check)
    }

    pub async fn run(
        invoker: &StageInvoker<'_>,
        translation: &StageOutput,
        cultural_adaptation: &StageOutput,
        compliance_check: &StageOutput,
    ) -> StageOutput {
        let prompt = Self::prompt(&translation.text, &cultural_adaptation.text, &compliance_check.text);
        invoker.invoke(StageName::ExceptionAnalysis, prompt).await
    }
}
