/*!
 * Pipeline orchestrator for campaign localization.
 *
 * The orchestrator runs the four stages strictly in order:
 * 1. Translation
 * 2. Cultural adaptation (reads the translation)
 * 3. Compliance check (reads the adaptation)
 * 4. Exception analysis (reads all three)
 *
 * A failed stage never aborts the run; its inline error text is passed
 * downstream like any other output.
 */

use chrono::Local;
use log::{info, warn};
use std::sync::Arc;
use std::time::{Duration, Instant};
use uuid::Uuid;

use super::cancellation::CancellationToken;
use super::stages::{
    ComplianceStage, CulturalAdaptationStage, ExceptionStage, StageInvoker, StageSettings,
    TranslationStage,
};
use crate::campaign::model::{CampaignRequest, CampaignResult, StageName};
use crate::errors::PipelineError;
use crate::knowledge::KnowledgeLookup;
use crate::providers::ollama::DEFAULT_TIMEOUT;
use crate::providers::{TextGenerator, DEFAULT_MODEL, DEFAULT_TEMPERATURE};

/// Callback receiving progress events
pub type ProgressCallback = Box<dyn Fn(PipelineProgress) + Send + Sync>;

/// Configuration for the campaign pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Model used for every stage
    pub model: String,

    /// Sampling temperature used for every stage
    pub temperature: f32,

    /// Upper bound on each generator call, retries included
    pub stage_timeout: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            stage_timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl PipelineConfig {
    /// Create a configuration for a model with default parameters.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_stage_timeout(mut self, timeout: Duration) -> Self {
        self.stage_timeout = timeout;
        self
    }

    fn stage_settings(&self) -> StageSettings {
        StageSettings {
            model: self.model.clone(),
            temperature: self.temperature,
            timeout: self.stage_timeout,
        }
    }
}

/// Progress information during pipeline execution.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineProgress {
    /// Stage about to run; `None` once the run is complete
    pub stage: Option<StageName>,

    /// Overall progress (25, 50, 75, 100)
    pub percent: u8,

    /// Current status message
    pub message: String,
}

impl PipelineProgress {
    /// Event emitted before a stage runs
    pub fn starting(stage: StageName) -> Self {
        let message = match stage {
            StageName::Translation => "Translating content...",
            StageName::CulturalAdaptation => "Adapting for cultural context...",
            StageName::ComplianceCheck => "Checking compliance...",
            StageName::ExceptionAnalysis => "Analyzing for exceptions...",
        };
        Self {
            stage: Some(stage),
            percent: (stage.position() * 25) as u8,
            message: message.to_string(),
        }
    }

    /// Event emitted after the last stage
    pub fn complete() -> Self {
        Self {
            stage: None,
            percent: 100,
            message: "Processing complete!".to_string(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.stage.is_none()
    }
}

/// The campaign localization pipeline.
///
/// Holds no per-run state, so one instance can serve concurrent runs.
#[derive(Debug, Clone)]
pub struct CampaignPipeline {
    generator: Arc<dyn TextGenerator>,
    knowledge: Arc<dyn KnowledgeLookup>,
    config: PipelineConfig,
}

impl CampaignPipeline {
    /// Create a new pipeline with the given collaborators.
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        knowledge: Arc<dyn KnowledgeLookup>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            generator,
            knowledge,
            config,
        }
    }

    /// Get the pipeline configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run all four stages for a request.
    ///
    /// # Errors
    /// `PipelineError::InvalidInput` when the content is empty or only whitespace;
    /// no stage runs.
    pub async fn process(&self, request: &CampaignRequest) -> Result<CampaignResult, PipelineError> {
        self.process_with(request, None, None).await
    }

    /// Run all four stages with optional cancellation and progress reporting.
    ///
    /// Once `cancel` fires, the in-flight stage and every later stage get the
    /// cancellation text without calling the generator. A result is still
    /// returned.
    pub async fn process_with(
        &self,
        request: &CampaignRequest,
        cancel: Option<&CancellationToken>,
        progress_callback: Option<&ProgressCallback>,
    ) -> Result<CampaignResult, PipelineError> {
        if request.content().trim().is_empty() {
            return Err(PipelineError::InvalidInput(
                "campaign content must not be empty or whitespace-only".to_string(),
            ));
        }

        let start_time = Instant::now();
        let id = Uuid::new_v4().to_string();
        info!(
            "Processing campaign {} ({} / {}, {})",
            &id[..8],
            request.target_language(),
            request.target_region(),
            request.industry()
        );

        let report = |event: PipelineProgress| {
            if let Some(callback) = progress_callback {
                callback(event);
            }
        };

        let settings = self.config.stage_settings();
        let invoker = StageInvoker::new(self.generator.as_ref(), &settings, cancel);
        let knowledge = self.knowledge.as_ref();

        report(PipelineProgress::starting(StageName::Translation));
        let translation = TranslationStage::run(&invoker, request).await;

        report(PipelineProgress::starting(StageName::CulturalAdaptation));
        let cultural_adaptation =
            CulturalAdaptationStage::run(&invoker, &translation, request, knowledge).await;

        report(PipelineProgress::starting(StageName::ComplianceCheck));
        let compliance_check =
            ComplianceStage::run(&invoker, &cultural_adaptation, request, knowledge).await;

        report(PipelineProgress::starting(StageName::ExceptionAnalysis));
        let exception_analysis =
            ExceptionStage::run(&invoker, &translation, &cultural_adaptation, &compliance_check).await;

        report(PipelineProgress::complete());

        let result = CampaignResult::assemble(
            id,
            Local::now(),
            request.clone(),
            translation,
            cultural_adaptation,
            compliance_check,
            exception_analysis,
        );

        if result.failed_stage_count() > 0 {
            warn!(
                "Campaign {} finished with {} failed stage(s)",
                result.short_id(),
                result.failed_stage_count()
            );
        }
        info!(
            "Campaign {} processed in {:.2}s: {}",
            result.short_id(),
            start_time.elapsed().as_secs_f32(),
            result.status().display_name()
        );

        Ok(result)
    }
}
