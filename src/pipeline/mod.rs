/*!
 * Campaign localization pipeline.
 *
 * - `prompts`: prompt templates for each stage
 * - `stages`: the four stages and the generator invoker
 * - `cancellation`: cooperative cancellation token
 * - `orchestrator`: `CampaignPipeline`, which runs the stages in order
 */

pub mod cancellation;
pub mod orchestrator;
pub mod prompts;
pub mod stages;

pub use cancellation::CancellationToken;
pub use orchestrator::{CampaignPipeline, PipelineConfig, PipelineProgress, ProgressCallback};
pub use stages::{ComplianceStage, CulturalAdaptationStage, ExceptionStage, TranslationStage};
