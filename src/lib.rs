/*!
 * # TransCultura - Campaign localization with local LLMs
 *
 * A Rust library that turns one piece of marketing copy into a localized,
 * culturally adapted and compliance-reviewed campaign for a target market.
 *
 * ## Features
 *
 * - Four-stage pipeline run against a text generator (Ollama by default):
 *   translation, cultural adaptation, compliance check, exception analysis
 * - Regional cultural guidance and compliance rules with explicit fallbacks
 * - Deterministic status and priority classification of each result
 * - Fail-open stage policy: a failed generation becomes inline error text and
 *   the run continues
 * - Caller-owned campaign history with dashboard metrics and SQLite persistence
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `campaign`: Requests, results, status classification and history
 * - `knowledge`: Cultural guidance and compliance rule lookup
 * - `pipeline`: Prompt templates, stages, cancellation and the orchestrator
 * - `providers`: Text generator clients:
 *   - `providers::ollama`: Ollama API client
 *   - `providers::mock`: Scripted generator for tests
 * - `database`: SQLite persistence for campaign history
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod campaign;
pub mod database;
pub mod errors;
pub mod knowledge;
pub mod pipeline;
pub mod providers;

// Re-export main types for easier usage
pub use app_config::Config;
pub use campaign::{
    CampaignHistory, CampaignRequest, CampaignResult, CampaignStatus, Industry, Language,
    Priority, Region, StageName, StageOutput,
};
pub use errors::{AppError, PipelineError, ProviderError};
pub use knowledge::{KnowledgeLookup, KnowledgeStore, ReferenceGuidelines};
pub use pipeline::{CampaignPipeline, CancellationToken, PipelineConfig, PipelineProgress};
pub use providers::{GenerationRequest, TextGenerator};
