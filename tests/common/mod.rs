/*!
 * Common test utilities for the transcultura test suite
 */

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

use transcultura::campaign::{CampaignRequest, Industry, Language, Region};
use transcultura::knowledge::{KnowledgeLookup, ReferenceGuidelines};
use transcultura::pipeline::{CampaignPipeline, PipelineConfig};
use transcultura::providers::mock::MockGenerator;

/// Route library logs to the test output when RUST_LOG is set
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Path of a file inside a temporary directory
pub fn temp_file_path(dir: &Path, filename: &str) -> PathBuf {
    dir.join(filename)
}

/// Pipeline wired to a mock generator and the reference guidelines
pub fn pipeline_with(mock: &MockGenerator) -> CampaignPipeline {
    pipeline_with_knowledge(mock, Arc::new(ReferenceGuidelines::new()))
}

/// Pipeline wired to a mock generator and the given knowledge lookup
pub fn pipeline_with_knowledge(
    mock: &MockGenerator,
    knowledge: Arc<dyn KnowledgeLookup>,
) -> CampaignPipeline {
    CampaignPipeline::new(
        Arc::new(mock.clone()),
        knowledge,
        PipelineConfig::new("test-model").with_stage_timeout(Duration::from_secs(5)),
    )
}

/// The health supplement campaign targeted at Japan
pub fn japan_healthcare_request() -> CampaignRequest {
    CampaignRequest::new(
        "Boost your immunity naturally! Clinically tested formula.",
        Language::Japanese,
        Region::Japan,
    )
    .with_industry(Industry::Healthcare)
}

/// Scripted responses for the four stages, in order
pub fn stage_responses(compliance: &str, exception: &str) -> Vec<String> {
    vec![
        "TRANSLATED-COPY".to_string(),
        "ADAPTED-COPY".to_string(),
        compliance.to_string(),
        exception.to_string(),
    ]
}
