/*!
 * Tests for application configuration functionality
 */

use std::time::Duration;

use transcultura::app_config::{Config, GeneratorProvider, LogLevel};
use transcultura::campaign::{Industry, Language, Region};

use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.generator.provider, GeneratorProvider::Ollama);
    assert_eq!(config.generator.model, "llama3.2:3b");
    assert_eq!(config.generator.endpoint, "http://localhost:11434");
    assert_eq!(config.generator.timeout_secs, 120);
    assert_eq!(config.generator.max_retries, 0);
    assert!((config.generator.temperature - 0.7).abs() < f32::EPSILON);

    assert_eq!(config.campaign.target_language, Language::Spanish);
    assert_eq!(config.campaign.target_region, Region::Spain);
    assert_eq!(config.campaign.industry, Industry::General);

    assert!(config.history.enabled);
    assert!(config.history.database_path.is_none());
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    config.generator.endpoint = "not a url".to_string();
    assert!(config.validate().is_err());
    config.generator.endpoint = "http://gpu-box:11434".to_string();
    assert!(config.validate().is_ok());

    config.generator.model = "  ".to_string();
    assert!(config.validate().is_err());
    config.generator.model = "mistral".to_string();

    config.generator.timeout_secs = 0;
    assert!(config.validate().is_err());
    config.generator.timeout_secs = 30;

    config.generator.temperature = 2.5;
    assert!(config.validate().is_err());
    config.generator.temperature = 0.0;
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_saveAndLoad_shouldRoundTrip() {
    let dir = common::create_temp_dir().unwrap();
    let path = common::temp_file_path(dir.path(), "conf.json");

    let mut config = Config::default();
    config.generator.model = "qwen2.5:7b".to_string();
    config.campaign.target_region = Region::Brazil;
    config.log_level = LogLevel::Debug;
    config.save(&path).unwrap();

    let loaded = Config::from_file(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_config_loadOrCreate_withMissingFile_shouldWriteDefaults() {
    let dir = common::create_temp_dir().unwrap();
    let path = common::temp_file_path(dir.path(), "conf.json");

    let (config, created) = Config::load_or_create(&path).unwrap();
    assert!(created);
    assert!(path.exists());
    assert_eq!(config, Config::default());

    let (_, created_again) = Config::load_or_create(&path).unwrap();
    assert!(!created_again);
}

#[test]
fn test_config_fromFile_withPartialJson_shouldFillDefaults() {
    let dir = common::create_temp_dir().unwrap();
    let path = common::temp_file_path(dir.path(), "conf.json");
    std::fs::write(
        &path,
        r#"{ "generator": { "model": "phi3" }, "campaign": { "target_region": "USA" } }"#,
    )
    .unwrap();

    let config = Config::from_file(&path).unwrap();
    assert_eq!(config.generator.model, "phi3");
    assert_eq!(config.generator.timeout_secs, 120);
    assert_eq!(config.campaign.target_region, Region::Usa);
    assert_eq!(config.campaign.target_language, Language::Spanish);
}

#[test]
fn test_config_fromFile_withInvalidJson_shouldFail() {
    let dir = common::create_temp_dir().unwrap();
    let path = common::temp_file_path(dir.path(), "conf.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(Config::from_file(&path).is_err());
}

#[test]
fn test_pipelineConfig_shouldFollowGeneratorSettings() {
    let mut config = Config::default();
    config.generator.model = "mistral".to_string();
    config.generator.timeout_secs = 45;
    config.generator.temperature = 0.2;

    let pipeline_config = config.pipeline_config();
    assert_eq!(pipeline_config.model, "mistral");
    assert_eq!(pipeline_config.stage_timeout, Duration::from_secs(45));
    assert!((pipeline_config.temperature - 0.2).abs() < f32::EPSILON);
}

#[test]
fn test_pipelineConfig_withRetries_shouldCoverEveryAttemptAndBackoff() {
    let mut config = Config::default();
    config.generator.timeout_secs = 10;
    config.generator.max_retries = 2;
    config.generator.retry_backoff_ms = 500;

    // three 10s attempts plus 500ms and 1000ms of backoff
    assert_eq!(config.generator.call_budget(), Duration::from_millis(31_500));
    assert_eq!(config.pipeline_config().stage_timeout, Duration::from_millis(31_500));
    assert!(config.pipeline_config().stage_timeout > config.generator.timeout());
}

#[test]
fn test_callBudget_withHugeRetryCount_shouldSaturate() {
    let mut config = Config::default();
    config.generator.max_retries = u32::MAX;
    config.generator.retry_backoff_ms = u64::MAX;

    assert!(config.generator.call_budget() >= config.generator.timeout());
}

#[test]
fn test_buildOllama_shouldUseConfiguredEndpoint() {
    let mut config = Config::default();
    config.generator.endpoint = "http://gpu-box:11434/".to_string();

    let ollama = config.build_ollama();
    assert_eq!(ollama.base_url(), "http://gpu-box:11434");
}

#[test]
fn test_logLevel_toLevelFilter_shouldMapEachLevel() {
    assert_eq!(LogLevel::Error.to_level_filter(), log::LevelFilter::Error);
    assert_eq!(LogLevel::Warn.to_level_filter(), log::LevelFilter::Warn);
    assert_eq!(LogLevel::Info.to_level_filter(), log::LevelFilter::Info);
    assert_eq!(LogLevel::Debug.to_level_filter(), log::LevelFilter::Debug);
    assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
}

#[test]
fn test_generatorProvider_fromStr_shouldBeCaseInsensitive() {
    assert_eq!("Ollama".parse::<GeneratorProvider>().unwrap(), GeneratorProvider::Ollama);
    assert!("openai".parse::<GeneratorProvider>().is_err());
}
