/*!
 * Tests for error types and conversions
 */

use std::time::Duration;

use transcultura::errors::{AppError, PipelineError, ProviderError};

#[test]
fn test_providerError_apiError_shouldDisplayStatusAndMessage() {
    let error = ProviderError::ApiError {
        status_code: 503,
        message: "model is loading".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("503"));
    assert!(display.contains("model is loading"));
}

#[test]
fn test_providerError_apiError_inlineText_shouldOnlyCarryStatus() {
    let error = ProviderError::ApiError {
        status_code: 404,
        message: "model not found".to_string(),
    };
    assert_eq!(error.inline_text(), "Error: 404");
}

#[test]
fn test_providerError_connectionError_inlineText_shouldCarryDetail() {
    let error = ProviderError::ConnectionError("connection refused".to_string());
    assert_eq!(error.inline_text(), "Connection error: connection refused");
}

#[test]
fn test_providerError_timeout_inlineText_shouldBeConnectionError() {
    let error = ProviderError::Timeout(Duration::from_secs(120));
    assert_eq!(error.inline_text(), "Connection error: request timed out after 120s");
}

#[test]
fn test_providerError_parseAndCancelled_inlineText_shouldBeConnectionErrors() {
    let parse = ProviderError::ParseError("missing field `response`".to_string());
    assert!(parse.inline_text().starts_with("Connection error: "));
    assert!(parse.inline_text().contains("missing field"));

    assert_eq!(
        ProviderError::Cancelled.inline_text(),
        "Connection error: generation cancelled"
    );
}

#[test]
fn test_pipelineError_invalidInput_shouldDisplayReason() {
    let error = PipelineError::InvalidInput("campaign content must not be empty".to_string());
    assert_eq!(format!("{}", error), "Invalid input: campaign content must not be empty");
}

#[test]
fn test_appError_fromConversions_shouldWrapSourceErrors() {
    let pipeline: AppError = PipelineError::InvalidInput("empty".to_string()).into();
    assert!(matches!(pipeline, AppError::Pipeline(_)));

    let provider: AppError = ProviderError::Cancelled.into();
    assert!(matches!(provider, AppError::Provider(ProviderError::Cancelled)));

    let io: AppError = std::io::Error::new(std::io::ErrorKind::NotFound, "conf.json").into();
    assert!(matches!(io, AppError::File(_)));

    let other: AppError = anyhow::anyhow!("boom").into();
    assert_eq!(format!("{}", other), "Unknown error: boom");
}
