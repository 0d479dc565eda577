/*!
 * Tests for the text generator implementations
 */

use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use transcultura::app_config::Config;
use transcultura::campaign::StageName;
use transcultura::errors::ProviderError;
use transcultura::pipeline::stages::{StageInvoker, StageSettings};
use transcultura::providers::mock::MockGenerator;
use transcultura::providers::ollama::OllamaGenerator;
use transcultura::providers::{GenerationRequest, TextGenerator};

/// Serve canned HTTP responses, one per accepted connection, and return the base URL
async fn serve_responses(responses: Vec<(u16, &'static str)>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        for (status, body) in responses {
            let (mut socket, _) = match listener.accept().await {
                Ok(conn) => conn,
                Err(_) => return,
            };
            read_request(&mut socket).await;

            let reason = if status == 200 { "OK" } else { "Error" };
            let response = format!(
                "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                reason,
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    format!("http://{}", addr)
}

/// Leave the first request unanswered, then answer the next one with `body`
async fn serve_after_stalled_request(body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        if let Ok((mut socket, _)) = listener.accept().await {
            read_request(&mut socket).await;
            held.push(socket);
        }
        if let Ok((mut socket, _)) = listener.accept().await {
            read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
        tokio::time::sleep(Duration::from_secs(5)).await;
        drop(held);
    });

    format!("http://{}", addr)
}

/// Read headers and the declared body so the client never sees a reset
async fn read_request(socket: &mut tokio::net::TcpStream) {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let n = match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => n,
        };
        buffer.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buffer);
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buffer.len() >= header_end + 4 + content_length {
                return;
            }
        }
    }
}

#[tokio::test]
async fn test_ollama_generate_withSuccess_shouldReturnResponseText() {
    let url = serve_responses(vec![(200, r#"{"model":"llama3.2:3b","response":"Hola mundo","done":true}"#)]).await;
    let generator = OllamaGenerator::new(url);

    let text = generator
        .generate(GenerationRequest::new("llama3.2:3b", "Translate: Hello world"))
        .await
        .unwrap();

    assert_eq!(text, "Hola mundo");
}

#[tokio::test]
async fn test_ollama_generate_withServerError_shouldReturnApiError() {
    let url = serve_responses(vec![(500, r#"{"error":"model crashed"}"#)]).await;
    let generator = OllamaGenerator::new(url);

    let err = generator
        .generate(GenerationRequest::new("llama3.2:3b", "p"))
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::ApiError { status_code: 500, .. }));
    assert_eq!(err.inline_text(), "Error: 500");
}

#[tokio::test]
async fn test_ollama_generate_withRetries_shouldRecoverFromServerError() {
    let url = serve_responses(vec![
        (503, r#"{"error":"loading"}"#),
        (200, r#"{"response":"Bonjour","done":true}"#),
    ])
    .await;
    let generator = OllamaGenerator::new_with_config(url, Duration::from_secs(5), 1, 10);

    let text = generator
        .generate(GenerationRequest::new("llama3.2:3b", "p"))
        .await
        .unwrap();

    assert_eq!(text, "Bonjour");
}

#[tokio::test]
async fn test_stageInvoker_withConfiguredRetries_shouldOutliveTimedOutAttempt() {
    let url = serve_after_stalled_request(r#"{"response":"retried ok","done":true}"#).await;
    let mut config = Config::default();
    config.generator.endpoint = url;
    config.generator.timeout_secs = 1;
    config.generator.max_retries = 1;
    config.generator.retry_backoff_ms = 10;

    let generator = config.build_ollama();
    let pipeline_config = config.pipeline_config();
    let settings = StageSettings {
        model: pipeline_config.model.clone(),
        temperature: pipeline_config.temperature,
        timeout: pipeline_config.stage_timeout,
    };

    let output = StageInvoker::new(&generator, &settings, None)
        .invoke(StageName::Translation, "Translate: hello".to_string())
        .await;

    assert!(!output.is_failure(), "stage failed: {:?}", output.failure);
    assert_eq!(output.text, "retried ok");
}

#[tokio::test]
async fn test_ollama_generate_withClientError_shouldNotRetry() {
    let url = serve_responses(vec![
        (404, r#"{"error":"model not found"}"#),
        (200, r#"{"response":"unexpected","done":true}"#),
    ])
    .await;
    let generator = OllamaGenerator::new_with_config(url, Duration::from_secs(5), 3, 10);

    let err = generator
        .generate(GenerationRequest::new("missing-model", "p"))
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::ApiError { status_code: 404, .. }));
}

#[tokio::test]
async fn test_ollama_generate_withMalformedBody_shouldReturnParseError() {
    let url = serve_responses(vec![(200, "this is not json")]).await;
    let generator = OllamaGenerator::new(url);

    let err = generator
        .generate(GenerationRequest::new("llama3.2:3b", "p"))
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::ParseError(_)));
    assert!(err.inline_text().starts_with("Connection error: "));
}

#[tokio::test]
async fn test_ollama_version_shouldReadVersionField() {
    let url = serve_responses(vec![(200, r#"{"version":"0.5.7"}"#)]).await;
    let generator = OllamaGenerator::new(url);

    assert_eq!(generator.version().await.unwrap(), "0.5.7");
}

#[tokio::test]
async fn test_ollama_generate_withUnreachableServer_shouldReturnConnectionError() {
    let generator = OllamaGenerator::new_with_config("http://127.0.0.1:9", Duration::from_secs(2), 0, 10);

    let err = generator
        .generate(GenerationRequest::new("llama3.2:3b", "p"))
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::ConnectionError(_) | ProviderError::Timeout(_)));
}

#[tokio::test]
async fn test_mock_failing_shouldReturnConfiguredError() {
    let mock = MockGenerator::failing(ProviderError::ApiError {
        status_code: 429,
        message: "slow down".to_string(),
    });

    let err = mock.generate(GenerationRequest::new("m", "p")).await.unwrap_err();

    assert_eq!(err.inline_text(), "Error: 429");
    assert_eq!(mock.request_count(), 1);
}

#[tokio::test]
async fn test_mock_slow_shouldDelayResponse() {
    let mock = MockGenerator::slow(50);
    let start = std::time::Instant::now();

    let text = mock.generate(GenerationRequest::new("m", "p")).await.unwrap();

    assert_eq!(text, "Mock response 1");
    assert!(start.elapsed() >= Duration::from_millis(50));
}

#[tokio::test]
async fn test_mock_stalled_shouldNeverAnswer() {
    let mock = MockGenerator::stalled();

    let outcome = tokio::time::timeout(
        Duration::from_millis(50),
        mock.generate(GenerationRequest::new("m", "p")),
    )
    .await;

    assert!(outcome.is_err());
}
