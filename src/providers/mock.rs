/*!
 * Mock generator for testing.
 *
 * This module provides a scripted generator that simulates different behaviors:
 * - `MockGenerator::working()` - Always succeeds, numbering its responses
 * - `MockGenerator::failing(err)` - Always fails with the given error
 * - `MockGenerator::slow(ms)` - Succeeds after a delay
 * - `MockGenerator::stalled()` - Never answers (for timeout and cancellation tests)
 *
 * Every request is recorded so tests can inspect the prompts each stage built.
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use super::{GenerationRequest, TextGenerator};
use crate::errors::ProviderError;

/// Behavior mode for the mock generator
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds
    Working,
    /// Always fails with this error
    Failing(ProviderError),
    /// Succeeds after a delay
    Slow { delay_ms: u64 },
    /// Never completes
    Stalled,
}

/// Scripted generator recording every request it receives
#[derive(Debug, Clone)]
pub struct MockGenerator {
    behavior: MockBehavior,
    /// Responses by call index; missing indices get `Mock response <n>`
    responses: Vec<String>,
    /// Errors injected at specific call indices
    failures: HashMap<usize, ProviderError>,
    request_count: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<GenerationRequest>>>,
}

impl MockGenerator {
    /// Create a new mock generator with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            responses: Vec::new(),
            failures: HashMap::new(),
            request_count: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    pub fn failing(error: ProviderError) -> Self {
        Self::new(MockBehavior::Failing(error))
    }

    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    pub fn stalled() -> Self {
        Self::new(MockBehavior::Stalled)
    }

    /// Script responses for successive calls
    pub fn with_responses<I, S>(mut self, responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.responses = responses.into_iter().map(Into::into).collect();
        self
    }

    /// Fail the call with this 0-based index
    pub fn fail_on_call(mut self, index: usize, error: ProviderError) -> Self {
        self.failures.insert(index, error);
        self
    }

    /// Number of requests received so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Prompts received so far, in call order
    pub fn prompts(&self) -> Vec<String> {
        self.requests.lock().iter().map(|r| r.prompt.clone()).collect()
    }

    /// Full requests received so far, in call order
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().clone()
    }

    fn response_for(&self, index: usize) -> String {
        self.responses
            .get(index)
            .cloned()
            .unwrap_or_else(|| format!("Mock response {}", index + 1))
    }
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::working()
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<String, ProviderError> {
        let index = self.request_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push(request);

        if let Some(error) = self.failures.get(&index) {
            return Err(error.clone());
        }

        match &self.behavior {
            MockBehavior::Working => Ok(self.response_for(index)),
            MockBehavior::Failing(error) => Err(error.clone()),
            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(Duration::from_millis(*delay_ms)).await;
                Ok(self.response_for(index))
            }
            MockBehavior::Stalled => std::future::pending().await,
        }
    }
}
