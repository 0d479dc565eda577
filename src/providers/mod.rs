/*!
 * Text generation providers.
 *
 * The pipeline talks to a language model only through the [`TextGenerator`]
 * trait:
 * - `ollama`: local Ollama server over HTTP
 * - `mock`: scripted in-memory generator for tests and benchmarks
 */

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::errors::ProviderError;

pub mod mock;
pub mod ollama;

/// Default model used for every stage
pub const DEFAULT_MODEL: &str = "llama3.2:3b";

/// Default sampling temperature
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Common trait for text generators
///
/// A generator receives one fully built prompt and returns the generated text.
/// Failures are reported as `ProviderError`; the pipeline decides how to render
/// them.
#[async_trait]
pub trait TextGenerator: Send + Sync + Debug {
    /// Generate text for a single prompt
    async fn generate(&self, request: GenerationRequest) -> Result<String, ProviderError>;
}

/// Generation request body
///
/// Serialized as `{ model, prompt, stream: false, temperature }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Model name to use for generation
    pub model: String,
    /// Prompt to generate from
    pub prompt: String,
    /// Always false: responses are read as one JSON object
    pub stream: bool,
    /// Sampling temperature
    pub temperature: f32,
}

impl GenerationRequest {
    /// Create a new generation request with the default temperature
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            stream: false,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}
