//! Mock generation backend for deterministic testing.
//!
//! Records every call so tests can assert how (and whether) the model was
//! consulted; the answer path's "no grounding material → no model call"
//! contract is verified with [`MockGenerationBackend::generate_call_count`].

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use notem_core::{Error, GenerationBackend, Result};

/// Mock generation backend for testing.
#[derive(Clone)]
pub struct MockGenerationBackend {
    config: Arc<MockConfig>,
    call_log: Arc<Mutex<Vec<MockCall>>>,
}

#[derive(Debug, Clone, Default)]
struct MockConfig {
    fixed_responses: HashMap<String, String>,
    default_response: String,
    failure: Option<String>,
}

/// One recorded call to the mock.
#[derive(Debug, Clone)]
pub struct MockCall {
    pub operation: String,
    pub prompt: String,
}

impl MockGenerationBackend {
    /// Create a new mock backend that answers every prompt with
    /// "Mock response".
    pub fn new() -> Self {
        Self {
            config: Arc::new(MockConfig {
                default_response: "Mock response".to_string(),
                ..MockConfig::default()
            }),
            call_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set the response returned for any prompt without a specific mapping.
    pub fn with_fixed_response(mut self, response: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).default_response = response.into();
        self
    }

    /// Return `output` for prompts containing `fragment`.
    pub fn with_response_mapping(
        mut self,
        fragment: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        Arc::make_mut(&mut self.config)
            .fixed_responses
            .insert(fragment.into(), output.into());
        self
    }

    /// Make every generation call fail with the given message.
    pub fn with_failure(mut self, message: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).failure = Some(message.into());
        self
    }

    /// Get all logged calls for assertion.
    pub fn calls(&self) -> Vec<MockCall> {
        self.call_log.lock().unwrap().clone()
    }

    /// Clear the call log.
    pub fn clear_calls(&self) {
        self.call_log.lock().unwrap().clear()
    }

    /// Number of generation calls made so far.
    pub fn generate_call_count(&self) -> usize {
        self.call_log.lock().unwrap().len()
    }

    fn log_call(&self, operation: &str, prompt: &str) {
        self.call_log.lock().unwrap().push(MockCall {
            operation: operation.to_string(),
            prompt: prompt.to_string(),
        });
    }

    fn respond(&self, prompt: &str) -> Result<String> {
        if let Some(message) = &self.config.failure {
            return Err(Error::Inference(message.clone()));
        }
        for (fragment, output) in &self.config.fixed_responses {
            if prompt.contains(fragment) {
                return Ok(output.clone());
            }
        }
        Ok(self.config.default_response.clone())
    }
}

impl Default for MockGenerationBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerationBackend for MockGenerationBackend {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.log_call("generate", prompt);
        self.respond(prompt)
    }

    async fn generate_with_system(&self, _system: &str, prompt: &str) -> Result<String> {
        self.log_call("generate_with_system", prompt);
        self.respond(prompt)
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}
