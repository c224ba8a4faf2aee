//! # notem-inference
//!
//! LLM generation backend abstraction for notem.
//!
//! This crate provides:
//! - The Ollama implementation of [`notem_core::GenerationBackend`]
//! - A deterministic mock backend with a call log for tests
//!
//! One backend is constructed at startup (usually via
//! [`OllamaBackend::from_env`]) and injected into the services that need it.
//! The backend is stateless per call: a prompt goes in, a completion comes
//! back, nothing is retained between calls.
//!
//! # Feature Flags
//!
//! - `ollama` (default): Enable the Ollama backend
//! - `mock`: Expose the mock backend to downstream test suites
//!
//! # Example
//!
//! ```rust,no_run
//! use notem_inference::OllamaBackend;
//! use notem_core::GenerationBackend;
//!
//! #[tokio::main]
//! async fn main() {
//!     let backend = OllamaBackend::from_env();
//!     let answer = backend.generate("Say hello.").await.unwrap();
//!     println!("{answer}");
//! }
//! ```

#[cfg(feature = "ollama")]
pub mod ollama;

// Mock backend for deterministic tests. Always compiled for this crate's own
// tests; downstream crates opt in with the `mock` feature.
#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export core types
pub use notem_core::*;

#[cfg(feature = "ollama")]
pub use ollama::OllamaBackend;

#[cfg(any(test, feature = "mock"))]
pub use mock::MockGenerationBackend;
