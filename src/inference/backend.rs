//! Inference backends.
//!
//! A backend owns whatever engine state sits behind a [`ModelHandle`].
//! The bridge only ever talks to the [`InferenceBackend`] trait, so the JNI
//! layer is unchanged when the engine behind it changes.
//!
//! The only backend provided is [`PlaceholderBackend`]: it loads nothing,
//! hands out the null handle and answers every prompt with a fixed string.

use thiserror::Error;
use tracing::debug;

use crate::config::{BackendConfig, BackendKind};
use crate::inference::handle::ModelHandle;

/// Response returned by the placeholder backend unless configured otherwise.
pub const PLACEHOLDER_RESPONSE: &str = "Gerçek LLM yanıtı burada olacak";

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Failed to load model: {0}")]
    ModelLoadFailed(String),

    #[error("Inference failed: {0}")]
    InferenceFailed(String),

    #[error("Unknown model handle: {0}")]
    UnknownHandle(ModelHandle),
}

/// Engine behind the three JNI entry points.
///
/// Called from arbitrary Java threads, hence `Send + Sync`.
pub trait InferenceBackend: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Load the model at `path` and return its handle.
    fn load_model(&self, path: &str) -> Result<ModelHandle, BackendError>;

    /// Run `prompt` against the model identified by `handle`.
    fn inference(&self, handle: ModelHandle, prompt: &str) -> Result<String, BackendError>;

    /// Release the model identified by `handle`.
    fn free_model(&self, handle: ModelHandle) -> Result<(), BackendError>;
}

/// Build the backend selected by `config`.
pub fn build_backend(config: &BackendConfig) -> Box<dyn InferenceBackend> {
    match config.kind {
        BackendKind::Placeholder => {
            Box::new(PlaceholderBackend::new(config.placeholder_response.clone()))
        }
    }
}

/// Stub backend.
///
/// Performs no validation and no file access. Every call succeeds.
#[derive(Debug, Clone)]
pub struct PlaceholderBackend {
    response: String,
}

impl PlaceholderBackend {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }

    pub fn response(&self) -> &str {
        &self.response
    }
}

impl Default for PlaceholderBackend {
    fn default() -> Self {
        Self::new(PLACEHOLDER_RESPONSE)
    }
}

impl InferenceBackend for PlaceholderBackend {
    fn name(&self) -> &'static str {
        "placeholder"
    }

    fn load_model(&self, path: &str) -> Result<ModelHandle, BackendError> {
        debug!(path, "Placeholder backend: nothing loaded");
        Ok(ModelHandle::NULL)
    }

    fn inference(&self, handle: ModelHandle, _prompt: &str) -> Result<String, BackendError> {
        debug!(%handle, "Placeholder backend: fixed response");
        Ok(self.response.clone())
    }

    fn free_model(&self, handle: ModelHandle) -> Result<(), BackendError> {
        debug!(%handle, "Placeholder backend: nothing to release");
        Ok(())
    }
}
