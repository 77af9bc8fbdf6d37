//! Bridge core: the Rust-side API behind the JNI exports.
//!
//! The bridge:
//! 1. Logs each call with the fields the Android side expects in logcat
//! 2. Delegates to the configured [`InferenceBackend`]
//! 3. Counts successful and failed calls

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::{BridgeConfig, CONFIG_ENV_VAR};
use crate::inference::backend::{build_backend, BackendError, InferenceBackend};
use crate::inference::handle::ModelHandle;
use crate::logging;

static GLOBAL: OnceLock<LlamaBridge> = OnceLock::new();

/// Snapshot of bridge call counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeStats {
    pub models_loaded: u64,
    pub inferences: u64,
    pub models_freed: u64,
    pub failures: u64,
}

#[derive(Debug, Default)]
struct Counters {
    models_loaded: AtomicU64,
    inferences: AtomicU64,
    models_freed: AtomicU64,
    failures: AtomicU64,
}

/// Entry point for model load, inference and release.
pub struct LlamaBridge {
    backend: Box<dyn InferenceBackend>,
    counters: Counters,
}

impl LlamaBridge {
    /// Create a bridge over an explicit backend.
    pub fn new(backend: Box<dyn InferenceBackend>) -> Self {
        Self {
            backend,
            counters: Counters::default(),
        }
    }

    /// Create a bridge with the backend selected by `config`.
    pub fn from_config(config: &BridgeConfig) -> Self {
        Self::new(build_backend(&config.backend))
    }

    /// The process-wide bridge used by the JNI exports.
    ///
    /// Built on first use by [`LlamaBridge::from_env`].
    pub fn global() -> &'static LlamaBridge {
        GLOBAL.get_or_init(LlamaBridge::from_env)
    }

    /// Build a bridge from the config named by `LLAMA_BRIDGE_CONFIG`.
    ///
    /// The logger is installed before a config error is reported, so the
    /// fallback warning reaches logcat.
    pub fn from_env() -> Self {
        let (config, load_error) = match BridgeConfig::try_from_env() {
            Ok(config) => (config, None),
            Err(e) => (BridgeConfig::default(), Some(e)),
        };
        logging::init(&config.log);

        if let Some(e) = load_error {
            warn!("Invalid config from {CONFIG_ENV_VAR}: {e:#}, using defaults");
        }

        let bridge = LlamaBridge::from_config(&config);
        info!(
            backend = bridge.backend_name(),
            version = env!("CARGO_PKG_VERSION"),
            "Llama bridge initialised"
        );
        bridge
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Load the model at `path`.
    pub fn load_model(&self, path: &str) -> Result<ModelHandle, BackendError> {
        info!(path, "Loading model");

        let handle = self.record(&self.counters.models_loaded, self.backend.load_model(path))?;
        debug!(%handle, "Model handle issued");
        Ok(handle)
    }

    /// Run `prompt` against the model behind `handle`.
    pub fn inference(&self, handle: ModelHandle, prompt: &str) -> Result<String, BackendError> {
        let request_id = Uuid::new_v4();
        let start = Instant::now();
        info!(%request_id, %handle, prompt, "Inference");

        let response = self.record(
            &self.counters.inferences,
            self.backend.inference(handle, prompt),
        )?;

        debug!(
            %request_id,
            response_len = response.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "Inference complete"
        );
        Ok(response)
    }

    /// Release the model behind `handle`.
    pub fn free_model(&self, handle: ModelHandle) -> Result<(), BackendError> {
        info!(%handle, "Releasing model");
        self.record(&self.counters.models_freed, self.backend.free_model(handle))
    }

    pub fn stats(&self) -> BridgeStats {
        BridgeStats {
            models_loaded: self.counters.models_loaded.load(Ordering::Relaxed),
            inferences: self.counters.inferences.load(Ordering::Relaxed),
            models_freed: self.counters.models_freed.load(Ordering::Relaxed),
            failures: self.counters.failures.load(Ordering::Relaxed),
        }
    }

    fn record<T>(
        &self,
        success: &AtomicU64,
        result: Result<T, BackendError>,
    ) -> Result<T, BackendError> {
        match &result {
            Ok(_) => success.fetch_add(1, Ordering::Relaxed),
            Err(e) => {
                warn!(backend = self.backend.name(), "Backend call failed: {e}");
                self.counters.failures.fetch_add(1, Ordering::Relaxed)
            }
        };
        result
    }
}
