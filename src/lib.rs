//! llama-android-bridge: JNI bridge between the QR Master Android app and
//! a llama.cpp inference engine.
//!
//! The Java side (`com.qrmaster.app.LlamaInference`) calls three native
//! methods: load a model, run inference, free the model. Those land in
//! [`ffi`], which marshals JNI values and forwards to the
//! [`inference::bridge::LlamaBridge`]. The bridge delegates to an
//! [`inference::backend::InferenceBackend`]; the only backend shipped is the
//! placeholder one, which returns a null handle and a fixed response.

pub mod config;
pub mod ffi;
pub mod inference;
pub mod logging;
