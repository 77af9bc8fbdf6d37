//! Inference layer behind the JNI boundary.
//!
//! - [`bridge`]: process-wide entry point used by the JNI exports
//! - [`backend`]: backend trait and the placeholder backend
//! - [`handle`]: opaque model handles passed to and from Java

pub mod backend;
pub mod bridge;
pub mod handle;
