//! Opaque model handles.

use std::fmt;

use jni::sys::jlong;
use serde::{Deserialize, Serialize};

/// Handle identifying a loaded model on the Java side.
///
/// Travels across JNI as a `long`. `0` is the null handle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelHandle(jlong);

impl ModelHandle {
    /// The null handle.
    pub const NULL: ModelHandle = ModelHandle(0);

    pub const fn from_raw(raw: jlong) -> Self {
        Self(raw)
    }

    pub const fn into_raw(self) -> jlong {
        self.0
    }

    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl From<jlong> for ModelHandle {
    fn from(raw: jlong) -> Self {
        Self(raw)
    }
}

impl From<ModelHandle> for jlong {
    fn from(handle: ModelHandle) -> Self {
        handle.0
    }
}

impl fmt::Display for ModelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            f.write_str("null")
        } else {
            write!(f, "{:#x}", self.0)
        }
    }
}
