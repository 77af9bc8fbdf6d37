//! JNI boundary.
//!
//! - [`exports`]: the `Java_com_qrmaster_app_LlamaInference_*` symbols and `JNI_OnLoad`
//! - [`marshal`]: string conversion, panic containment and exception mapping

pub mod exports;
pub mod marshal;

use thiserror::Error;

use crate::inference::backend::BackendError;

#[derive(Error, Debug)]
pub enum FfiError {
    #[error("Argument `{0}` is null")]
    NullArgument(&'static str),

    #[error("JNI call failed: {0}")]
    Jni(#[from] jni::errors::Error),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("Native panic: {0}")]
    Panic(String),
}

impl FfiError {
    /// Java exception class thrown for this error.
    pub fn exception_class(&self) -> &'static str {
        match self {
            FfiError::NullArgument(_) => "java/lang/IllegalArgumentException",
            FfiError::Backend(_) => "java/lang/IllegalStateException",
            FfiError::Jni(_) | FfiError::Panic(_) => "java/lang/RuntimeException",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::handle::ModelHandle;

    #[test]
    fn test_exception_classes() {
        assert_eq!(
            FfiError::NullArgument("prompt").exception_class(),
            "java/lang/IllegalArgumentException"
        );
        assert_eq!(
            FfiError::from(BackendError::UnknownHandle(ModelHandle::from_raw(9)))
                .exception_class(),
            "java/lang/IllegalStateException"
        );
        assert_eq!(
            FfiError::Panic("boom".into()).exception_class(),
            "java/lang/RuntimeException"
        );
        assert_eq!(
            FfiError::from(jni::errors::Error::NullPtr("env")).exception_class(),
            "java/lang/RuntimeException"
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            FfiError::NullArgument("modelPath").to_string(),
            "Argument `modelPath` is null"
        );
        assert_eq!(
            FfiError::from(BackendError::InferenceFailed("oom".into())).to_string(),
            "Inference failed: oom"
        );
    }
}
