//! Marshalling helpers shared by the JNI exports.
//!
//! No Rust panic may unwind into the JVM, and no error may return without a
//! pending Java exception. Every export runs its body through
//! [`catch_panic`] and hands the outcome to [`finish`].

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use jni::objects::{JObject, JString};
use jni::JNIEnv;
use tracing::error;

use crate::ffi::FfiError;

/// Decode a Java string argument. `name` is the Java parameter name.
pub fn read_string(
    env: &mut JNIEnv,
    value: &JString,
    name: &'static str,
) -> Result<String, FfiError> {
    require_non_null(value, name)?;
    Ok(env.get_string(value)?.into())
}

/// Reject a `null` reference argument. `name` is the Java parameter name.
pub fn require_non_null(value: &JObject, name: &'static str) -> Result<(), FfiError> {
    if value.is_null() {
        return Err(FfiError::NullArgument(name));
    }
    Ok(())
}

/// Run `f`, turning a panic into [`FfiError::Panic`].
pub fn catch_panic<T>(f: impl FnOnce() -> Result<T, FfiError>) -> Result<T, FfiError> {
    panic::catch_unwind(AssertUnwindSafe(f))
        .unwrap_or_else(|payload| Err(FfiError::Panic(panic_message(payload.as_ref()))))
}

/// Best-effort text of a panic payload.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Unwrap `result`, or throw the matching Java exception and return `null`.
pub fn finish<T>(env: &mut JNIEnv, result: Result<T, FfiError>, null: T) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            throw(env, &e);
            null
        }
    }
}

/// Throw `err` as a Java exception unless one is already pending.
pub fn throw(env: &mut JNIEnv, err: &FfiError) {
    error!("{err}");

    let pending = env.exception_check().unwrap_or(false);
    let Some((class, message)) = exception_for(err, pending) else {
        return;
    };
    if let Err(e) = env.throw_new(class, message) {
        error!("Failed to throw {class}: {e}");
    }
}

/// Exception class and message to throw for `err`, or `None` when a Java
/// exception is already pending.
pub fn exception_for(err: &FfiError, pending: bool) -> Option<(&'static str, String)> {
    if pending {
        return None;
    }
    Some((err.exception_class(), err.to_string()))
}
