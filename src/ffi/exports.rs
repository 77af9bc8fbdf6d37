//! Native methods of `com.qrmaster.app.LlamaInference`.
//!
//! Java side:
//!
//! ```java
//! private native long nativeLoadModel(String modelPath);
//! private native String nativeInference(long modelHandle, String prompt);
//! private native void nativeFreeModel(long modelHandle);
//! ```

use std::ffi::c_void;

use jni::objects::{JObject, JString};
use jni::sys::{jint, jlong, jstring, JNI_VERSION_1_6};
use jni::{JNIEnv, JavaVM};
use tracing::error;

use crate::ffi::marshal::{catch_panic, finish, read_string};
use crate::inference::bridge::LlamaBridge;
use crate::inference::handle::ModelHandle;

/// Called by the VM on `System.loadLibrary`. Installs logging and builds the bridge.
#[no_mangle]
pub extern "system" fn JNI_OnLoad(_vm: JavaVM, _reserved: *mut c_void) -> jint {
    let result = catch_panic(|| {
        LlamaBridge::global();
        Ok(())
    });
    if let Err(e) = result {
        error!("Bridge initialisation failed: {e}");
    }
    JNI_VERSION_1_6
}

/// `long nativeLoadModel(String modelPath)`
///
/// Returns the model handle, or `0` with a pending exception on failure.
#[no_mangle]
pub extern "system" fn Java_com_qrmaster_app_LlamaInference_nativeLoadModel<'local>(
    mut env: JNIEnv<'local>,
    _this: JObject<'local>,
    model_path: JString<'local>,
) -> jlong {
    let result = catch_panic(|| {
        let path = read_string(&mut env, &model_path, "modelPath")?;
        let handle = LlamaBridge::global().load_model(&path)?;
        Ok(handle.into_raw())
    });
    finish(&mut env, result, ModelHandle::NULL.into_raw())
}

/// `String nativeInference(long modelHandle, String prompt)`
///
/// Returns the response, or `null` with a pending exception on failure.
#[no_mangle]
pub extern "system" fn Java_com_qrmaster_app_LlamaInference_nativeInference<'local>(
    mut env: JNIEnv<'local>,
    _this: JObject<'local>,
    model_handle: jlong,
    prompt: JString<'local>,
) -> jstring {
    let result = catch_panic(|| {
        let prompt_text = read_string(&mut env, &prompt, "prompt")?;
        let response =
            LlamaBridge::global().inference(ModelHandle::from_raw(model_handle), &prompt_text)?;
        Ok(env.new_string(response)?.into_raw())
    });
    finish(&mut env, result, std::ptr::null_mut())
}

/// `void nativeFreeModel(long modelHandle)`
#[no_mangle]
pub extern "system" fn Java_com_qrmaster_app_LlamaInference_nativeFreeModel<'local>(
    mut env: JNIEnv<'local>,
    _this: JObject<'local>,
    model_handle: jlong,
) {
    let result = catch_panic(|| {
        LlamaBridge::global().free_model(ModelHandle::from_raw(model_handle))?;
        Ok(())
    });
    finish(&mut env, result, ())
}
