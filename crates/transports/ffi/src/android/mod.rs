//! Android runtime glue: library-load initialization and process state
//!
//! `JNI_OnLoad` runs when the managed side calls
//! `System.loadLibrary("mediasoupbridge")`. It brings up tracing and
//! captures the `JavaVM`, which the listener later uses to attach whichever
//! thread delivers `onReady`.

mod api;
mod jni_util;
mod listener;

use std::ffi::c_void;
use std::sync::OnceLock;

use jni::sys::{jint, JNI_ERR, JNI_VERSION_1_6};
use jni::{JNIEnv, JavaVM};
use pttlink_core::MediaBridge;
use tracing::{error, info};

static VM: OnceLock<JavaVM> = OnceLock::new();
static BRIDGE: OnceLock<MediaBridge> = OnceLock::new();

/// The process-wide bridge instance the entry points operate on.
pub(crate) fn bridge() -> &'static MediaBridge {
    BRIDGE.get_or_init(MediaBridge::new)
}

/// The captured `JavaVM`.
///
/// Falls back to the calling env's VM when the loader skipped `JNI_OnLoad`
/// (e.g. the library was linked in rather than loaded by name).
pub(crate) fn java_vm(env: &JNIEnv) -> Option<&'static JavaVM> {
    if VM.get().is_none() {
        if let Ok(vm) = env.get_java_vm() {
            let _ = VM.set(vm);
        }
    }
    VM.get()
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();
}

/// Library-load hook: initialize logging and capture the VM.
///
/// # Safety
///
/// Called by the JVM with a valid `JavaVM` pointer during `loadLibrary`.
#[no_mangle]
pub unsafe extern "system" fn JNI_OnLoad(vm: *mut jni::sys::JavaVM, _reserved: *mut c_void) -> jint {
    init_tracing();
    match unsafe { JavaVM::from_raw(vm) } {
        Ok(vm) => {
            let _ = VM.set(vm);
            info!("mediasoupbridge loaded");
            JNI_VERSION_1_6
        }
        Err(e) => {
            error!(error = %e, "JNI_OnLoad could not wrap the JavaVM");
            JNI_ERR
        }
    }
}
