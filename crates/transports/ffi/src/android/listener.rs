//! `GlobalRef`-backed delivery of the `onReady` notification

use jni::objects::{GlobalRef, JValue};
use jni::JavaVM;
use pttlink_core::{NotifyError, ReadyListener};

use super::jni_util::clear_pending_exception;

/// JNI signature of `DtlsRtpCallback.onReady(String, String)`.
const ON_READY_SIG: &str = "(Ljava/lang/String;Ljava/lang/String;)V";

/// A managed `DtlsRtpCallback` held across calls.
///
/// Owns a `GlobalRef` to the callback object; dropping the listener (on
/// replacement or clear) releases that reference. Delivery attaches the
/// current thread, so it is correct from any thread the bridge is driven
/// from, not only the one that registered the callback.
pub(crate) struct JavaReadyCallback {
    vm: &'static JavaVM,
    callback: GlobalRef,
}

impl JavaReadyCallback {
    pub(crate) fn new(vm: &'static JavaVM, callback: GlobalRef) -> Self {
        Self { vm, callback }
    }
}

impl ReadyListener for JavaReadyCallback {
    fn on_ready(&self, dtls_json: &str, rtp_json: &str) -> Result<(), NotifyError> {
        let mut env = self
            .vm
            .attach_current_thread()
            .map_err(|e| NotifyError::Callback(format!("thread attach failed: {e}")))?;

        let dtls = env
            .new_string(dtls_json)
            .map_err(|e| NotifyError::Callback(format!("string allocation failed: {e}")))?;
        let rtp = env
            .new_string(rtp_json)
            .map_err(|e| NotifyError::Callback(format!("string allocation failed: {e}")))?;

        let result = env.call_method(
            self.callback.as_obj(),
            "onReady",
            ON_READY_SIG,
            &[JValue::Object(&dtls), JValue::Object(&rtp)],
        );

        match result {
            Ok(_) => Ok(()),
            Err(jni::errors::Error::MethodNotFound { .. }) => {
                clear_pending_exception(&mut env);
                Err(NotifyError::MethodMissing)
            }
            Err(jni::errors::Error::JavaException) => {
                clear_pending_exception(&mut env);
                Err(NotifyError::Callback(
                    "listener raised an exception".to_string(),
                ))
            }
            Err(e) => {
                clear_pending_exception(&mut env);
                Err(NotifyError::Callback(e.to_string()))
            }
        }
    }
}
