//! Small JNI marshalling helpers shared by the entry points

use jni::objects::JString;
use jni::JNIEnv;

/// Decode a Java string argument into an owned Rust string.
pub(crate) fn decode_string(
    env: &mut JNIEnv,
    value: &JString,
) -> Result<String, jni::errors::Error> {
    Ok(env.get_string(value)?.into())
}

/// Clear any exception the last JNI call left pending.
///
/// The bridge contract keeps this boundary silent, so nothing may propagate
/// back into the managed caller.
pub(crate) fn clear_pending_exception(env: &mut JNIEnv) {
    if env.exception_check().unwrap_or(false) {
        let _ = env.exception_clear();
    }
}
