//! JNI entry points for `com.ropex.pptapp.mediasoup.MediasoupController`
//!
//! Symbol names, argument order, and the always-true result of
//! `nativePrepareProducer` are a contract with the managed side. Failures
//! here are logged and swallowed; no entry point raises into Java.

use std::sync::Arc;

use jni::objects::{JObject, JString};
use jni::sys::{jboolean, JNI_TRUE};
use jni::JNIEnv;
use tracing::{debug, warn};

use super::jni_util::{clear_pending_exception, decode_string};
use super::listener::JavaReadyCallback;
use super::{bridge, java_vm};

/// `nativeSetOnDtlsRtpReadyCallback(cb: DtlsRtpCallback)`
///
/// A null callback clears the slot; otherwise the previous callback is
/// replaced and its global reference released.
#[no_mangle]
#[allow(non_snake_case)]
pub extern "system" fn Java_com_ropex_pptapp_mediasoup_MediasoupController_nativeSetOnDtlsRtpReadyCallback<
    'local,
>(
    mut env: JNIEnv<'local>,
    _this: JObject<'local>,
    callback: JObject<'local>,
) {
    if callback.as_raw().is_null() {
        bridge().set_ready_listener(None);
        debug!("ready callback cleared");
        return;
    }

    let vm = match java_vm(&env) {
        Some(vm) => vm,
        None => {
            warn!("no JavaVM available; ready callback not stored");
            return;
        }
    };

    match env.new_global_ref(&callback) {
        Ok(global) => {
            bridge().set_ready_listener(Some(Arc::new(JavaReadyCallback::new(vm, global))));
            debug!("ready callback stored");
        }
        Err(e) => {
            warn!(error = %e, "could not retain ready callback");
            clear_pending_exception(&mut env);
        }
    }
}

/// `nativeInitDevice(rtpCapsJson: String)`
#[no_mangle]
#[allow(non_snake_case)]
pub extern "system" fn Java_com_ropex_pptapp_mediasoup_MediasoupController_nativeInitDevice<
    'local,
>(
    mut env: JNIEnv<'local>,
    _this: JObject<'local>,
    rtp_capabilities_json: JString<'local>,
) {
    let json = match decode_string(&mut env, &rtp_capabilities_json) {
        Ok(json) => json,
        Err(e) => {
            warn!(error = %e, "initDevice: unreadable capabilities argument");
            clear_pending_exception(&mut env);
            return;
        }
    };

    if let Err(e) = bridge().init_device(&json) {
        warn!(error = %e, "initDevice: capabilities not recorded");
    }
}

/// `nativeCreateTransport(direction, transportId, iceParamsJson, iceCandidatesJson, dtlsParamsJson)`
#[no_mangle]
#[allow(non_snake_case)]
pub extern "system" fn Java_com_ropex_pptapp_mediasoup_MediasoupController_nativeCreateTransport<
    'local,
>(
    mut env: JNIEnv<'local>,
    _this: JObject<'local>,
    direction: JString<'local>,
    transport_id: JString<'local>,
    ice_parameters_json: JString<'local>,
    ice_candidates_json: JString<'local>,
    dtls_parameters_json: JString<'local>,
) {
    let decoded = (|| -> Result<[String; 5], jni::errors::Error> {
        Ok([
            decode_string(&mut env, &direction)?,
            decode_string(&mut env, &transport_id)?,
            decode_string(&mut env, &ice_parameters_json)?,
            decode_string(&mut env, &ice_candidates_json)?,
            decode_string(&mut env, &dtls_parameters_json)?,
        ])
    })();

    let [direction, transport_id, ice_parameters, ice_candidates, dtls_parameters] = match decoded {
        Ok(arguments) => arguments,
        Err(e) => {
            warn!(error = %e, "createTransport: unreadable arguments");
            clear_pending_exception(&mut env);
            return;
        }
    };

    if let Err(e) = bridge().create_transport(
        &direction,
        &transport_id,
        &ice_parameters,
        &ice_candidates,
        &dtls_parameters,
    ) {
        warn!(error = %e, %transport_id, "createTransport: seed not recorded");
    }
}

/// `nativePrepareProducer(audioTrackId: String): Boolean`
///
/// Always reports success; the delivery outcome only shows up in logs.
#[no_mangle]
#[allow(non_snake_case)]
pub extern "system" fn Java_com_ropex_pptapp_mediasoup_MediasoupController_nativePrepareProducer<
    'local,
>(
    mut env: JNIEnv<'local>,
    _this: JObject<'local>,
    audio_track_id: JString<'local>,
) -> jboolean {
    let track_id = match decode_string(&mut env, &audio_track_id) {
        Ok(track_id) => track_id,
        Err(e) => {
            // The announcement does not depend on the track id; deliver anyway.
            warn!(error = %e, "prepareProducer: unreadable track id");
            clear_pending_exception(&mut env);
            String::new()
        }
    };

    // The core logs the delivery outcome; this boundary stays silent.
    if let Err(e) = bridge().prepare_producer(&track_id) {
        warn!(error = %e, "prepareProducer: announcement not built");
    }
    JNI_TRUE
}
