//! Bridge state and the operations behind the JNI surface
//!
//! [`MediaBridge`] is the native half of the managed `MediasoupController`.
//! It records what the managed side hands in (router capabilities, transport
//! seeds) and emits the producer announcement through the listener slot. No
//! ICE/DTLS negotiation and no media pipeline live here; the recorded state
//! is what a real transport implementation will consume.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::error::Result;
use crate::listener::{Delivery, ListenerSlot, ReadyListener};
use crate::parameters::{
    DtlsParameters, IceCandidate, IceParameters, ProducerAnnouncement, RtpCapabilities,
    TransportDirection,
};

/// Parsed, recorded arguments of one `createTransport` call
#[derive(Debug, Clone)]
pub struct TransportSeed {
    pub direction: TransportDirection,
    pub id: String,
    pub ice_parameters: IceParameters,
    pub ice_candidates: Vec<IceCandidate>,
    pub dtls_parameters: DtlsParameters,
}

#[derive(Default)]
struct BridgeState {
    router_capabilities: Option<RtpCapabilities>,
    transports: HashMap<String, TransportSeed>,
}

/// The native half of the managed `MediasoupController`
///
/// All operations are synchronous on the caller's thread. The listener slot
/// and the bookkeeping state are independently locked, so registering a
/// callback never contends with transport recording.
#[derive(Default)]
pub struct MediaBridge {
    listener: ListenerSlot,
    state: Mutex<BridgeState>,
}

impl MediaBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install or clear the ready listener (`nativeSetOnDtlsRtpReadyCallback`).
    ///
    /// Replacing drops the previous listener and with it the managed-side
    /// reference it holds.
    pub fn set_ready_listener(&self, listener: Option<Arc<dyn ReadyListener>>) {
        self.listener.replace(listener);
    }

    /// Whether a ready listener is currently registered.
    pub fn has_ready_listener(&self) -> bool {
        self.listener.is_registered()
    }

    /// Record the router RTP capabilities (`nativeInitDevice`).
    ///
    /// Bookkeeping only; no codec negotiation happens here.
    pub fn init_device(&self, rtp_capabilities_json: &str) -> Result<()> {
        let capabilities: RtpCapabilities = serde_json::from_str(rtp_capabilities_json)?;
        debug!(
            codecs = capabilities.codecs.len(),
            "router capabilities recorded"
        );
        self.state.lock().router_capabilities = Some(capabilities);
        Ok(())
    }

    /// Whether `init_device` has recorded router capabilities.
    pub fn device_initialized(&self) -> bool {
        self.state.lock().router_capabilities.is_some()
    }

    /// Record a transport seed (`nativeCreateTransport`).
    ///
    /// Replaces any seed already stored under the same transport id. The
    /// transport is not connected; ICE/DTLS negotiation is out of scope.
    pub fn create_transport(
        &self,
        direction: &str,
        transport_id: &str,
        ice_parameters_json: &str,
        ice_candidates_json: &str,
        dtls_parameters_json: &str,
    ) -> Result<()> {
        let direction: TransportDirection = direction.parse()?;
        let ice_parameters: IceParameters = serde_json::from_str(ice_parameters_json)?;
        let ice_candidates: Vec<IceCandidate> = serde_json::from_str(ice_candidates_json)?;
        let dtls_parameters: DtlsParameters = serde_json::from_str(dtls_parameters_json)?;

        debug!(
            %direction,
            transport_id,
            candidates = ice_candidates.len(),
            "transport seed recorded"
        );
        self.state.lock().transports.insert(
            transport_id.to_string(),
            TransportSeed {
                direction,
                id: transport_id.to_string(),
                ice_parameters,
                ice_candidates,
                dtls_parameters,
            },
        );
        Ok(())
    }

    /// Number of recorded transport seeds.
    pub fn transport_count(&self) -> usize {
        self.state.lock().transports.len()
    }

    /// Look up a recorded transport seed by id.
    pub fn transport(&self, transport_id: &str) -> Option<TransportSeed> {
        self.state.lock().transports.get(transport_id).cloned()
    }

    /// Emit the fixed producer announcement (`nativePrepareProducer`).
    ///
    /// The payloads do not depend on `audio_track_id`; the id is logged so
    /// the managed-side call sequence stays traceable. The boundary reports
    /// success regardless of the returned [`Delivery`].
    pub fn prepare_producer(&self, audio_track_id: &str) -> Result<Delivery> {
        let (dtls_json, rtp_json) = ProducerAnnouncement::opus_mono().to_wire()?;
        let delivery = self.listener.notify_ready(&dtls_json, &rtp_json);
        match &delivery {
            Delivery::Delivered => debug!(audio_track_id, "producer announcement delivered"),
            Delivery::NoListener => {
                debug!(audio_track_id, "producer announcement skipped, no listener")
            }
            Delivery::Failed(e) => {
                warn!(audio_track_id, error = %e, "producer announcement delivery failed")
            }
        }
        Ok(delivery)
    }
}
