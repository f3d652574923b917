//! Contract tests for the bridge surface as the managed side drives it:
//! callback replacement, silent skips, the fixed announcement pair, and
//! slot safety under concurrent registration and delivery.

use std::sync::Arc;
use std::thread;

use parking_lot::Mutex;
use pttlink_core::{Delivery, MediaBridge, NotifyError, ReadyListener};

const DTLS_WIRE: &str = r#"{"role":"auto","fingerprints":[{"algorithm":"sha-256","value":"00"}]}"#;
const RTP_WIRE: &str = r#"{"codecs":[{"mimeType":"audio/opus","clockRate":48000,"channels":1}],"headerExtensions":[],"encodings":[{"ssrc":1111}],"rtcp":{"cname":"ptt"}}"#;

#[derive(Default)]
struct RecordingListener {
    calls: Mutex<Vec<(String, String)>>,
}

impl RecordingListener {
    fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().clone()
    }
}

impl ReadyListener for RecordingListener {
    fn on_ready(&self, dtls_json: &str, rtp_json: &str) -> Result<(), NotifyError> {
        self.calls
            .lock()
            .push((dtls_json.to_string(), rtp_json.to_string()));
        Ok(())
    }
}

#[test]
fn replacing_the_callback_leaves_only_the_second_active() {
    let bridge = MediaBridge::new();
    let first = Arc::new(RecordingListener::default());
    let second = Arc::new(RecordingListener::default());

    bridge.set_ready_listener(Some(first.clone()));
    bridge.set_ready_listener(Some(second.clone()));
    bridge.prepare_producer("track-1").unwrap();

    assert!(first.calls().is_empty());
    assert_eq!(second.calls().len(), 1);
}

#[test]
fn clearing_the_callback_skips_delivery_but_still_succeeds() {
    let bridge = MediaBridge::new();
    bridge.set_ready_listener(Some(Arc::new(RecordingListener::default())));
    bridge.set_ready_listener(None);

    assert!(!bridge.has_ready_listener());
    assert_eq!(
        bridge.prepare_producer("track-1").unwrap(),
        Delivery::NoListener
    );
}

#[test]
fn announcement_is_byte_identical_across_track_ids() {
    let bridge = MediaBridge::new();
    let listener = Arc::new(RecordingListener::default());
    bridge.set_ready_listener(Some(listener.clone()));

    bridge.prepare_producer("track-1").unwrap();
    bridge.prepare_producer("track-2").unwrap();

    let calls = listener.calls();
    assert_eq!(calls[0], calls[1]);
    assert_eq!(calls[0].0, DTLS_WIRE);
    assert_eq!(calls[0].1, RTP_WIRE);
}

#[test]
fn one_call_means_one_notification_dtls_first() {
    let bridge = MediaBridge::new();
    let listener = Arc::new(RecordingListener::default());
    bridge.set_ready_listener(Some(listener.clone()));

    assert_eq!(
        bridge.prepare_producer("anything").unwrap(),
        Delivery::Delivered
    );

    let calls = listener.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, DTLS_WIRE);
    assert_eq!(calls[0].1, RTP_WIRE);
}

#[test]
fn placeholder_operations_swallow_any_input_and_never_notify() {
    let bridge = MediaBridge::new();
    let listener = Arc::new(RecordingListener::default());
    bridge.set_ready_listener(Some(listener.clone()));

    let _ = bridge.init_device(r#"{"codecs":[]}"#);
    let _ = bridge.init_device("");
    let _ = bridge.init_device("\u{0}binary\u{1}");
    let _ = bridge.create_transport("send", "t", "{}", "[]", "{}");
    let _ = bridge.create_transport("", "", "", "", "");

    assert!(listener.calls().is_empty());
}

#[test]
fn concurrent_registration_and_delivery_does_not_corrupt_the_slot() {
    let bridge = Arc::new(MediaBridge::new());
    let listener = Arc::new(RecordingListener::default());

    thread::scope(|scope| {
        for _ in 0..4 {
            let bridge = bridge.clone();
            let listener = listener.clone();
            scope.spawn(move || {
                for i in 0..200 {
                    if i % 2 == 0 {
                        bridge.set_ready_listener(Some(listener.clone()));
                    } else {
                        bridge.set_ready_listener(None);
                    }
                }
            });
        }
        for _ in 0..4 {
            let bridge = bridge.clone();
            scope.spawn(move || {
                for _ in 0..200 {
                    let delivery = bridge.prepare_producer("hammer").unwrap();
                    assert!(matches!(
                        delivery,
                        Delivery::Delivered | Delivery::NoListener
                    ));
                }
            });
        }
    });

    // Slot is still usable afterwards.
    bridge.set_ready_listener(Some(listener.clone()));
    assert_eq!(bridge.prepare_producer("after").unwrap(), Delivery::Delivered);
    for (dtls, rtp) in listener.calls() {
        assert_eq!(dtls, DTLS_WIRE);
        assert_eq!(rtp, RTP_WIRE);
    }
}
