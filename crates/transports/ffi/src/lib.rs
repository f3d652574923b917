//! JNI bindings for the PTTLink mediasoup bridge
//!
//! This crate builds `libmediasoupbridge.so`, the native library behind
//! `com.ropex.pptapp.mediasoup.MediasoupController`. The bridge state lives
//! in `pttlink-core`; this crate only marshals strings across the JVM
//! boundary and keeps that boundary silent: no entry point ever raises into
//! Java, and `nativePrepareProducer` reports success regardless of delivery.
//!
//! # Features
//!
//! - `android` (default): JNI entry points, `JNI_OnLoad`, and the
//!   `GlobalRef`-backed ready listener
//!
//! # Usage (Kotlin)
//!
//! ```kotlin
//! System.loadLibrary("mediasoupbridge")
//!
//! controller.setCallback { dtls, rtp -> signaling.connectTransport(dtls, rtp) }
//! controller.initDevice(routerRtpCapabilities)
//! controller.createTransport("send", id, iceParameters, iceCandidates, dtlsParameters)
//! controller.prepareProducer("mic-track")
//! ```

#![warn(clippy::all)]

// Android-specific modules (only compiled with `android` feature)
#[cfg(feature = "android")]
pub mod android;
