//! Typed mediasoup parameters crossing the bridge boundary
//!
//! This module provides the wire types the managed side exchanges with the
//! bridge: the DTLS/RTP pair emitted through `onReady`, and the router
//! capability / ICE / DTLS payloads handed in by `initDevice` and
//! `createTransport`. Wire casing is camelCase throughout, matching what the
//! `ptt-backend` mediasoup server produces.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// SSRC the fixed producer announcement advertises.
pub const ANNOUNCEMENT_SSRC: u32 = 1111;

/// RTCP canonical name shared by all PTT producers.
pub const RTCP_CNAME: &str = "ptt";

/// Which side initiates the DTLS handshake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DtlsRole {
    #[default]
    Auto,
    Client,
    Server,
}

/// Certificate fingerprint inside a DTLS descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DtlsFingerprint {
    /// Hash algorithm name (`sha-256`, `sha-384`, ...)
    pub algorithm: String,
    /// Hex fingerprint value
    pub value: String,
}

/// DTLS descriptor: role plus certificate fingerprints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DtlsParameters {
    #[serde(default)]
    pub role: DtlsRole,
    pub fingerprints: Vec<DtlsFingerprint>,
}

/// Codec entry in the emitted RTP parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RtpCodecParameters {
    /// Full mime type, e.g. `audio/opus`
    pub mime_type: String,
    pub clock_rate: u32,
    /// Channel count; absent for video codecs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channels: Option<u16>,
}

/// RTP header extension mapping in send parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RtpHeaderExtensionParameters {
    pub uri: String,
    pub id: u16,
}

/// Single encoding (simulcast layer) in send parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RtpEncodingParameters {
    pub ssrc: u32,
}

/// RTCP metadata attached to send parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RtcpParameters {
    pub cname: String,
}

/// RTP parameters for a producer, as delivered to `onReady`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RtpSendParameters {
    pub codecs: Vec<RtpCodecParameters>,
    pub header_extensions: Vec<RtpHeaderExtensionParameters>,
    pub encodings: Vec<RtpEncodingParameters>,
    pub rtcp: RtcpParameters,
}

/// Codec entry in the router capabilities handed to `initDevice`
///
/// Parsed leniently: the router describes codecs with more detail than the
/// bridge consumes, so everything beyond mime type and clock rate is
/// optional or kept as raw JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RtpCodecCapability {
    #[serde(default)]
    pub kind: Option<String>,
    pub mime_type: String,
    pub clock_rate: u32,
    #[serde(default)]
    pub channels: Option<u16>,
    #[serde(default)]
    pub preferred_payload_type: Option<u8>,
    #[serde(default)]
    pub parameters: Option<serde_json::Value>,
    #[serde(default)]
    pub rtcp_feedback: Option<serde_json::Value>,
}

/// Router RTP capabilities, the `initDevice` payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RtpCapabilities {
    #[serde(default)]
    pub codecs: Vec<RtpCodecCapability>,
    #[serde(default)]
    pub header_extensions: Vec<serde_json::Value>,
}

/// ICE username fragment / password pair for a transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IceParameters {
    pub username_fragment: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ice_lite: Option<bool>,
}

/// Server-reflexive ICE candidate for a transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IceCandidate {
    pub foundation: String,
    pub priority: u32,
    /// Listen address; mediasoup emitted this field as `ip` before 3.13
    #[serde(alias = "ip")]
    pub address: String,
    pub protocol: String,
    pub port: u16,
    #[serde(rename = "type")]
    pub candidate_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tcp_type: Option<String>,
}

/// Transport direction as the app and backend spell it: `send` or `recv`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportDirection {
    Send,
    Recv,
}

impl FromStr for TransportDirection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "send" => Ok(TransportDirection::Send),
            "recv" => Ok(TransportDirection::Recv),
            other => Err(Error::InvalidDirection(other.to_string())),
        }
    }
}

impl fmt::Display for TransportDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportDirection::Send => write!(f, "send"),
            TransportDirection::Recv => write!(f, "recv"),
        }
    }
}

/// The DTLS descriptor / RTP parameter pair delivered through `onReady`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProducerAnnouncement {
    pub dtls: DtlsParameters,
    pub rtp: RtpSendParameters,
}

impl ProducerAnnouncement {
    /// Fixed mono-Opus announcement the bridge emits until real transport
    /// negotiation lands.
    ///
    /// The serialized bytes of this value are part of the managed-side
    /// contract; the `00` fingerprint is a stand-in for a negotiated
    /// certificate digest.
    pub fn opus_mono() -> Self {
        Self {
            dtls: DtlsParameters {
                role: DtlsRole::Auto,
                fingerprints: vec![DtlsFingerprint {
                    algorithm: "sha-256".to_string(),
                    value: "00".to_string(),
                }],
            },
            rtp: RtpSendParameters {
                codecs: vec![RtpCodecParameters {
                    mime_type: "audio/opus".to_string(),
                    clock_rate: 48_000,
                    channels: Some(1),
                }],
                header_extensions: Vec::new(),
                encodings: vec![RtpEncodingParameters {
                    ssrc: ANNOUNCEMENT_SSRC,
                }],
                rtcp: RtcpParameters {
                    cname: RTCP_CNAME.to_string(),
                },
            },
        }
    }

    /// Serialize to the `(dtlsJson, rtpJson)` wire pair, DTLS first.
    pub fn to_wire(&self) -> Result<(String, String)> {
        Ok((
            serde_json::to_string(&self.dtls)?,
            serde_json::to_string(&self.rtp)?,
        ))
    }
}
