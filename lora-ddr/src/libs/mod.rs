use serde::{Deserialize, Serialize};

pub mod config;
pub mod data_handler;
pub mod ddr;
pub mod ddr_client;
pub mod envelope;
pub mod error;
pub mod mqtt;
pub mod topic;

/// Uplink envelope from the network server.
#[derive(Clone, Debug, Deserialize)]
pub struct UplinkMessage {
    #[serde(default)]
    pub app_id: Option<String>,
    #[serde(default)]
    pub dev_id: Option<String>,
    #[serde(default)]
    pub hardware_serial: Option<String>,
    #[serde(default)]
    pub counter: Option<u32>,
    pub port: u8,
    /// Empty when the envelope has no payload or a `null` one.
    #[serde(default, alias = "payload_raw", with = "envelope::base64_bytes")]
    pub payload: Vec<u8>,
}

/// Downlink envelope to the network server.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DownlinkMessage {
    pub port: u8,
    pub confirmed: bool,
    #[serde(with = "envelope::base64_bytes")]
    pub payload: Vec<u8>,
}

/// Device location carried by a DDR request.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}
