//! Error types of the DDR pipeline.
//!
//! Every failure is terminal for the message being handled and never for the process, so each
//! stage owns a small error type that the orchestrator logs with its context.

/// The transport message body is not a valid uplink envelope.
#[derive(Debug, thiserror::Error)]
#[error("can't unmarshal payload to uplink message: {0}")]
pub struct DecodeError(#[from] pub serde_json::Error);

/// A downlink message can not be serialized for publishing.
#[derive(Debug, thiserror::Error)]
#[error("can't marshal downlink message: {0}")]
pub struct EncodeError(#[from] pub serde_json::Error);

/// A DDR request with invalid coordinates.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid ddr request")]
    Fields,
    #[error("invalid latitude in ddr request: {0}")]
    Latitude(String),
    #[error("invalid longitude in ddr request: {0}")]
    Longitude(String),
}

/// Failures reaching the DDR service.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("could not parse ddr url: {0}")]
    Url(#[from] url::ParseError),
    #[error("could not call ddr api: {0}")]
    Request(#[source] reqwest::Error),
    #[error("ddr api returned status {0}")]
    Status(u16),
    #[error("could not decode ddr response: {0}")]
    Decode(#[source] reqwest::Error),
}

/// The DDR service answer can not be turned into a downlink.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum BuildError {
    #[error("datarate `{0}` is too short")]
    TooShort(String),
    #[error("datarate `{0}` has no numeric spreading factor")]
    NotNumeric(String),
    #[error("spreading factor {0} out of range")]
    OutOfRange(u32),
}

/// The uplink topic has no `up` suffix.
#[derive(Debug, PartialEq, thiserror::Error)]
#[error("invalid uplink topic: {0}")]
pub struct RouteError(pub String);

/// Transport failures while subscribing or publishing.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid broker URI: {0}")]
    Uri(String),
    #[error("MQTT connection error: {0}")]
    Connection(#[from] rumqttc::ConnectionError),
    #[error("MQTT client error: {0}")]
    Client(#[from] rumqttc::ClientError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
}
