//! Network server envelope codec.
//!
//! Envelopes are JSON objects whose raw byte fields are base64 strings.

use super::{
    DownlinkMessage, UplinkMessage,
    error::{DecodeError, EncodeError},
};

/// To decode a transport message body into an uplink message.
pub fn decode(body: &[u8]) -> Result<UplinkMessage, DecodeError> {
    Ok(serde_json::from_slice(body)?)
}

/// To encode a downlink message into a transport message body.
pub fn encode(msg: &DownlinkMessage) -> Result<Vec<u8>, EncodeError> {
    Ok(serde_json::to_vec(msg)?)
}

/// Serde adapter for byte fields carried as standard base64 strings. `null` decodes to empty.
pub mod base64_bytes {
    use base64::{Engine, engine::general_purpose::STANDARD};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(STANDARD.encode(bytes).as_str())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(vec![]),
            Some(s) => STANDARD.decode(s.as_bytes()).map_err(D::Error::custom),
        }
    }
}
