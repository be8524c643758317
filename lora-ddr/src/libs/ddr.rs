//! DDR micro-protocol carried in LoRa payloads.
//!
//! DDR communication always uses port 1.
//! - Uplink: `DDR|<lat>|<lon>`, for example `DDR|50.863978|4.678908`.
//! - Downlink: `DDR|<sf>`, for example `DDR|7`.

use super::{Coordinates, DownlinkMessage, error::BuildError, error::ParseError};

pub const DDR_HEADER: &'static str = "DDR";
pub const SEPARATOR: char = '|';
pub const DDR_PORT: u8 = 1;

/// Supported LoRa spreading factors.
pub const SF_MIN: u32 = 7;
pub const SF_MAX: u32 = 12;

/// Characters around the spreading factor in a DDR service data rate such as `SF7BW125`.
const DATARATE_HEAD_LEN: usize = 2;
const DATARATE_TAIL_LEN: usize = 5;

/// Data rate answer of the DDR service.
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct DdrResponse {
    pub datarate: String,
}

/// To check if the payload looks like a DDR request.
///
/// Other uplink data share the same topic so a `false` result is not an error.
pub fn is_ddr_request(payload: &[u8]) -> bool {
    match std::str::from_utf8(payload) {
        Err(_) => false,
        Ok(text) => text.starts_with(DDR_HEADER) && text.matches(SEPARATOR).count() == 2,
    }
}

/// To get the coordinates from a DDR request.
///
/// The header field is not validated. Call [`is_ddr_request`] first.
pub fn parse_coordinates(payload: &[u8]) -> Result<Coordinates, ParseError> {
    let text = match std::str::from_utf8(payload) {
        Err(_) => return Err(ParseError::Fields),
        Ok(text) => text,
    };
    let fields: Vec<&str> = text.split(SEPARATOR).collect();
    if fields.len() != 3 {
        return Err(ParseError::Fields);
    }

    let latitude = match parse_degrees(fields[1]) {
        None => return Err(ParseError::Latitude(fields[1].to_string())),
        Some(v) => v,
    };
    let longitude = match parse_degrees(fields[2]) {
        None => return Err(ParseError::Longitude(fields[2].to_string())),
        Some(v) => v,
    };
    Ok(Coordinates {
        latitude,
        longitude,
    })
}

fn parse_degrees(field: &str) -> Option<f64> {
    match field.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => None,
    }
}

/// To build the DDR downlink for the DDR service answer.
///
/// The spreading factor is the part of the data rate between the 2-character head and the
/// 5-character tail, and must be a number within [`SF_MIN`]..=[`SF_MAX`].
pub fn build_downlink(response: &DdrResponse) -> Result<DownlinkMessage, BuildError> {
    let datarate = response.datarate.as_str();
    if datarate.len() < DATARATE_HEAD_LEN + DATARATE_TAIL_LEN + 1 {
        return Err(BuildError::TooShort(datarate.to_string()));
    }
    let sf = match datarate.get(DATARATE_HEAD_LEN..datarate.len() - DATARATE_TAIL_LEN) {
        None => return Err(BuildError::NotNumeric(datarate.to_string())),
        Some(sf) => match sf.bytes().all(|b| b.is_ascii_digit()) {
            false => return Err(BuildError::NotNumeric(datarate.to_string())),
            true => match sf.parse::<u32>() {
                Err(_) => return Err(BuildError::NotNumeric(datarate.to_string())),
                Ok(sf) => sf,
            },
        },
    };
    if !(SF_MIN..=SF_MAX).contains(&sf) {
        return Err(BuildError::OutOfRange(sf));
    }

    Ok(DownlinkMessage {
        port: DDR_PORT,
        confirmed: true,
        payload: format!("{}{}{}", DDR_HEADER, SEPARATOR, sf).into_bytes(),
    })
}
