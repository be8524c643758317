//! Downlink topic routing.

use super::error::RouteError;

pub const UPLINK_SUFFIX: &'static str = "up";
pub const DOWNLINK_SUFFIX: &'static str = "down";

/// To get the downlink topic by replacing the `up` suffix of the uplink topic with `down`.
pub fn downlink_topic(uplink_topic: &str) -> Result<String, RouteError> {
    match uplink_topic.strip_suffix(UPLINK_SUFFIX) {
        None => Err(RouteError(uplink_topic.to_string())),
        Some(prefix) => Ok(format!("{}{}", prefix, DOWNLINK_SUFFIX)),
    }
}
