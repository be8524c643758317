//! Implements the DDR handler for uplink data from the broker.
//!
//! Every message runs through these steps and stops at the first failure:
//! 1. Decode the uplink envelope.
//! 2. Check if the uplink payload is a DDR request. Other payloads are ignored.
//! 3. Parse the coordinates.
//! 4. Query the DDR service.
//! 5. Build the downlink.
//! 6. Route the downlink topic.
//! 7. Publish the downlink.

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info, warn};

use super::{
    ddr::{self, DdrResponse},
    ddr_client::DdrClient,
    envelope,
    mqtt::{MessageHandler, Publisher},
    topic,
};

pub struct Options {
    pub publisher: Arc<dyn Publisher>,
    pub ddr_client: DdrClient,
    /// Publish to an empty topic when the uplink topic has no `up` suffix.
    pub publish_on_route_error: bool,
}

/// Result of handling one uplink message.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Outcome {
    /// Not a DDR request.
    Ignored,
    /// A DDR request that failed at some step.
    Dropped,
    /// The downlink was handed to the transport.
    Published,
}

pub struct DdrHandler {
    publisher: Arc<dyn Publisher>,
    ddr_client: DdrClient,
    publish_on_route_error: bool,
}

impl DdrHandler {
    pub fn new(opts: Options) -> Self {
        DdrHandler {
            publisher: opts.publisher,
            ddr_client: opts.ddr_client,
            publish_on_route_error: opts.publish_on_route_error,
        }
    }

    /// To handle one transport message.
    pub async fn handle(&self, uplink_topic: &str, body: &[u8]) -> Outcome {
        const FN_NAME: &'static str = "DdrHandler::handle";

        let uplink = match envelope::decode(body) {
            Err(e) => {
                warn!(
                    "[{}] {}, topic: {}, payload: {}",
                    FN_NAME,
                    e,
                    uplink_topic,
                    hex::encode(body)
                );
                return Outcome::Dropped;
            }
            Ok(uplink) => uplink,
        };

        if !ddr::is_ddr_request(uplink.payload.as_slice()) {
            debug!(
                "[{}] received message other than ddr request, topic: {}, uplink: {:?}",
                FN_NAME, uplink_topic, uplink
            );
            return Outcome::Ignored;
        }

        let coordinates = match ddr::parse_coordinates(uplink.payload.as_slice()) {
            Err(e) => {
                warn!(
                    "[{}] can't retrieve coordinates from ddr request: {}, topic: {}, payload: {}",
                    FN_NAME,
                    e,
                    uplink_topic,
                    hex::encode(&uplink.payload)
                );
                return Outcome::Dropped;
            }
            Ok(coordinates) => coordinates,
        };

        let response: DdrResponse = match self.ddr_client.lookup(&coordinates).await {
            Err(e) => {
                warn!(
                    "[{}] ddr request failed: {}, coordinates: {:?}",
                    FN_NAME, e, coordinates
                );
                return Outcome::Dropped;
            }
            Ok(response) => response,
        };

        let downlink = match ddr::build_downlink(&response) {
            Err(e) => {
                warn!(
                    "[{}] could not generate downlink message: {}, response: {:?}",
                    FN_NAME, e, response
                );
                return Outcome::Dropped;
            }
            Ok(downlink) => downlink,
        };

        let downlink_topic = match topic::downlink_topic(uplink_topic) {
            Err(e) => {
                warn!("[{}] could not generate downlink topic: {}", FN_NAME, e);
                if !self.publish_on_route_error {
                    return Outcome::Dropped;
                }
                String::new()
            }
            Ok(topic) => topic,
        };

        debug!(
            "[{}] set ddr, topic: {}, downlink: {:?}",
            FN_NAME, downlink_topic, downlink
        );
        if let Err(e) = self
            .publisher
            .publish(downlink_topic.as_str(), &downlink)
            .await
        {
            warn!(
                "[{}] publish downlink to {} error: {}",
                FN_NAME, downlink_topic, e
            );
            return Outcome::Dropped;
        }
        info!(
            "[{}] set data rate {} for {}",
            FN_NAME,
            String::from_utf8_lossy(&downlink.payload),
            match uplink.dev_id.as_ref() {
                None => uplink_topic,
                Some(dev_id) => dev_id.as_str(),
            }
        );
        Outcome::Published
    }
}

#[async_trait]
impl MessageHandler for DdrHandler {
    async fn on_message(&self, topic: &str, payload: &[u8]) {
        let _ = self.handle(topic, payload).await;
    }
}
