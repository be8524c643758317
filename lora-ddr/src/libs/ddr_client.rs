//! HTTP client of the DDR decision service.

use url::Url;

use super::{Coordinates, ddr::DdrResponse, error::LookupError};

/// Queries the DDR service with `GET <url>?lat=<lat>&lon=<lon>`.
#[derive(Clone)]
pub struct DdrClient {
    client: reqwest::Client,
    url: Url,
}

impl DdrClient {
    /// Create a client for the DDR service base URL.
    ///
    /// The URL is checked here so that a bad configuration fails at startup.
    pub fn new(url: &str) -> Result<Self, LookupError> {
        Ok(DdrClient {
            client: reqwest::Client::new(),
            url: Url::parse(url)?,
        })
    }

    /// To build the request URL for the coordinates. Degrees use 6 fractional digits.
    pub fn request_url(&self, coordinates: &Coordinates) -> Url {
        let mut url = self.url.clone();
        url.query_pairs_mut()
            .append_pair("lat", format!("{:.6}", coordinates.latitude).as_str())
            .append_pair("lon", format!("{:.6}", coordinates.longitude).as_str());
        url
    }

    /// To ask the DDR service for the data rate of the location.
    ///
    /// A non-2xx status is reported as [`LookupError::Status`] and its body is not decoded.
    /// The response body is consumed or dropped on every path so the connection is released.
    pub async fn lookup(&self, coordinates: &Coordinates) -> Result<DdrResponse, LookupError> {
        let url = self.request_url(coordinates);
        let resp = match self.client.get(url).send().await {
            Err(e) => return Err(LookupError::Request(e)),
            Ok(resp) => resp,
        };
        if !resp.status().is_success() {
            return Err(LookupError::Status(resp.status().as_u16()));
        }
        match resp.json::<DdrResponse>().await {
            Err(e) => Err(LookupError::Decode(e)),
            Ok(body) => Ok(body),
        }
    }
}
