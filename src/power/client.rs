//! HTTP client for the NASA POWER daily point endpoint.

use crate::config::ProviderConfig;
use crate::power::error::FetchError;
use crate::power::response::decode_series;
use crate::power::series::SeriesSet;
use crate::power::source::{SeriesRequest, SeriesSource};
use log::{info, warn};
use reqwest::{Client, Request};

/// Fetches daily series from NASA POWER with a single GET per request.
///
/// The timeout from [`ProviderConfig`] bounds the whole exchange. Nothing is retried or cached.
#[derive(Debug, Clone)]
pub struct PowerClient {
    http: Client,
    base_url: String,
    community: String,
}

impl PowerClient {
    pub fn new(config: &ProviderConfig) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(FetchError::ClientBuild)?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            community: config.community.clone(),
        })
    }

    /// Builds the GET request for `request` without sending it.
    pub fn build_request(&self, request: &SeriesRequest) -> Result<Request, FetchError> {
        self.http
            .get(&self.base_url)
            .query(&[
                ("parameters", request.parameter_codes()),
                ("community", self.community.clone()),
                ("longitude", request.location.longitude.to_string()),
                ("latitude", request.location.latitude.to_string()),
                ("start", request.years.start_key()),
                ("end", request.years.end_key()),
                ("format", "JSON".to_string()),
            ])
            .build()
            .map_err(|e| FetchError::NetworkRequest(self.base_url.clone(), e))
    }

    async fn download(&self, request: Request) -> Result<Vec<u8>, FetchError> {
        let url = request.url().to_string();
        info!("Making request to: {}", url);

        let response = self.http.execute(request).await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(url.clone(), e)
            } else {
                FetchError::NetworkRequest(url.clone(), e)
            }
        })?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(match e.status() {
                    Some(status) => FetchError::HttpStatus {
                        url,
                        status,
                        source: e,
                    },
                    None => FetchError::NetworkRequest(url, e),
                });
            }
        };

        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(url.clone(), e)
            } else {
                FetchError::NetworkRequest(url.clone(), e)
            }
        })?;
        info!("Downloaded {} bytes from {}", body.len(), url);
        Ok(body.to_vec())
    }
}

impl SeriesSource for PowerClient {
    async fn fetch_series(&self, request: &SeriesRequest) -> Result<SeriesSet, FetchError> {
        let http_request = self.build_request(request)?;
        let url = http_request.url().to_string();
        let body = self.download(http_request).await?;
        decode_series(&body).map_err(|e| FetchError::JsonParse(url, e))
    }
}
