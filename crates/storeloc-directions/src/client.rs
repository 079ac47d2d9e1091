//! HTTP client for the Mapbox Directions v5 REST API.
//!
//! Wraps `reqwest` with access-token handling, typed response
//! deserialization and a classified error for every way a single
//! best-effort lookup can fail. No retries are attempted.

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, Url};

use crate::api::DirectionsApi;
use crate::error::DirectionsError;
use crate::types::{DirectionsRequest, DirectionsResponse, DirectionsRoute, ErrorBody};

const DEFAULT_BASE_URL: &str = "https://api.mapbox.com/";
const DEFAULT_USER_AGENT: &str = "storeloc/0.1 (store-locator-kit)";

/// Client for the Mapbox Directions API.
///
/// Use [`DirectionsClient::new`] for production or
/// [`DirectionsClient::with_base_url`] to point at a mock server in tests.
pub struct DirectionsClient {
    client: Client,
    access_token: String,
    base_url: Url,
    timeout: Duration,
}

impl std::fmt::Debug for DirectionsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectionsClient")
            .field("access_token", &"[redacted]")
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl DirectionsClient {
    /// Creates a new client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`DirectionsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(access_token: &str, timeout_secs: u64) -> Result<Self, DirectionsError> {
        Self::with_base_url(access_token, timeout_secs, DEFAULT_BASE_URL, DEFAULT_USER_AGENT)
    }

    /// Creates a new client with a custom base URL and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`DirectionsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`DirectionsError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        access_token: &str,
        timeout_secs: u64,
        base_url: &str,
        user_agent: &str,
    ) -> Result<Self, DirectionsError> {
        let timeout = Duration::from_secs(timeout_secs);
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10).min(timeout))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so `Url::join` appends rather than
        // replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| DirectionsError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            access_token: access_token.to_owned(),
            base_url,
            timeout,
        })
    }

    /// Fetches the first candidate route for `request`.
    ///
    /// # Errors
    ///
    /// - [`DirectionsError::Timeout`] if the request exceeds the client timeout.
    /// - [`DirectionsError::Http`] on any other network failure.
    /// - [`DirectionsError::UnexpectedStatus`] on a non-2xx status.
    /// - [`DirectionsError::Deserialize`] if the body does not match the
    ///   expected shape.
    /// - [`DirectionsError::Api`] if the service reports a non-`Ok` code.
    /// - [`DirectionsError::NoRoutes`] if the response has no routes.
    pub async fn fetch_route(
        &self,
        request: &DirectionsRequest,
    ) -> Result<DirectionsRoute, DirectionsError> {
        let url = self.build_url(request)?;
        tracing::debug!(
            profile = %request.profile,
            origin = %request.origin,
            destination = %request.destination,
            "requesting directions"
        );

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.classify_transport(e))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.classify_transport(e))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_string());
            return Err(DirectionsError::UnexpectedStatus {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: DirectionsResponse =
            serde_json::from_str(&body).map_err(|e| DirectionsError::Deserialize {
                context: format!("directions({})", request.profile),
                source: e,
            })?;

        Self::first_route(parsed)
    }

    /// Builds the request URL:
    /// `{base}directions/v5/{profile}/{lng},{lat};{lng},{lat}?access_token=…`.
    fn build_url(&self, request: &DirectionsRequest) -> Result<Url, DirectionsError> {
        let path = format!(
            "directions/v5/{}/{};{}",
            request.profile.as_mapbox_profile(),
            request.origin,
            request.destination
        );
        let mut url = self
            .base_url
            .join(&path)
            .map_err(|e| DirectionsError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        url.query_pairs_mut()
            .append_pair("access_token", &self.access_token)
            .append_pair("geometries", "geojson")
            .append_pair("overview", "full")
            .append_pair("alternatives", "false")
            .append_pair("steps", "false");
        Ok(url)
    }

    fn classify_transport(&self, err: reqwest::Error) -> DirectionsError {
        if err.is_timeout() {
            DirectionsError::Timeout {
                timeout_ms: u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
            }
        } else {
            DirectionsError::Http(err)
        }
    }

    /// Extracts the first candidate, treating `NoRoute` and an empty list
    /// as [`DirectionsError::NoRoutes`].
    fn first_route(response: DirectionsResponse) -> Result<DirectionsRoute, DirectionsError> {
        match response.code.as_str() {
            "Ok" => {}
            "NoRoute" => return Err(DirectionsError::NoRoutes),
            _ => {
                return Err(DirectionsError::Api {
                    message: response.message.unwrap_or_default(),
                    code: response.code,
                })
            }
        }

        response
            .routes
            .into_iter()
            .next()
            .map(DirectionsRoute::from)
            .ok_or(DirectionsError::NoRoutes)
    }
}

impl DirectionsApi for DirectionsClient {
    fn route(
        &self,
        request: &DirectionsRequest,
    ) -> impl Future<Output = Result<DirectionsRoute, DirectionsError>> + Send {
        self.fetch_route(request)
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
