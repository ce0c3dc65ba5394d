//! Typed client for the Finca booking API.
//!
//! Every call resolves to `Result<T, ClientError>`: server rejections come
//! back as [`ClientError::Api`] with the server's own message, so callers can
//! show it to the guest unchanged. Nothing is retried.

use std::env;
use std::time::Duration;
use reqwest::{Method, Response};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;
use finca_booking::{validate_booking_request, ValidationError};
use finca_domain::{
    BookingRequest, CancellationResponse, ConfirmedBooking, ErrorBody, NewBooking, Quote, StudioId, StudioUnit,
};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Defaults, with the base URL taken from `FINCA_API_URL` when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = env::var("FINCA_API_URL") {
            if !url.trim().is_empty() {
                config.base_url = url;
            }
        }
        config
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The form was rejected before anything was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The server answered with a non-2xx status.
    #[error("{message} (HTTP {status})")]
    Api { status: u16, message: String },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected response body: {0}")]
    Decode(String),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self::with_http_client(http, &config.base_url))
    }

    pub fn with_http_client(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ClientResult<T> {
        let url = self.url(path);
        debug!("{} {}", method, url);

        let mut request = self.http.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }
        decode(request.send().await?).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send::<(), T>(Method::GET, path, None).await
    }

    pub async fn get_studios(&self) -> ClientResult<Vec<StudioUnit>> {
        self.get("studios").await
    }

    pub async fn get_studio(&self, id: StudioId) -> ClientResult<StudioUnit> {
        self.get(&format!("studios/{}", id)).await
    }

    pub async fn get_bookings(&self) -> ClientResult<Vec<ConfirmedBooking>> {
        self.get("bookings").await
    }

    pub async fn get_booking(&self, id: &str) -> ClientResult<ConfirmedBooking> {
        self.get(&format!("bookings/{}", id)).await
    }

    pub async fn create_booking(&self, booking: &NewBooking) -> ClientResult<ConfirmedBooking> {
        self.send(Method::POST, "bookings", Some(booking)).await
    }

    /// Check the form locally, then submit it with the locally computed price.
    pub async fn submit_booking(&self, request: &BookingRequest, studio: &StudioUnit) -> ClientResult<ConfirmedBooking> {
        let validated = validate_booking_request(request, studio)?;
        let body = NewBooking::from_request(request, validated.total_price);
        self.create_booking(&body).await
    }

    pub async fn cancel_booking(&self, id: &str) -> ClientResult<CancellationResponse> {
        self.send::<(), _>(Method::DELETE, &format!("bookings/{}", id), None).await
    }

    pub async fn quote(&self, request: &BookingRequest) -> ClientResult<Quote> {
        self.send(Method::POST, "quotes", Some(request)).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let status = response.status();
    let bytes = response.bytes().await?;

    if !status.is_success() {
        let message = serde_json::from_slice::<ErrorBody>(&bytes)
            .map(|body| body.error)
            .unwrap_or_else(|_| String::from_utf8_lossy(&bytes).into_owned());
        return Err(ClientError::Api {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let client = ApiClient::with_http_client(reqwest::Client::new(), "http://localhost:3000/api/");
        assert_eq!(client.base_url(), "http://localhost:3000/api");
        assert_eq!(client.url("studios"), "http://localhost:3000/api/studios");
        assert_eq!(client.url("/bookings/1"), "http://localhost:3000/api/bookings/1");
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_config_from_env() {
        env::set_var("FINCA_API_URL", "   ");
        assert_eq!(ClientConfig::from_env().base_url, DEFAULT_BASE_URL);

        env::set_var("FINCA_API_URL", "https://finca.example/api");
        let config = ClientConfig::from_env();
        env::remove_var("FINCA_API_URL");

        assert_eq!(config.base_url, "https://finca.example/api");
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(ClientConfig::from_env().base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_new_client() {
        let client = ApiClient::new(ClientConfig {
            base_url: "https://finca.example/api/".to_string(),
            ..ClientConfig::default()
        })
        .unwrap();
        assert_eq!(client.base_url(), "https://finca.example/api");
    }

    #[test]
    fn test_error_status() {
        let err = ClientError::Api { status: 404, message: "Booking not found".to_string() };
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Booking not found (HTTP 404)");

        let err = ClientError::from(ValidationError::MissingFields);
        assert_eq!(err.status(), None);
        assert_eq!(err.to_string(), "Please fill in all fields");
    }
}
