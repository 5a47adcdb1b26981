//! Request executor for the Energinet Data Service API.
//!
//! Every tool goes through [`EnergiClient::get`], which performs exactly one
//! GET request and resolves the outcome into a typed payload or an
//! [`ApiError`]. Nothing here retries.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use super::format::display_value;
use super::query::QueryParams;
use crate::core::config::ApiConfig;

/// Result of a single API call.
pub type ApiResult<T> = Result<T, ApiError>;

/// Failure of a single API call, rendered as the text shown to the caller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The API answered with a non-2xx status.
    #[error("HTTP error {status}: {body}")]
    Http { status: u16, body: String },

    /// The request never got a response (DNS, refused connection, timeout).
    #[error("Request failed: {0}")]
    Request(String),

    /// Anything else: bad URL, undecodable body, body of the wrong shape.
    #[error("Unexpected error: {0}")]
    Unexpected(String),

    /// The API returned a body carrying an `error` message.
    #[error("{0}")]
    Upstream(String),
}

/// Async client for the Energinet Data Service.
///
/// Cheap to clone: clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct EnergiClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl EnergiClient {
    /// Build a client from the API configuration.
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| ApiError::Unexpected(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// The base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for an endpoint path such as `meta/dataset`.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    /// GET `{base_url}/{endpoint}` and decode the body into `T`.
    pub async fn get<T>(&self, endpoint: &str, params: Option<&QueryParams>) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint_url(endpoint);
        match params {
            Some(p) => debug!("GET {}?{}", url, p.to_query_string()),
            None => debug!("GET {}", url),
        }

        let result = self.send(&url, params).await;
        if let Err(e) = &result {
            warn!("Request to {} failed: {}", url, e);
        }
        result
    }

    async fn send<T>(&self, url: &str, params: Option<&QueryParams>) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        let mut request = self.http.get(url);
        if let Some(params) = params {
            request = request.query(params);
        }

        let response = request.send().await.map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ApiError::Unexpected(format!("invalid JSON body: {e}")))?;

        decode_body(body)
    }

    fn classify(&self, error: reqwest::Error) -> ApiError {
        if error.is_builder() {
            ApiError::Unexpected(error.to_string())
        } else if error.is_timeout() {
            ApiError::Request(format!(
                "timed out after {}s ({})",
                self.timeout.as_secs(),
                error
            ))
        } else if error.is_connect() {
            ApiError::Request(format!("connection failed ({error})"))
        } else {
            ApiError::Request(error.to_string())
        }
    }
}

/// Resolve a decoded JSON body into the expected payload.
///
/// A top-level `error` key wins over any payload shape.
pub fn decode_body<T>(body: Value) -> ApiResult<T>
where
    T: DeserializeOwned,
{
    if let Some(message) = body.get("error") {
        return Err(ApiError::Upstream(display_value(message)));
    }

    serde_json::from_value(body)
        .map_err(|e| ApiError::Unexpected(format!("unexpected response shape: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::energi::models::{DatasetList, DatasetRecords};
    use serde_json::json;

    fn config(base_url: &str) -> ApiConfig {
        ApiConfig {
            base_url: base_url.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_endpoint_url_joins_with_single_slash() {
        let client = EnergiClient::new(&config("https://api.example.test/")).unwrap();
        assert_eq!(client.base_url(), "https://api.example.test");
        assert_eq!(
            client.endpoint_url("meta/dataset"),
            "https://api.example.test/meta/dataset"
        );
        assert_eq!(
            client.endpoint_url("/dataset/CO2Emis"),
            "https://api.example.test/dataset/CO2Emis"
        );
    }

    #[test]
    fn test_decode_body_error_key() {
        let result: ApiResult<DatasetRecords> = decode_body(json!({"error": "boom"}));
        let err = result.unwrap_err();
        assert_eq!(err, ApiError::Upstream("boom".to_string()));
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn test_decode_body_success() {
        let records: DatasetRecords =
            decode_body(json!({"total": 2, "records": [{"a": 1}, {"a": 2}]})).unwrap();
        assert_eq!(records.total, 2);
        assert_eq!(records.records.len(), 2);
    }

    #[test]
    fn test_decode_body_wrong_shape() {
        let result: ApiResult<DatasetList> = decode_body(json!({"result": "not a list"}));
        assert!(matches!(result, Err(ApiError::Unexpected(_))));
    }

    #[test]
    fn test_error_messages() {
        let err = ApiError::Http {
            status: 404,
            body: "Not Found".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP error 404: Not Found");
        assert_eq!(
            ApiError::Request("connection failed".to_string()).to_string(),
            "Request failed: connection failed"
        );
        assert_eq!(
            ApiError::Unexpected("bad".to_string()).to_string(),
            "Unexpected error: bad"
        );
    }
}
