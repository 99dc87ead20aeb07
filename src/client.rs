use crate::error::ApiError;
use crate::models::{DateRangeFilter, ReportConfiguration, UpdatePayload, parse_report_configurations};
use log::{debug, error, info};
use reqwest::Client as HttpClient;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use std::time::Duration;

const API_HOST: &str = "cloudone.trendmicro.com";

/// Region used when none is configured.
pub const DEFAULT_REGION: &str = "us-1";

/// Authenticated client for the Conformity report-configurations endpoint.
///
/// Every request carries the JSON:API content type, the `api-version`
/// header and an `ApiKey` authorization header. Calls are strictly
/// sequential and never retried.
#[derive(Debug, Clone)]
pub struct Client {
    http: HttpClient,
    base_url: String,
    authorization: String,
}

impl Client {
    /// Create a client for the default region.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ApiError> {
        Self::for_region(api_key, DEFAULT_REGION)
    }

    /// Create a client for a specific Cloud One region, e.g. `us-1`.
    pub fn for_region(api_key: impl Into<String>, region: &str) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert("api-version", HeaderValue::from_static("v1"));
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/vnd.api+json"),
        );

        let http = HttpClient::builder()
            .timeout(Duration::from_secs(10))
            .default_headers(headers)
            .build()?;

        let base_url = format!("https://conformity.{}.{}/api/report-configs", region, API_HOST);
        info!("Initialized Conformity client for region {}", region);
        Ok(Self {
            http,
            base_url,
            authorization: format!("ApiKey {}", api_key.into()),
        })
    }

    /// Override the base URL (useful for tests or proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        info!("Updated Conformity base URL to {}", self.base_url);
        self
    }

    /// Fetch all report configurations.
    ///
    /// Aside from transport failures this returns [`ApiError::Http`] for any
    /// non-2xx status with the response body preserved, or
    /// [`ApiError::InvalidJson`] when the body does not decode.
    pub async fn list_report_configurations(&self) -> Result<Vec<ReportConfiguration>, ApiError> {
        debug!("GET request to {}", self.base_url);
        let response = self
            .http
            .get(&self.base_url)
            .header(AUTHORIZATION, &self.authorization)
            .send()
            .await
            .inspect_err(|e| error!("Request to the API failed: {}", e))?;

        let status = response.status();
        debug!("Received status {}", status);
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(
                "HTTP Error {} when fetching report configurations. Response: {}",
                status, body
            );
            return Err(ApiError::Http { status, body });
        }

        let body = response
            .text()
            .await
            .inspect_err(|e| error!("Request to the API failed: {}", e))?;
        parse_report_configurations(&body)
            .inspect_err(|_| error!("Failed to decode the response as JSON."))
    }

    /// Replace the date filter of a single report configuration.
    ///
    /// The PATCH body overwrites the `configuration` object wholesale, so
    /// the current title must be echoed back alongside the new filter. On a
    /// non-2xx status the response headers are logged as well, since they
    /// carry the rate-limit and auth diagnostics.
    pub async fn update_report_configuration(
        &self,
        id: &str,
        title: &str,
        filter: DateRangeFilter,
    ) -> Result<(), ApiError> {
        let url = format!("{}/{}", self.base_url, id);
        let payload = UpdatePayload::new(title, filter);
        let body = serde_json::to_string(&payload).map_err(|_| ApiError::InvalidJson)?;

        info!(
            "Updating report configuration {} with filter ({}, {}) days",
            id, filter.newer_than_days, filter.older_than_days
        );
        let response = self
            .http
            .patch(&url)
            .header(AUTHORIZATION, &self.authorization)
            .body(body)
            .send()
            .await
            .inspect_err(|e| error!("Request to update the report configuration failed: {}", e))?;

        let status = response.status();
        debug!("Received status {}", status);
        if !status.is_success() {
            let headers = response.headers().clone();
            let body = response.text().await.unwrap_or_default();
            error!(
                "HTTP Error {} when updating report configuration ID {}. Response: {}. Headers: {:?}",
                status, id, body, headers
            );
            return Err(ApiError::Http { status, body });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> Client {
        Client::new("test-key")
            .expect("client should build")
            .with_base_url(server.uri())
    }

    #[tokio::test]
    async fn lists_configurations_with_auth_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .and(header("api-version", "v1"))
            .and(header("Content-Type", "application/vnd.api+json"))
            .and(header("Authorization", "ApiKey test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [
                    { "id": "r-1", "attributes": { "configuration": { "title": "Weekly" } } },
                    { "id": "r-2", "attributes": { "configuration": { "title": "Monthly" } } }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let configs = client_for(&server)
            .list_report_configurations()
            .await
            .expect("list should succeed");
        assert_eq!(configs.len(), 2);
        assert_eq!(configs[0].id, "r-1");
        assert_eq!(configs[1].title, "Monthly");
    }

    #[tokio::test]
    async fn list_surfaces_http_error_with_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .list_report_configurations()
            .await
            .unwrap_err();
        match err {
            ApiError::Http { status, body } => {
                assert_eq!(status.as_u16(), 403);
                assert_eq!(body, "forbidden");
            }
            other => panic!("expected Http error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn list_rejects_non_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .list_report_configurations()
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidJson));
    }

    #[tokio::test]
    async fn update_patches_configuration_wholesale() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/r-1"))
            .and(header("Authorization", "ApiKey test-key"))
            .and(body_json(json!({
                "data": {
                    "attributes": {
                        "configuration": {
                            "title": "Weekly Audit",
                            "filter": { "newerThanDays": 14, "olderThanDays": 5 }
                        }
                    }
                }
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server)
            .update_report_configuration(
                "r-1",
                "Weekly Audit",
                DateRangeFilter {
                    newer_than_days: 14,
                    older_than_days: 5,
                },
            )
            .await
            .expect("update should succeed");
    }

    #[tokio::test]
    async fn update_surfaces_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .update_report_configuration(
                "r-1",
                "Weekly Audit",
                DateRangeFilter {
                    newer_than_days: 14,
                    older_than_days: 5,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Http { status, .. } if status.as_u16() == 500));
    }
}
