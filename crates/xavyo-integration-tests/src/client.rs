//! HTTP client for the connector admin API (reqwest-based).
//!
//! Every operation returns the raw [`ApiResponse`]: non-2xx statuses are not
//! turned into errors here, so the calling test decides what it expected.
//! Only transport failures come back as `Err`.

use crate::auth::AdminAuth;
use crate::config::HarnessConfig;
use crate::error::{HarnessError, HarnessResult};
use crate::models::{ConnectorConfig, SetConnectorEnabledRequest, UpdateConnectorConfigRequest};
use crate::response::ApiResponse;
use reqwest::{Client, RequestBuilder, Url};
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Authenticated client for the connector admin endpoints.
#[derive(Debug, Clone)]
pub struct AdminApiClient {
    /// Admin API base URL (e.g. `http://localhost:3001/api`).
    api_url: String,
    auth: AdminAuth,
    http_client: Client,
}

impl AdminApiClient {
    /// Create a client from environment configuration.
    pub fn from_env() -> HarnessResult<Self> {
        Self::new(HarnessConfig::from_env()?)
    }

    /// Create a new client.
    pub fn new(config: HarnessConfig) -> HarnessResult<Self> {
        let mut builder = Client::builder().user_agent(concat!(
            "xavyo-integration-tests/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build().map_err(|e| {
            HarnessError::InvalidConfig(format!("Failed to build HTTP client: {e}"))
        })?;

        Ok(Self::with_http_client(config.api_url, config.auth, http_client))
    }

    /// Create a client with a pre-built `reqwest::Client` (for testing).
    #[must_use]
    pub fn with_http_client(
        api_url: impl Into<String>,
        auth: AdminAuth,
        http_client: Client,
    ) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self {
            api_url,
            auth,
            http_client,
        }
    }

    /// Get the base URL.
    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    #[must_use]
    pub fn auth(&self) -> &AdminAuth {
        &self.auth
    }

    // ── Connector Operations ──────────────────────────────────────────

    /// List all connectors (GET /connectors).
    pub async fn list_connectors(&self) -> HarnessResult<ApiResponse> {
        let url = self.endpoint(&["connectors"])?;
        self.send(self.http_client.get(url)).await
    }

    /// Get a single connector (GET /connectors/:id).
    pub async fn get_connector_details(&self, id: &str) -> HarnessResult<ApiResponse> {
        let url = self.endpoint(&["connectors", id])?;
        self.send(self.http_client.get(url)).await
    }

    /// Replace a connector's config wholesale (PATCH /connectors/:id).
    pub async fn update_connector_config(
        &self,
        id: &str,
        config: &ConnectorConfig,
    ) -> HarnessResult<ApiResponse> {
        let url = self.endpoint(&["connectors", id])?;
        self.patch(url, &UpdateConnectorConfigRequest { config }).await
    }

    /// Enable a connector (PATCH /connectors/:id/enabled).
    ///
    /// For SMS and Email connectors the server disables whichever connector
    /// of the same category was enabled before.
    pub async fn enable_connector(&self, id: &str) -> HarnessResult<ApiResponse> {
        self.set_connector_enabled(id, true).await
    }

    /// Disable a connector (PATCH /connectors/:id/enabled).
    pub async fn disable_connector(&self, id: &str) -> HarnessResult<ApiResponse> {
        self.set_connector_enabled(id, false).await
    }

    /// Soft-delete a connector.
    ///
    /// Connector records are seeded by the server and never removed, so this
    /// only disables the connector; the record stays listed.
    pub async fn delete_connector(&self, id: &str) -> HarnessResult<ApiResponse> {
        debug!(connector_id = id, "soft-deleting connector");
        self.set_connector_enabled(id, false).await
    }

    /// Toggle the `enabled` flag of a connector.
    pub async fn set_connector_enabled(
        &self,
        id: &str,
        enabled: bool,
    ) -> HarnessResult<ApiResponse> {
        let url = self.endpoint(&["connectors", id, "enabled"])?;
        self.patch(url, &SetConnectorEnabledRequest { enabled }).await
    }

    // ── Internal HTTP Methods ─────────────────────────────────────────

    /// Build an endpoint URL; each segment is percent-encoded on its own.
    fn endpoint(&self, segments: &[&str]) -> HarnessResult<Url> {
        let mut url = Url::parse(&self.api_url).map_err(|e| {
            HarnessError::InvalidConfig(format!("Invalid API URL '{}': {e}", self.api_url))
        })?;
        url.path_segments_mut()
            .map_err(|()| {
                HarnessError::InvalidConfig(format!("API URL cannot be a base: {}", self.api_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn patch<B: Serialize>(&self, url: Url, body: &B) -> HarnessResult<ApiResponse> {
        self.send(self.http_client.patch(url).json(body)).await
    }

    async fn send(&self, builder: RequestBuilder) -> HarnessResult<ApiResponse> {
        let request = self.auth.apply(builder).build()?;
        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, auth = self.auth.mode(), "admin API request");

        let started = Instant::now();
        let response = self.http_client.execute(request).await?;
        let status = response.status();
        let body = response.text().await?;
        let elapsed_ms = elapsed_millis(started.elapsed());

        if status.is_success() {
            debug!(%method, %url, status = status.as_u16(), elapsed_ms, "admin API response");
        } else {
            warn!(
                %method,
                %url,
                status = status.as_u16(),
                elapsed_ms,
                "admin API returned non-success status"
            );
        }

        Ok(ApiResponse::new(status, body))
    }
}

/// Whole milliseconds, saturating at `u64::MAX`.
fn elapsed_millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}
