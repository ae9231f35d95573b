//! Composed flows shared by the connector suites.

use crate::assertions::{expect_config, expect_enabled, filter_by_type};
use crate::client::AdminApiClient;
use crate::error::HarnessResult;
use crate::models::{Connector, ConnectorConfig, ConnectorType};
use tracing::info;

/// Seeded connector ids the suites exercise.
pub mod well_known {
    pub const FACEBOOK: &str = "facebook-universal";
    pub const GITHUB: &str = "github-universal";
    pub const GOOGLE: &str = "google-universal";
    pub const TWILIO_SMS: &str = "twilio-short-message-service";
    pub const ALIYUN_SMS: &str = "aliyun-short-message-service";
    pub const ALIYUN_EMAIL: &str = "aliyun-direct-mail";
    pub const SENDGRID_EMAIL: &str = "sendgrid-email-service";
}

/// Write `config` to a connector, then enable it.
///
/// Asserts the returned config after the update and `enabled=true` after
/// enabling; returns the record from the enable call.
pub async fn set_up_connector(
    client: &AdminApiClient,
    id: &str,
    config: &ConnectorConfig,
) -> HarnessResult<Connector> {
    let updated = client.update_connector_config(id, config).await?.connector()?;
    expect_config(&updated, config)?;

    let enabled = client.enable_connector(id).await?.connector()?;
    expect_enabled(&enabled, true)?;

    info!(connector_id = id, connector_type = %enabled.connector_type, "connector set up");
    Ok(enabled)
}

/// List connectors (expecting 200) and keep only those of `category`.
pub async fn list_connectors_of_type(
    client: &AdminApiClient,
    category: ConnectorType,
) -> HarnessResult<Vec<Connector>> {
    let connectors = client.list_connectors().await?.connectors()?;
    Ok(filter_by_type(&connectors, category)
        .into_iter()
        .cloned()
        .collect())
}
