//! Connector records returned by the admin API.

use serde::{Deserialize, Serialize};

/// Connector config: a JSON object whose schema depends on the connector.
pub type ConnectorConfig = serde_json::Map<String, serde_json::Value>;

/// Functional category of a connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConnectorType {
    Social,
    #[serde(rename = "SMS")]
    Sms,
    Email,
}

impl ConnectorType {
    /// Whether at most one connector of this category may be enabled at a time.
    pub fn is_exclusive(self) -> bool {
        matches!(self, ConnectorType::Sms | ConnectorType::Email)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ConnectorType::Social => "Social",
            ConnectorType::Sms => "SMS",
            ConnectorType::Email => "Email",
        }
    }
}

impl std::fmt::Display for ConnectorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Connector record as the admin API returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connector {
    pub id: String,
    #[serde(rename = "type")]
    pub connector_type: ConnectorType,
    pub enabled: bool,
    #[serde(default)]
    pub config: ConnectorConfig,
    /// Display metadata; carried through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
}

/// Body of `PATCH connectors/{id}`.
#[derive(Debug, Serialize)]
pub struct UpdateConnectorConfigRequest<'a> {
    pub config: &'a ConnectorConfig,
}

/// Body of `PATCH connectors/{id}/enabled`.
#[derive(Debug, Serialize)]
pub struct SetConnectorEnabledRequest {
    pub enabled: bool,
}
