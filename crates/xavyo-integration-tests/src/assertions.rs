//! Field-level expectations on connector records.
//!
//! Each check returns `HarnessResult` so a failing expectation carries the
//! offending record to the test, which unwraps it into a test failure.

use crate::error::{HarnessError, HarnessResult};
use crate::models::{Connector, ConnectorConfig, ConnectorType};

/// Expect the connector's `enabled` flag to equal `expected`.
pub fn expect_enabled(connector: &Connector, expected: bool) -> HarnessResult<()> {
    if connector.enabled == expected {
        Ok(())
    } else {
        Err(HarnessError::Assertion(format!(
            "connector '{}' has enabled={}, expected enabled={expected}",
            connector.id, connector.enabled
        )))
    }
}

/// Expect the connector to be the one named `expected`.
pub fn expect_id(connector: &Connector, expected: &str) -> HarnessResult<()> {
    if connector.id == expected {
        Ok(())
    } else {
        Err(HarnessError::Assertion(format!(
            "expected connector '{expected}', got '{}'",
            connector.id
        )))
    }
}

/// Expect the connector's config to equal `expected` exactly.
pub fn expect_config(connector: &Connector, expected: &ConnectorConfig) -> HarnessResult<()> {
    if &connector.config == expected {
        Ok(())
    } else {
        Err(HarnessError::Assertion(format!(
            "connector '{}' config mismatch: expected {}, got {}",
            connector.id,
            serde_json::Value::Object(expected.clone()),
            serde_json::Value::Object(connector.config.clone()),
        )))
    }
}

/// Expect every connector to be in its seeded state: disabled with `{}` config.
pub fn expect_pristine(connectors: &[Connector]) -> HarnessResult<()> {
    let empty = ConnectorConfig::new();
    for connector in connectors {
        expect_enabled(connector, false)?;
        expect_config(connector, &empty)?;
    }
    Ok(())
}

/// Connectors of one category, in server order.
pub fn filter_by_type(connectors: &[Connector], category: ConnectorType) -> Vec<&Connector> {
    connectors
        .iter()
        .filter(|c| c.connector_type == category)
        .collect()
}

/// Expect exactly one enabled connector in `category` and return it.
pub fn expect_single_enabled(
    connectors: &[Connector],
    category: ConnectorType,
) -> HarnessResult<&Connector> {
    let enabled: Vec<&Connector> = filter_by_type(connectors, category)
        .into_iter()
        .filter(|c| c.enabled)
        .collect();

    match enabled.as_slice() {
        [single] => Ok(*single),
        [] => Err(HarnessError::Assertion(format!(
            "no enabled {category} connector"
        ))),
        many => Err(HarnessError::Assertion(format!(
            "expected one enabled {category} connector, found {}: {}",
            many.len(),
            ids(many)
        ))),
    }
}

/// Expect at most one enabled connector per exclusive category.
pub fn expect_category_exclusivity(connectors: &[Connector]) -> HarnessResult<()> {
    for category in [ConnectorType::Sms, ConnectorType::Email] {
        let enabled: Vec<&Connector> = filter_by_type(connectors, category)
            .into_iter()
            .filter(|c| c.enabled)
            .collect();
        if enabled.len() > 1 {
            return Err(HarnessError::Assertion(format!(
                "{category} is exclusive but {} connectors are enabled: {}",
                enabled.len(),
                ids(&enabled)
            )));
        }
    }
    Ok(())
}

fn ids(connectors: &[&Connector]) -> String {
    connectors
        .iter()
        .map(|c| c.id.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
