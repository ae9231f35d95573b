//! Integration-test harness for the connector admin API.
//!
//! Two layers:
//! - [`client::AdminApiClient`] issues authenticated list / get / update /
//!   enable / delete calls and hands back the raw [`ApiResponse`].
//! - [`response`] and [`assertions`] turn those responses into typed
//!   [`Connector`] records and check status codes, `enabled` flags, config
//!   equality and per-category exclusivity.
//!
//! ```rust,ignore
//! use xavyo_integration_tests::{assertions, AdminApiClient};
//!
//! let client = AdminApiClient::from_env()?;
//! let connectors = client.list_connectors().await?.connectors()?;
//! assertions::expect_pristine(&connectors)?;
//! ```

pub mod assertions;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod response;
pub mod scenario;

pub use auth::AdminAuth;
pub use client::AdminApiClient;
pub use config::HarnessConfig;
pub use error::{HarnessError, HarnessResult};
pub use models::{Connector, ConnectorConfig, ConnectorType};
pub use response::ApiResponse;
