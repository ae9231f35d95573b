//! Common test utilities for the connector suites.
//!
//! Provides a wiremock-backed connector backend that keeps state between
//! calls, so the suites can check real state transitions without a running
//! server.

#![allow(dead_code)]

use serde::Deserialize;
use serde_json::json;
use std::sync::{Arc, Mutex, Once};
use wiremock::matchers::path_regex;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

use xavyo_integration_tests::auth::DEVELOPMENT_USER_HEADER;
use xavyo_integration_tests::scenario::well_known;
use xavyo_integration_tests::{
    AdminApiClient, AdminAuth, Connector, ConnectorConfig, ConnectorType,
};

static INIT: Once = Once::new();

/// Admin principal the mock backend accepts in development mode.
pub const TEST_ADMIN_USER_ID: &str = "integration-test-admin-user";

/// Bearer token the mock backend accepts in production mode.
pub const TEST_ADMIN_TOKEN: &str = "test-admin-token-123";

/// Initialize logging for tests (once).
pub fn init_test_logging() {
    INIT.call_once(|| {
        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::fmt()
                .with_test_writer()
                .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
                .try_init()
                .ok();
        }
    });
}

/// Build a config map from JSON object literal.
pub fn config(value: serde_json::Value) -> ConnectorConfig {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("connector config must be a JSON object, got {other}"),
    }
}

/// The connectors the backend seeds: all disabled with empty config.
pub fn seeded_connectors() -> Vec<Connector> {
    [
        (well_known::FACEBOOK, ConnectorType::Social),
        (well_known::GITHUB, ConnectorType::Social),
        (well_known::GOOGLE, ConnectorType::Social),
        (well_known::TWILIO_SMS, ConnectorType::Sms),
        (well_known::ALIYUN_SMS, ConnectorType::Sms),
        (well_known::ALIYUN_EMAIL, ConnectorType::Email),
        (well_known::SENDGRID_EMAIL, ConnectorType::Email),
    ]
    .into_iter()
    .map(|(id, connector_type)| Connector {
        id: id.to_string(),
        connector_type,
        enabled: false,
        config: ConnectorConfig::new(),
        metadata: Some(json!({ "target": id })),
        created_at: Some(1_650_000_000_000),
    })
    .collect()
}

// ---------------------------------------------------------------------------
// ConnectorBackendResponder - stateful stand-in for the admin API
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct ConfigBody {
    config: ConnectorConfig,
}

#[derive(Deserialize)]
struct EnabledBody {
    enabled: bool,
}

/// A wiremock responder that serves the connector admin endpoints from
/// in-memory state.
///
/// Enabling an SMS or Email connector disables the other connectors of that
/// category, matching the server's rule.
#[derive(Clone)]
pub struct ConnectorBackendResponder {
    connectors: Arc<Mutex<Vec<Connector>>>,
}

impl ConnectorBackendResponder {
    pub fn new(connectors: Vec<Connector>) -> Self {
        Self {
            connectors: Arc::new(Mutex::new(connectors)),
        }
    }

    fn is_authorized(request: &Request) -> bool {
        let dev_user = request
            .headers
            .get(DEVELOPMENT_USER_HEADER)
            .and_then(|v| v.to_str().ok());
        let bearer = request
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok());

        dev_user == Some(TEST_ADMIN_USER_ID)
            || bearer == Some(format!("Bearer {TEST_ADMIN_TOKEN}").as_str())
    }

    fn error(status: u16, message: &str) -> ResponseTemplate {
        ResponseTemplate::new(status).set_body_json(json!({ "message": message }))
    }

    fn find(connectors: &[Connector], id: &str) -> Option<usize> {
        connectors.iter().position(|c| c.id == id)
    }

    fn update_config(&self, id: &str, body: &[u8]) -> ResponseTemplate {
        let Ok(ConfigBody { config }) = serde_json::from_slice::<ConfigBody>(body) else {
            return Self::error(400, "request body must be {\"config\": object}");
        };

        let mut connectors = self.connectors.lock().unwrap();
        let Some(index) = Self::find(&connectors, id) else {
            return Self::error(404, "connector not found");
        };
        connectors[index].config = config;
        ResponseTemplate::new(200).set_body_json(&connectors[index])
    }

    fn set_enabled(&self, id: &str, body: &[u8]) -> ResponseTemplate {
        let Ok(EnabledBody { enabled }) = serde_json::from_slice::<EnabledBody>(body) else {
            return Self::error(400, "request body must be {\"enabled\": bool}");
        };

        let mut connectors = self.connectors.lock().unwrap();
        let Some(index) = Self::find(&connectors, id) else {
            return Self::error(404, "connector not found");
        };

        let category = connectors[index].connector_type;
        if enabled && category.is_exclusive() {
            for other in connectors.iter_mut().filter(|c| c.connector_type == category) {
                other.enabled = false;
            }
        }
        connectors[index].enabled = enabled;
        ResponseTemplate::new(200).set_body_json(&connectors[index])
    }
}

impl Respond for ConnectorBackendResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        if !Self::is_authorized(request) {
            return Self::error(401, "Unauthorized");
        }

        // Ids arrive percent-encoded as a single segment.
        let segments: Vec<String> = request
            .url
            .path_segments()
            .map(|s| s.map(decode_segment).collect())
            .unwrap_or_default();
        // Path is /api/connectors[/...]
        let rest: Vec<&str> = segments.iter().skip(2).map(String::as_str).collect();

        match (request.method.as_str(), rest.as_slice()) {
            ("GET", []) => {
                let connectors = self.connectors.lock().unwrap();
                ResponseTemplate::new(200).set_body_json(&*connectors)
            }
            ("GET", [id]) => {
                let connectors = self.connectors.lock().unwrap();
                match connectors.iter().find(|c| c.id == *id) {
                    Some(connector) => ResponseTemplate::new(200).set_body_json(connector),
                    None => Self::error(404, "connector not found"),
                }
            }
            ("PATCH", [id]) => self.update_config(id, &request.body),
            ("PATCH", [id, "enabled"]) => self.set_enabled(id, &request.body),
            _ => Self::error(405, "method not allowed"),
        }
    }
}

fn decode_segment(segment: &str) -> String {
    urlencoding::decode(segment)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| segment.to_string())
}

// ---------------------------------------------------------------------------
// MockConnectorBackend
// ---------------------------------------------------------------------------

/// A mock admin API server seeded with the well-known connectors.
pub struct MockConnectorBackend {
    server: MockServer,
    responder: ConnectorBackendResponder,
}

impl MockConnectorBackend {
    /// Start a backend seeded with [`seeded_connectors`].
    pub async fn start() -> Self {
        Self::start_with(seeded_connectors()).await
    }

    /// Start a backend seeded with the given connectors.
    pub async fn start_with(connectors: Vec<Connector>) -> Self {
        init_test_logging();

        let server = MockServer::start().await;
        let responder = ConnectorBackendResponder::new(connectors);

        Mock::given(path_regex(r"^/api/connectors(/.*)?$"))
            .respond_with(responder.clone())
            .mount(&server)
            .await;

        Self { server, responder }
    }

    /// Admin API base URL of this backend.
    pub fn api_url(&self) -> String {
        format!("{}/api", self.server.uri())
    }

    /// A client authenticated as the development admin user.
    pub fn client(&self) -> AdminApiClient {
        self.client_with_auth(AdminAuth::DevelopmentUser {
            user_id: TEST_ADMIN_USER_ID.to_string(),
        })
    }

    /// A client with specific credentials.
    pub fn client_with_auth(&self, auth: AdminAuth) -> AdminApiClient {
        AdminApiClient::with_http_client(self.api_url(), auth, reqwest::Client::new())
    }

    /// Server-side state of one connector, bypassing the HTTP surface.
    pub fn stored(&self, id: &str) -> Option<Connector> {
        self.responder
            .connectors
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned()
    }

    /// Requests the backend has received so far.
    pub async fn received_requests(&self) -> Vec<Request> {
        self.server.received_requests().await.unwrap_or_default()
    }
}
