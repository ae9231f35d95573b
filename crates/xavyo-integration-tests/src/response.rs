//! Raw admin API responses and the checks tests run against them.

use crate::error::{HarnessError, HarnessResult};
use crate::models::Connector;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

/// Status code and body text of one admin API call.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    body: String,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Fail unless the status code equals `expected`.
    pub fn expect_status(&self, expected: u16) -> HarnessResult<&Self> {
        if self.status.as_u16() == expected {
            Ok(self)
        } else {
            Err(HarnessError::UnexpectedStatus {
                expected,
                actual: self.status.as_u16(),
                body: self.body.clone(),
            })
        }
    }

    /// Parse the body as JSON into `T`, whatever the status.
    pub fn json<T: DeserializeOwned>(&self) -> HarnessResult<T> {
        serde_json::from_str(&self.body).map_err(|e| {
            HarnessError::MalformedJson(format!(
                "{e} (status {}, body: {})",
                self.status.as_u16(),
                truncate(&self.body, 200)
            ))
        })
    }

    /// Expect 200 and a single connector record.
    pub fn connector(&self) -> HarnessResult<Connector> {
        self.expect_status(200)?.json()
    }

    /// Expect 200 and an array of connector records.
    pub fn connectors(&self) -> HarnessResult<Vec<Connector>> {
        self.expect_status(200)?.json()
    }
}

fn truncate(body: &str, max_chars: usize) -> String {
    if body.chars().count() <= max_chars {
        body.to_string()
    } else {
        let head: String = body.chars().take(max_chars).collect();
        format!("{head}...")
    }
}
