//! Declarative request/response pairs.
//!
//! An `InteractionContext` names the one request a case expects and the
//! response the stub replays for it. Bodies are referenced by their path
//! under the workspace `fixtures/` directory and loaded at run time.

use std::fs;
use std::path::{Path, PathBuf};

use cf_core::HttpMethod;

use crate::error::ContractMismatch;

/// Workspace directory holding the JSON fixtures.
pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../fixtures")
}

/// Read a fixture by its logical name, e.g. `v2/info/GET_response.json`.
pub fn load_fixture(name: &str) -> Result<String, ContractMismatch> {
    fs::read_to_string(fixtures_dir().join(name)).map_err(|e| ContractMismatch::Fixture {
        name: name.to_string(),
        reason: e.to_string(),
    })
}

/// Load a fixture and parse it as JSON.
pub fn load_json(name: &str) -> Result<serde_json::Value, ContractMismatch> {
    serde_json::from_str(&load_fixture(name)?).map_err(|e| ContractMismatch::Fixture {
        name: name.to_string(),
        reason: e.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedRequest {
    pub method: HttpMethod,
    /// Path plus query string, compared verbatim.
    pub path: String,
    pub payload: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptedResponse {
    pub status: u16,
    pub payload: Option<String>,
    pub headers: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionContext {
    pub request: ExpectedRequest,
    pub response: ScriptedResponse,
}

impl InteractionContext {
    /// Expect `method path` with no body; reply `status` with no body.
    pub fn new(method: HttpMethod, path: impl Into<String>, status: u16) -> Self {
        Self {
            request: ExpectedRequest {
                method,
                path: path.into(),
                payload: None,
            },
            response: ScriptedResponse {
                status,
                payload: None,
                headers: Vec::new(),
            },
        }
    }

    pub fn request_payload(mut self, fixture: impl Into<String>) -> Self {
        self.request.payload = Some(fixture.into());
        self
    }

    pub fn response_payload(mut self, fixture: impl Into<String>) -> Self {
        self.response.payload = Some(fixture.into());
        self
    }

    pub fn response_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.response.headers.push((name.into(), value.into()));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_known_fixture() {
        let info = load_json("v2/info/GET_response.json").unwrap();
        assert_eq!(info["api_version"], "2.44.0");
    }

    #[test]
    fn missing_fixture_is_reported_by_name() {
        let err = load_fixture("v2/nope.json").unwrap_err();
        assert!(matches!(err, ContractMismatch::Fixture { name, .. } if name == "v2/nope.json"));
    }

    #[test]
    fn context_builder_sets_both_sides() {
        let ctx = InteractionContext::new(HttpMethod::Post, "/v2/shared_domains", 201)
            .request_payload("v2/shared_domains/POST_request.json")
            .response_payload("v2/shared_domains/POST_response.json")
            .response_header("Location", "/v2/shared_domains/x");
        assert_eq!(ctx.request.payload.as_deref(), Some("v2/shared_domains/POST_request.json"));
        assert_eq!(ctx.response.status, 201);
        assert_eq!(ctx.response.headers.len(), 1);
    }
}
