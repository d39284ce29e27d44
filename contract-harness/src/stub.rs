//! In-process transport that asserts the request and replays a fixture.

use std::sync::Mutex;

use async_trait::async_trait;
use cf_core::{ApiError, HttpRequest, HttpResponse, Transport};
use tracing::debug;

use crate::error::ContractMismatch;
use crate::interaction::{load_fixture, load_json, InteractionContext};

/// Token every harness client presents.
pub const TEST_ACCESS_TOKEN: &str = "test-access-token";

/// Replays one scripted response and records every request it sees.
///
/// A mismatching request still gets recorded, then fails the exchange with
/// `ApiError::Transport` so the client surfaces it; [`StubTransport::verify`]
/// reports the precise mismatch afterwards.
pub struct StubTransport {
    interaction: InteractionContext,
    expected_body: Option<serde_json::Value>,
    response: HttpResponse,
    seen: Mutex<Vec<HttpRequest>>,
}

impl StubTransport {
    pub fn new(interaction: InteractionContext) -> Result<Self, ContractMismatch> {
        let expected_body = interaction
            .request
            .payload
            .as_deref()
            .map(load_json)
            .transpose()?;
        let body = match interaction.response.payload.as_deref() {
            Some(name) => load_fixture(name)?,
            None => String::new(),
        };
        let response = HttpResponse {
            status: interaction.response.status,
            headers: interaction.response.headers.clone(),
            body,
        };
        Ok(Self {
            interaction,
            expected_body,
            response,
            seen: Mutex::new(Vec::new()),
        })
    }

    /// Check that exactly one request arrived and that it matched.
    pub fn verify(&self) -> Result<(), ContractMismatch> {
        let seen = self.seen.lock().unwrap_or_else(|e| e.into_inner());
        match seen.as_slice() {
            [request] => self.check(request),
            other => Err(ContractMismatch::RequestCount {
                actual: other.len(),
            }),
        }
    }

    fn check(&self, request: &HttpRequest) -> Result<(), ContractMismatch> {
        let expected = &self.interaction.request;
        if request.method != expected.method {
            return Err(ContractMismatch::Method {
                expected: expected.method.to_string(),
                actual: request.method.to_string(),
            });
        }
        if request.path != expected.path {
            return Err(ContractMismatch::Path {
                expected: expected.path.clone(),
                actual: request.path.clone(),
            });
        }
        let bearer = format!("bearer {TEST_ACCESS_TOKEN}");
        if request.header("authorization") != Some(bearer.as_str()) {
            return Err(ContractMismatch::Authorization);
        }

        let actual_body = request
            .body
            .as_deref()
            .map(serde_json::from_str::<serde_json::Value>)
            .transpose()
            .map_err(|e| ContractMismatch::Body {
                expected: describe(self.expected_body.as_ref()),
                actual: format!("invalid JSON ({e})"),
            })?;
        if actual_body != self.expected_body {
            return Err(ContractMismatch::Body {
                expected: describe(self.expected_body.as_ref()),
                actual: describe(actual_body.as_ref()),
            });
        }
        Ok(())
    }
}

fn describe(body: Option<&serde_json::Value>) -> String {
    body.map_or_else(|| "no body".to_string(), |v| v.to_string())
}

#[async_trait]
impl Transport for StubTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = %request.method, path = %request.path, "stub received request");
        let verdict = self.check(&request);
        self.seen
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request);
        match verdict {
            Ok(()) => Ok(self.response.clone()),
            Err(mismatch) => Err(ApiError::Transport(mismatch.to_string())),
        }
    }
}
