//! Entry point tying resource clients to a transport and a token source.
//!
//! # Design
//! `CloudFoundryClient` holds only two shared capabilities and carries no
//! mutable state between calls, so clones are cheap and concurrent calls are
//! independent. Each resource accessor (`info()`, `services()`, ...) borrows
//! the client; the resource types own request building and response parsing.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::token::TokenProvider;
use crate::transport::{ReqwestTransport, Transport};
use crate::v2::{Info, Jobs, Services, SharedDomains};
use crate::v3::Tasks;

#[derive(Clone)]
pub struct CloudFoundryClient {
    transport: Arc<dyn Transport>,
    tokens: Arc<dyn TokenProvider>,
}

impl CloudFoundryClient {
    pub fn new(transport: Arc<dyn Transport>, tokens: Arc<dyn TokenProvider>) -> Self {
        Self { transport, tokens }
    }

    /// Client over the default `reqwest` transport.
    pub fn from_config(
        config: ClientConfig,
        tokens: Arc<dyn TokenProvider>,
    ) -> Result<Self, ApiError> {
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::new(Arc::new(transport), tokens))
    }

    pub fn info(&self) -> Info<'_> {
        Info::new(self)
    }

    pub fn jobs(&self) -> Jobs<'_> {
        Jobs::new(self)
    }

    pub fn services(&self) -> Services<'_> {
        Services::new(self)
    }

    pub fn shared_domains(&self) -> SharedDomains<'_> {
        SharedDomains::new(self)
    }

    pub fn tasks(&self) -> Tasks<'_> {
        Tasks::new(self)
    }

    /// Authenticate `request` and run it through the transport.
    pub(crate) async fn exchange(&self, mut request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let token = self.tokens.token().await?;
        request
            .headers
            .push(("authorization".to_string(), format!("bearer {token}")));
        request
            .headers
            .push(("accept".to_string(), "application/json".to_string()));

        debug!(method = %request.method, path = %request.path, "sending request");
        let response = self.transport.execute(request).await?;
        debug!(status = response.status, "received response");
        Ok(response)
    }
}

impl fmt::Debug for CloudFoundryClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudFoundryClient").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::http::HttpMethod;
    use crate::token::StaticToken;

    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<HttpRequest>>,
    }

    #[async_trait]
    impl Transport for Recorder {
        async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.seen.lock().unwrap().push(request);
            Ok(HttpResponse::new(204, ""))
        }
    }

    struct FailingTokens;

    #[async_trait]
    impl TokenProvider for FailingTokens {
        async fn token(&self) -> Result<String, ApiError> {
            Err(ApiError::Token("expired".to_string()))
        }
    }

    #[tokio::test]
    async fn exchange_adds_bearer_and_accept_headers() {
        let recorder = Arc::new(Recorder::default());
        let client = CloudFoundryClient::new(recorder.clone(), Arc::new(StaticToken::new("t0k")));

        let response = client
            .exchange(HttpRequest::new(HttpMethod::Get, "/v2/info"))
            .await
            .unwrap();
        assert_eq!(response.status, 204);

        let seen = recorder.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].header("Authorization"), Some("bearer t0k"));
        assert_eq!(seen[0].header("Accept"), Some("application/json"));
    }

    #[tokio::test]
    async fn token_failure_skips_the_network() {
        let recorder = Arc::new(Recorder::default());
        let client = CloudFoundryClient::new(recorder.clone(), Arc::new(FailingTokens));

        let err = client
            .exchange(HttpRequest::new(HttpMethod::Get, "/v2/info"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Token(_)));
        assert!(recorder.seen.lock().unwrap().is_empty());
    }
}
