//! `/v2/info`: platform endpoints and versions.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::client::CloudFoundryClient;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::response::{check_status, decode, OK};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetInfoResponse {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub build: Option<String>,
    #[serde(default)]
    pub support: Option<String>,
    #[serde(default)]
    pub version: Option<u32>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub authorization_endpoint: Option<String>,
    #[serde(default)]
    pub token_endpoint: Option<String>,
    #[serde(default)]
    pub min_cli_version: Option<String>,
    #[serde(default)]
    pub min_recommended_cli_version: Option<String>,
    pub api_version: String,
    #[serde(default)]
    pub app_ssh_endpoint: Option<String>,
    #[serde(default)]
    pub app_ssh_host_key_fingerprint: Option<String>,
    #[serde(default)]
    pub app_ssh_oauth_client: Option<String>,
    #[serde(default)]
    pub routing_endpoint: Option<String>,
    #[serde(default)]
    pub logging_endpoint: Option<String>,
    #[serde(default)]
    pub doppler_logging_endpoint: Option<String>,
}

pub struct Info<'a> {
    client: &'a CloudFoundryClient,
}

impl<'a> Info<'a> {
    pub(crate) fn new(client: &'a CloudFoundryClient) -> Self {
        Self { client }
    }

    pub fn build_get() -> HttpRequest {
        HttpRequest::new(HttpMethod::Get, "/v2/info")
    }

    pub fn parse_get(response: &HttpResponse) -> Result<GetInfoResponse, ApiError> {
        check_status(response, &[OK])?;
        decode(response)
    }

    #[instrument(skip_all, name = "info.get")]
    pub async fn get(&self) -> Result<GetInfoResponse, ApiError> {
        let response = self.client.exchange(Self::build_get()).await?;
        Self::parse_get(&response)
    }
}
