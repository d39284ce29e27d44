//! `/v2/jobs`: look up a deferred operation.

use tracing::instrument;

use crate::client::CloudFoundryClient;
use crate::error::{require_id, ApiError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::query::segment;
use crate::response::{check_status, decode_job, OK};
use crate::types::JobResource;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetJobRequest {
    job_id: String,
}

impl GetJobRequest {
    pub fn new(job_id: impl Into<String>) -> Result<Self, ApiError> {
        Ok(Self {
            job_id: require_id("job_id", job_id.into())?,
        })
    }

    pub fn job_id(&self) -> &str {
        &self.job_id
    }
}

pub struct Jobs<'a> {
    client: &'a CloudFoundryClient,
}

impl<'a> Jobs<'a> {
    pub(crate) fn new(client: &'a CloudFoundryClient) -> Self {
        Self { client }
    }

    pub fn build_get(request: &GetJobRequest) -> HttpRequest {
        HttpRequest::new(
            HttpMethod::Get,
            format!("/v2/jobs/{}", segment(&request.job_id)),
        )
    }

    pub fn parse_get(response: &HttpResponse) -> Result<JobResource, ApiError> {
        check_status(response, &[OK])?;
        decode_job(response)
    }

    #[instrument(skip_all, name = "jobs.get", fields(job_id = %request.job_id))]
    pub async fn get(&self, request: &GetJobRequest) -> Result<JobResource, ApiError> {
        let response = self.client.exchange(Self::build_get(request)).await?;
        Self::parse_get(&response)
    }
}
