//! Status-code contract shared by every resource client.
//!
//! 200/201 carry the resource, 202 carries a job (or, for v3 actions, the
//! resource in its new state), 204 carries nothing. Anything outside the
//! 2xx/3xx range is an upstream error; a success-class status the operation
//! does not define is `UnexpectedStatus`.

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::ApiError;
use crate::http::HttpResponse;
use crate::types::{ErrorBody, JobResource, Outcome, Page, Resource};

pub(crate) const OK: u16 = 200;
pub(crate) const CREATED: u16 = 201;
pub(crate) const ACCEPTED: u16 = 202;
pub(crate) const NO_CONTENT: u16 = 204;

/// Map the response status onto the operation's contract.
pub(crate) fn check_status(response: &HttpResponse, expected: &[u16]) -> Result<(), ApiError> {
    if expected.contains(&response.status) {
        return Ok(());
    }
    if (200..400).contains(&response.status) {
        return Err(ApiError::UnexpectedStatus {
            status: response.status,
        });
    }
    warn!(status = response.status, "platform returned an error");
    if response.status == 404 {
        return Err(ApiError::NotFound {
            body: response.body.clone(),
        });
    }
    let platform = serde_json::from_str::<ErrorBody>(&response.body).ok();
    let (code, description, error_code) = match platform {
        Some(b) => (b.code, b.description, b.error_code),
        None => (None, None, None),
    };
    Err(ApiError::Upstream {
        status: response.status,
        body: response.body.clone(),
        code,
        description,
        error_code,
    })
}

pub(crate) fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Decode a v2 singular resource and check its metadata.
pub(crate) fn decode_resource<E: DeserializeOwned>(
    response: &HttpResponse,
) -> Result<Resource<E>, ApiError> {
    let resource: Resource<E> = decode(response)?;
    resource.check_consistency().map_err(ApiError::Decode)?;
    Ok(resource)
}

/// Decode a list page and check its paging counters.
pub(crate) fn decode_page<P>(response: &HttpResponse) -> Result<P, ApiError>
where
    P: DeserializeOwned + Page,
{
    let page: P = decode(response)?;
    page.check_consistency().map_err(ApiError::Decode)?;
    Ok(page)
}

pub(crate) fn decode_job(response: &HttpResponse) -> Result<JobResource, ApiError> {
    let job: JobResource = decode_resource(response)?;
    if job.entity.id.is_empty() {
        return Err(ApiError::Decode("job resource has an empty id".to_string()));
    }
    Ok(job)
}

/// 204 → `Completed(())`, 202 → `Accepted(job)`.
pub(crate) fn empty_outcome(response: &HttpResponse) -> Result<Outcome<()>, ApiError> {
    check_status(response, &[NO_CONTENT, ACCEPTED])?;
    if response.status == ACCEPTED {
        return decode_job(response).map(Outcome::Accepted);
    }
    Ok(Outcome::Completed(()))
}

/// `completed` statuses decode via `parse`, 202 decodes a job.
pub(crate) fn resource_outcome<T>(
    response: &HttpResponse,
    completed: &[u16],
    parse: impl FnOnce(&HttpResponse) -> Result<T, ApiError>,
) -> Result<Outcome<T>, ApiError> {
    if response.status == ACCEPTED {
        return decode_job(response).map(Outcome::Accepted);
    }
    check_status(response, completed)?;
    parse(response).map(Outcome::Completed)
}
