//! `/v2/shared_domains`: domains available to every organization.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::client::CloudFoundryClient;
use crate::error::{require, require_id, ApiError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::query::{segment, QueryBuilder};
use crate::response::{
    check_status, decode_page, decode_resource, empty_outcome, resource_outcome, CREATED, OK,
};
use crate::types::{Outcome, PaginatedResponse, Resource};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedDomainEntity {
    pub name: String,
    #[serde(rename = "router_group_guid", default)]
    pub router_group_id: Option<String>,
    #[serde(default)]
    pub router_group_type: Option<String>,
}

pub type SharedDomainResource = Resource<SharedDomainEntity>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateSharedDomainRequest {
    name: String,
    #[serde(rename = "router_group_guid", skip_serializing_if = "Option::is_none")]
    router_group_id: Option<String>,
}

impl CreateSharedDomainRequest {
    pub fn new(name: impl Into<String>, router_group_id: Option<String>) -> Result<Self, ApiError> {
        Ok(Self {
            name: require("name", name.into())?,
            router_group_id,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetSharedDomainRequest {
    shared_domain_id: String,
}

impl GetSharedDomainRequest {
    pub fn new(shared_domain_id: impl Into<String>) -> Result<Self, ApiError> {
        Ok(Self {
            shared_domain_id: require_id("shared_domain_id", shared_domain_id.into())?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListSharedDomainsRequest {
    pub names: Vec<String>,
    pub page: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteSharedDomainRequest {
    shared_domain_id: String,
    asynchronous: Option<bool>,
}

impl DeleteSharedDomainRequest {
    pub fn new(
        shared_domain_id: impl Into<String>,
        asynchronous: Option<bool>,
    ) -> Result<Self, ApiError> {
        Ok(Self {
            shared_domain_id: require_id("shared_domain_id", shared_domain_id.into())?,
            asynchronous,
        })
    }
}

pub struct SharedDomains<'a> {
    client: &'a CloudFoundryClient,
}

impl<'a> SharedDomains<'a> {
    pub(crate) fn new(client: &'a CloudFoundryClient) -> Self {
        Self { client }
    }

    pub fn build_create(request: &CreateSharedDomainRequest) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(request).map_err(|e| ApiError::Encode(e.to_string()))?;
        Ok(HttpRequest::new(HttpMethod::Post, "/v2/shared_domains").with_json_body(body))
    }

    pub fn build_get(request: &GetSharedDomainRequest) -> HttpRequest {
        HttpRequest::new(
            HttpMethod::Get,
            format!("/v2/shared_domains/{}", segment(&request.shared_domain_id)),
        )
    }

    pub fn build_list(request: &ListSharedDomainsRequest) -> HttpRequest {
        let path = QueryBuilder::new()
            .filter("name", &request.names)
            .param("page", request.page)
            .finish("/v2/shared_domains".to_string());
        HttpRequest::new(HttpMethod::Get, path)
    }

    pub fn build_delete(request: &DeleteSharedDomainRequest) -> HttpRequest {
        let path = QueryBuilder::new()
            .param("async", request.asynchronous)
            .finish(format!(
                "/v2/shared_domains/{}",
                segment(&request.shared_domain_id)
            ));
        HttpRequest::new(HttpMethod::Delete, path)
    }

    /// The created resource's URL is taken from the `Location` header when
    /// the body leaves it out.
    pub fn parse_create(
        response: &HttpResponse,
    ) -> Result<Outcome<SharedDomainResource>, ApiError> {
        resource_outcome(response, &[OK, CREATED], |response| {
            let mut created: SharedDomainResource = decode_resource(response)?;
            if created.metadata.url.is_none() {
                created.metadata.url = response.header("location").map(str::to_string);
                created.check_consistency().map_err(ApiError::Decode)?;
            }
            Ok(created)
        })
    }

    pub fn parse_get(response: &HttpResponse) -> Result<SharedDomainResource, ApiError> {
        check_status(response, &[OK])?;
        decode_resource(response)
    }

    pub fn parse_list(
        response: &HttpResponse,
    ) -> Result<PaginatedResponse<SharedDomainResource>, ApiError> {
        check_status(response, &[OK])?;
        decode_page(response)
    }

    pub fn parse_delete(response: &HttpResponse) -> Result<Outcome<()>, ApiError> {
        empty_outcome(response)
    }

    #[instrument(skip_all, name = "shared_domains.create", fields(name = %request.name))]
    pub async fn create(
        &self,
        request: &CreateSharedDomainRequest,
    ) -> Result<Outcome<SharedDomainResource>, ApiError> {
        let response = self.client.exchange(Self::build_create(request)?).await?;
        Self::parse_create(&response)
    }

    #[instrument(skip_all, name = "shared_domains.get", fields(id = %request.shared_domain_id))]
    pub async fn get(
        &self,
        request: &GetSharedDomainRequest,
    ) -> Result<SharedDomainResource, ApiError> {
        let response = self.client.exchange(Self::build_get(request)).await?;
        Self::parse_get(&response)
    }

    #[instrument(skip_all, name = "shared_domains.list", fields(page = ?request.page))]
    pub async fn list(
        &self,
        request: &ListSharedDomainsRequest,
    ) -> Result<PaginatedResponse<SharedDomainResource>, ApiError> {
        let response = self.client.exchange(Self::build_list(request)).await?;
        Self::parse_list(&response)
    }

    #[instrument(skip_all, name = "shared_domains.delete", fields(id = %request.shared_domain_id))]
    pub async fn delete(&self, request: &DeleteSharedDomainRequest) -> Result<Outcome<()>, ApiError> {
        let response = self.client.exchange(Self::build_delete(request)).await?;
        Self::parse_delete(&response)
    }
}
