//! `/v2/services`: the service catalogue.
//!
//! Deleting a service honours two flags: `async` asks the platform to defer
//! the work and answer 202 with a job, `purge` removes the service and its
//! plans, instances and bindings without contacting the broker. Flags are
//! emitted in that order, and only when set.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::client::CloudFoundryClient;
use crate::error::{require_id, ApiError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::query::{segment, QueryBuilder};
use crate::response::{check_status, decode_page, decode_resource, empty_outcome, OK};
use crate::types::{Outcome, PaginatedResponse, Resource};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEntity {
    pub label: String,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    pub description: String,
    #[serde(default)]
    pub long_description: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub info_url: Option<String>,
    pub active: bool,
    pub bindable: bool,
    #[serde(default)]
    pub unique_id: Option<String>,
    #[serde(default)]
    pub extra: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub requires: Vec<String>,
    #[serde(default)]
    pub documentation_url: Option<String>,
    #[serde(rename = "service_broker_guid", default)]
    pub service_broker_id: Option<String>,
    #[serde(default)]
    pub plan_updateable: Option<bool>,
    #[serde(default)]
    pub service_plans_url: Option<String>,
}

pub type ServiceResource = Resource<ServiceEntity>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServicePlanEntity {
    pub name: String,
    pub free: bool,
    pub description: String,
    #[serde(rename = "service_guid")]
    pub service_id: String,
    #[serde(default)]
    pub extra: Option<String>,
    #[serde(default)]
    pub unique_id: Option<String>,
    pub public: bool,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub service_url: Option<String>,
    #[serde(default)]
    pub service_instances_url: Option<String>,
}

pub type ServicePlanResource = Resource<ServicePlanEntity>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetServiceRequest {
    service_id: String,
}

impl GetServiceRequest {
    pub fn new(service_id: impl Into<String>) -> Result<Self, ApiError> {
        Ok(Self {
            service_id: require_id("service_id", service_id.into())?,
        })
    }

    pub fn service_id(&self) -> &str {
        &self.service_id
    }
}

/// Filters for listing services. Empty filters are omitted from the query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListServicesRequest {
    pub labels: Vec<String>,
    pub providers: Vec<String>,
    pub service_broker_ids: Vec<String>,
    pub page: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListServicePlansRequest {
    service_id: String,
    page: Option<i32>,
}

impl ListServicePlansRequest {
    pub fn new(service_id: impl Into<String>, page: Option<i32>) -> Result<Self, ApiError> {
        Ok(Self {
            service_id: require_id("service_id", service_id.into())?,
            page,
        })
    }

    pub fn service_id(&self) -> &str {
        &self.service_id
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeleteServiceOptions {
    pub asynchronous: Option<bool>,
    pub purge: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteServiceRequest {
    service_id: String,
    options: DeleteServiceOptions,
}

impl DeleteServiceRequest {
    pub fn new(
        service_id: impl Into<String>,
        options: DeleteServiceOptions,
    ) -> Result<Self, ApiError> {
        Ok(Self {
            service_id: require_id("service_id", service_id.into())?,
            options,
        })
    }

    pub fn service_id(&self) -> &str {
        &self.service_id
    }
}

pub struct Services<'a> {
    client: &'a CloudFoundryClient,
}

impl<'a> Services<'a> {
    pub(crate) fn new(client: &'a CloudFoundryClient) -> Self {
        Self { client }
    }

    pub fn build_get(request: &GetServiceRequest) -> HttpRequest {
        HttpRequest::new(
            HttpMethod::Get,
            format!("/v2/services/{}", segment(&request.service_id)),
        )
    }

    pub fn build_list(request: &ListServicesRequest) -> HttpRequest {
        let path = QueryBuilder::new()
            .filter("label", &request.labels)
            .filter("provider", &request.providers)
            .filter("service_broker_guid", &request.service_broker_ids)
            .param("page", request.page)
            .finish("/v2/services".to_string());
        HttpRequest::new(HttpMethod::Get, path)
    }

    pub fn build_list_service_plans(request: &ListServicePlansRequest) -> HttpRequest {
        let path = QueryBuilder::new()
            .param("page", request.page)
            .finish(format!(
                "/v2/services/{}/service_plans",
                segment(&request.service_id)
            ));
        HttpRequest::new(HttpMethod::Get, path)
    }

    pub fn build_delete(request: &DeleteServiceRequest) -> HttpRequest {
        let path = QueryBuilder::new()
            .param("async", request.options.asynchronous)
            .param("purge", request.options.purge)
            .finish(format!("/v2/services/{}", segment(&request.service_id)));
        HttpRequest::new(HttpMethod::Delete, path)
    }

    pub fn parse_get(response: &HttpResponse) -> Result<ServiceResource, ApiError> {
        check_status(response, &[OK])?;
        decode_resource(response)
    }

    pub fn parse_list(
        response: &HttpResponse,
    ) -> Result<PaginatedResponse<ServiceResource>, ApiError> {
        check_status(response, &[OK])?;
        decode_page(response)
    }

    pub fn parse_list_service_plans(
        response: &HttpResponse,
    ) -> Result<PaginatedResponse<ServicePlanResource>, ApiError> {
        check_status(response, &[OK])?;
        decode_page(response)
    }

    pub fn parse_delete(response: &HttpResponse) -> Result<Outcome<()>, ApiError> {
        empty_outcome(response)
    }

    #[instrument(skip_all, name = "services.get", fields(service_id = %request.service_id))]
    pub async fn get(&self, request: &GetServiceRequest) -> Result<ServiceResource, ApiError> {
        let response = self.client.exchange(Self::build_get(request)).await?;
        Self::parse_get(&response)
    }

    #[instrument(skip_all, name = "services.list", fields(page = ?request.page))]
    pub async fn list(
        &self,
        request: &ListServicesRequest,
    ) -> Result<PaginatedResponse<ServiceResource>, ApiError> {
        let response = self.client.exchange(Self::build_list(request)).await?;
        Self::parse_list(&response)
    }

    #[instrument(skip_all, name = "services.list_service_plans", fields(service_id = %request.service_id))]
    pub async fn list_service_plans(
        &self,
        request: &ListServicePlansRequest,
    ) -> Result<PaginatedResponse<ServicePlanResource>, ApiError> {
        let response = self
            .client
            .exchange(Self::build_list_service_plans(request))
            .await?;
        Self::parse_list_service_plans(&response)
    }

    #[instrument(skip_all, name = "services.delete", fields(service_id = %request.service_id))]
    pub async fn delete(&self, request: &DeleteServiceRequest) -> Result<Outcome<()>, ApiError> {
        let response = self.client.exchange(Self::build_delete(request)).await?;
        Self::parse_delete(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_get_keys_by_id() {
        let req = Services::build_get(&GetServiceRequest::new("test-service-id").unwrap());
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "/v2/services/test-service-id");
    }

    #[test]
    fn build_list_without_filters_has_no_query() {
        let req = Services::build_list(&ListServicesRequest::default());
        assert_eq!(req.path, "/v2/services");
    }

    #[test]
    fn build_list_passes_sentinel_page_through() {
        let req = Services::build_list(&ListServicesRequest {
            labels: vec!["test-label".to_string()],
            page: Some(-1),
            ..Default::default()
        });
        assert_eq!(req.path, "/v2/services?q=label%20IN%20test-label&page=-1");
    }

    #[test]
    fn build_list_orders_filters() {
        let req = Services::build_list(&ListServicesRequest {
            labels: vec!["a".to_string()],
            providers: vec!["p".to_string()],
            service_broker_ids: vec!["b1".to_string(), "b2".to_string()],
            page: None,
        });
        assert_eq!(
            req.path,
            "/v2/services?q=label%20IN%20a&q=provider%20IN%20p&q=service_broker_guid%20IN%20b1,b2"
        );
    }

    #[test]
    fn build_delete_flags() {
        let cases = [
            (DeleteServiceOptions::default(), "/v2/services/s"),
            (
                DeleteServiceOptions {
                    asynchronous: Some(true),
                    purge: None,
                },
                "/v2/services/s?async=true",
            ),
            (
                DeleteServiceOptions {
                    asynchronous: Some(true),
                    purge: Some(true),
                },
                "/v2/services/s?async=true&purge=true",
            ),
            (
                DeleteServiceOptions {
                    asynchronous: None,
                    purge: Some(false),
                },
                "/v2/services/s?purge=false",
            ),
        ];
        for (options, path) in cases {
            let req = Services::build_delete(&DeleteServiceRequest::new("s", options).unwrap());
            assert_eq!(req.method, HttpMethod::Delete);
            assert_eq!(req.path, path);
            assert!(req.body.is_none());
        }
    }

    #[test]
    fn ids_cannot_rewrite_the_request() {
        let req = Services::build_delete(
            &DeleteServiceRequest::new("x?purge=true", DeleteServiceOptions::default()).unwrap(),
        );
        assert_eq!(req.path, "/v2/services/x%3Fpurge%3Dtrue");

        let req = Services::build_get(&GetServiceRequest::new("a/../../v3/apps").unwrap());
        assert_eq!(req.path, "/v2/services/a%2F..%2F..%2Fv3%2Fapps");

        let req = Services::build_list_service_plans(
            &ListServicePlansRequest::new("a b", Some(-1)).unwrap(),
        );
        assert_eq!(req.path, "/v2/services/a%20b/service_plans?page=-1");

        let err = GetServiceRequest::new("..").unwrap_err();
        assert!(matches!(err, ApiError::Validation { field: "service_id", .. }));
    }

    #[test]
    fn parse_get_rejects_url_that_only_ends_with_id() {
        let body = r#"{
            "metadata": {"guid": "abc", "url": "/v2/services/xyzabc"},
            "entity": {"label": "l", "description": "d", "active": true, "bindable": true}
        }"#;
        let err = Services::parse_get(&HttpResponse::new(200, body)).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn delete_requires_service_id() {
        let err = DeleteServiceRequest::new("", DeleteServiceOptions::default()).unwrap_err();
        assert!(matches!(err, ApiError::Validation { field: "service_id", .. }));
    }

    #[test]
    fn parse_delete_synchronous() {
        let outcome = Services::parse_delete(&HttpResponse::new(204, "")).unwrap();
        assert_eq!(outcome, Outcome::Completed(()));
    }

    #[test]
    fn parse_get_rejects_mismatched_url() {
        let body = r#"{
            "metadata": {"guid": "a", "url": "/v2/services/b"},
            "entity": {"label": "l", "description": "d", "active": true, "bindable": true}
        }"#;
        let err = Services::parse_get(&HttpResponse::new(200, body)).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn parse_get_not_found() {
        let err = Services::parse_get(&HttpResponse::new(404, "")).unwrap_err();
        assert!(matches!(err, ApiError::NotFound { .. }));
    }
}
