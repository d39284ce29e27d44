//! `/v3/tasks`: one-off processes run against an application's droplet.
//!
//! Creating and cancelling a task both answer 202 with the task itself in
//! its new state (`RUNNING`, `CANCELING`); there is no separate job.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::client::CloudFoundryClient;
use crate::error::{require_id, ApiError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::query::{segment, QueryBuilder};
use crate::response::{check_status, decode, decode_page, ACCEPTED, OK};
use crate::types::{Link, ListResponse};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskState {
    Pending,
    Running,
    Succeeded,
    Canceling,
    Failed,
}

impl TaskState {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskState::Pending => "PENDING",
            TaskState::Running => "RUNNING",
            TaskState::Succeeded => "SUCCEEDED",
            TaskState::Canceling => "CANCELING",
            TaskState::Failed => "FAILED",
        }
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskResult {
    #[serde(default)]
    pub failure_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "guid")]
    pub id: String,
    #[serde(default)]
    pub sequence_id: Option<u32>,
    pub name: String,
    #[serde(default)]
    pub command: Option<String>,
    pub state: TaskState,
    #[serde(default)]
    pub memory_in_mb: Option<u32>,
    #[serde(default)]
    pub disk_in_mb: Option<u32>,
    #[serde(default)]
    pub result: TaskResult,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(rename = "droplet_guid", default)]
    pub droplet_id: Option<String>,
    #[serde(default)]
    pub links: BTreeMap<String, Link>,
}

/// Body of a task creation. `command` is required; the rest default on the
/// platform side when omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskSpec {
    pub command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_in_mb: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disk_in_mb: Option<u32>,
    #[serde(rename = "droplet_guid", skip_serializing_if = "Option::is_none")]
    pub droplet_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    application_id: String,
    spec: TaskSpec,
}

impl CreateTaskRequest {
    pub fn new(application_id: impl Into<String>, spec: TaskSpec) -> Result<Self, ApiError> {
        let application_id = require_id("application_id", application_id.into())?;
        if spec.command.trim().is_empty() {
            return Err(ApiError::missing("command"));
        }
        Ok(Self {
            application_id,
            spec,
        })
    }

    pub fn application_id(&self) -> &str {
        &self.application_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetTaskRequest {
    task_id: String,
}

impl GetTaskRequest {
    pub fn new(task_id: impl Into<String>) -> Result<Self, ApiError> {
        Ok(Self {
            task_id: require_id("task_id", task_id.into())?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelTaskRequest {
    task_id: String,
}

impl CancelTaskRequest {
    pub fn new(task_id: impl Into<String>) -> Result<Self, ApiError> {
        Ok(Self {
            task_id: require_id("task_id", task_id.into())?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListTasksRequest {
    pub names: Vec<String>,
    pub states: Vec<TaskState>,
    pub application_ids: Vec<String>,
    pub page: Option<i32>,
    pub per_page: Option<u32>,
}

pub struct Tasks<'a> {
    client: &'a CloudFoundryClient,
}

impl<'a> Tasks<'a> {
    pub(crate) fn new(client: &'a CloudFoundryClient) -> Self {
        Self { client }
    }

    pub fn build_create(request: &CreateTaskRequest) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(&request.spec).map_err(|e| ApiError::Encode(e.to_string()))?;
        Ok(HttpRequest::new(
            HttpMethod::Post,
            format!("/v3/apps/{}/tasks", segment(&request.application_id)),
        )
        .with_json_body(body))
    }

    pub fn build_get(request: &GetTaskRequest) -> HttpRequest {
        HttpRequest::new(
            HttpMethod::Get,
            format!("/v3/tasks/{}", segment(&request.task_id)),
        )
    }

    pub fn build_list(request: &ListTasksRequest) -> HttpRequest {
        let path = QueryBuilder::new()
            .list("names", &request.names)
            .list("states", &request.states)
            .list("app_guids", &request.application_ids)
            .param("page", request.page)
            .param("per_page", request.per_page)
            .finish("/v3/tasks".to_string());
        HttpRequest::new(HttpMethod::Get, path)
    }

    pub fn build_cancel(request: &CancelTaskRequest) -> HttpRequest {
        HttpRequest::new(
            HttpMethod::Put,
            format!("/v3/tasks/{}/cancel", segment(&request.task_id)),
        )
    }

    pub fn parse_create(response: &HttpResponse) -> Result<Task, ApiError> {
        check_status(response, &[ACCEPTED])?;
        decode(response)
    }

    pub fn parse_get(response: &HttpResponse) -> Result<Task, ApiError> {
        check_status(response, &[OK])?;
        decode(response)
    }

    pub fn parse_list(response: &HttpResponse) -> Result<ListResponse<Task>, ApiError> {
        check_status(response, &[OK])?;
        decode_page(response)
    }

    pub fn parse_cancel(response: &HttpResponse) -> Result<Task, ApiError> {
        check_status(response, &[ACCEPTED])?;
        decode(response)
    }

    #[instrument(skip_all, name = "tasks.create", fields(application_id = %request.application_id))]
    pub async fn create(&self, request: &CreateTaskRequest) -> Result<Task, ApiError> {
        let response = self.client.exchange(Self::build_create(request)?).await?;
        Self::parse_create(&response)
    }

    #[instrument(skip_all, name = "tasks.get", fields(task_id = %request.task_id))]
    pub async fn get(&self, request: &GetTaskRequest) -> Result<Task, ApiError> {
        let response = self.client.exchange(Self::build_get(request)).await?;
        Self::parse_get(&response)
    }

    #[instrument(skip_all, name = "tasks.list", fields(page = ?request.page))]
    pub async fn list(&self, request: &ListTasksRequest) -> Result<ListResponse<Task>, ApiError> {
        let response = self.client.exchange(Self::build_list(request)).await?;
        Self::parse_list(&response)
    }

    #[instrument(skip_all, name = "tasks.cancel", fields(task_id = %request.task_id))]
    pub async fn cancel(&self, request: &CancelTaskRequest) -> Result<Task, ApiError> {
        let response = self.client.exchange(Self::build_cancel(request)).await?;
        Self::parse_cancel(&response)
    }
}
