//! Resource shapes shared across API versions.
//!
//! # Design
//! v2 resources are a `metadata` block plus a resource-specific `entity`;
//! v2 lists carry their paging counters inline next to `resources`. v3 lists
//! nest the counters and navigation links in a `pagination` block. Ids are
//! kept as strings: the platform treats them as opaque.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata block of a v2 resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(rename = "guid")]
    pub id: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// Canonical URL of the resource, relative to the API root.
    #[serde(default)]
    pub url: Option<String>,
}

/// A v2 singular resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource<E> {
    pub metadata: Metadata,
    pub entity: E,
}

impl<E> Resource<E> {
    /// Check that the resource has an id and that the canonical URL, when
    /// present, ends in exactly that id.
    pub fn check_consistency(&self) -> Result<(), String> {
        let id = &self.metadata.id;
        if id.is_empty() {
            return Err("resource metadata has an empty guid".to_string());
        }
        match &self.metadata.url {
            Some(url) if url.trim_end_matches('/').rsplit('/').next() != Some(id.as_str()) => {
                Err(format!("metadata url `{url}` does not name resource `{id}`"))
            }
            _ => Ok(()),
        }
    }
}

/// A page of a v2 list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginatedResponse<R> {
    pub total_results: u32,
    pub total_pages: u32,
    #[serde(default)]
    pub prev_url: Option<String>,
    #[serde(default)]
    pub next_url: Option<String>,
    #[serde(default = "Vec::new")]
    pub resources: Vec<R>,
}

/// A hypermedia link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
}

impl Link {
    pub fn new(href: impl Into<String>) -> Self {
        Self { href: href.into() }
    }
}

/// Paging block of a v3 list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub total_results: u32,
    pub total_pages: u32,
    #[serde(default)]
    pub first: Option<Link>,
    #[serde(default)]
    pub last: Option<Link>,
    #[serde(default)]
    pub next: Option<Link>,
    #[serde(default)]
    pub previous: Option<Link>,
}

/// A page of a v3 list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListResponse<R> {
    pub pagination: Pagination,
    #[serde(default = "Vec::new")]
    pub resources: Vec<R>,
}

/// Page-shape invariants common to both list flavours.
pub(crate) trait Page {
    fn total_results(&self) -> u32;
    fn total_pages(&self) -> u32;
    fn len(&self) -> usize;
    fn has_next(&self) -> bool;

    /// Whether the page links to the first and last pages of the listing.
    fn has_bounds(&self) -> bool {
        true
    }

    fn check_consistency(&self) -> Result<(), String> {
        if self.len() as u64 > u64::from(self.total_results()) {
            return Err(format!(
                "page holds {} resources but total_results is {}",
                self.len(),
                self.total_results()
            ));
        }
        if self.total_pages() <= 1 && self.has_next() {
            return Err("single-page listing advertises a next page".to_string());
        }
        if self.total_pages() > 1 && !self.has_bounds() {
            return Err("multi-page listing is missing its first or last link".to_string());
        }
        Ok(())
    }
}

impl<R> Page for PaginatedResponse<R> {
    fn total_results(&self) -> u32 {
        self.total_results
    }
    fn total_pages(&self) -> u32 {
        self.total_pages
    }
    fn len(&self) -> usize {
        self.resources.len()
    }
    fn has_next(&self) -> bool {
        self.next_url.is_some()
    }
}

impl<R> Page for ListResponse<R> {
    fn total_results(&self) -> u32 {
        self.pagination.total_results
    }
    fn total_pages(&self) -> u32 {
        self.pagination.total_pages
    }
    fn len(&self) -> usize {
        self.resources.len()
    }
    fn has_next(&self) -> bool {
        self.pagination.next.is_some()
    }
    fn has_bounds(&self) -> bool {
        self.pagination.first.is_some() && self.pagination.last.is_some()
    }
}

/// Lifecycle state of an asynchronous job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Queued,
    Running,
    Finished,
    Failed,
}

/// Failure detail attached to a failed job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobErrorDetails {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub error_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobEntity {
    #[serde(rename = "guid")]
    pub id: String,
    pub status: JobStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_details: Option<JobErrorDetails>,
}

/// Returned instead of the operation's own result when the platform defers
/// the work. Polling it to completion is the caller's business.
pub type JobResource = Resource<JobEntity>;

/// Result of an operation the platform may run asynchronously.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// 200/201 with the resource, or 204 with `()`.
    Completed(T),
    /// 202 with a job to poll.
    Accepted(JobResource),
}

impl<T> Outcome<T> {
    pub fn job(&self) -> Option<&JobResource> {
        match self {
            Outcome::Accepted(job) => Some(job),
            Outcome::Completed(_) => None,
        }
    }

    pub fn completed(self) -> Option<T> {
        match self {
            Outcome::Completed(value) => Some(value),
            Outcome::Accepted(_) => None,
        }
    }
}

/// Error body the platform attaches to failed requests.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub error_code: Option<String>,
}
