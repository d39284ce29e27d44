//! Asynchronous client core for the Cloud Foundry platform API.
//!
//! # Overview
//! Each resource client (`Info`, `Services`, `SharedDomains`, `Jobs`,
//! `Tasks`) maps one REST operation to one typed method. Every operation is
//! split into a deterministic `build_*` (typed request → `HttpRequest`) and
//! `parse_*` (`HttpResponse` → typed result) pair, and an async method that
//! runs the pair over a [`Transport`] with a bearer token from a
//! [`TokenProvider`].
//!
//! # Design
//! - Requests are immutable values built by validated constructors; a
//!   missing id fails before any I/O.
//! - Operations the platform may defer return [`Outcome`]: the resource (or
//!   `()` for 204) when done, a [`JobResource`] on 202.
//! - No caching, no retries: one call is one exchange.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
mod query;
mod response;
pub mod token;
pub mod transport;
pub mod types;
pub mod v2;
pub mod v3;

pub use client::CloudFoundryClient;
pub use config::ClientConfig;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use token::{StaticToken, TokenProvider};
pub use transport::{ReqwestTransport, Transport};
pub use types::{
    JobEntity, JobErrorDetails, JobResource, JobStatus, Link, ListResponse, Metadata, Outcome,
    PaginatedResponse, Pagination, Resource,
};
