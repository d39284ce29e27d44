//! Fixture-replay stand-in for the Cloud Foundry API.
//!
//! # Design
//! The server knows nothing about resources. It holds a catalogue of
//! scripted routes (method + exact path and query → status, headers, body)
//! loaded from `routes.json` in the fixtures directory, and answers every
//! request by lookup. Unknown routes get the platform's 404 error body;
//! requests without a bearer token get its 401.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::{fs, io};

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderName, HeaderValue, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use serde::Deserialize;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{debug, warn};

const CATALOG_FILE: &str = "routes.json";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("reading {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("parsing {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("route {method} {path}: {reason}")]
    Route {
        method: String,
        path: String,
        reason: String,
    },
}

#[derive(Debug, Deserialize)]
struct RouteSpec {
    method: String,
    path: String,
    status: u16,
    #[serde(default)]
    response: Option<String>,
    #[serde(default)]
    headers: BTreeMap<String, String>,
}

/// One scripted exchange, with its body already loaded.
#[derive(Debug, Clone)]
pub struct Route {
    pub method: Method,
    pub path: String,
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    routes: Vec<Route>,
}

impl Catalog {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// Load `routes.json` and every fixture it references from `dir`.
    pub fn load(dir: &Path) -> Result<Self, CatalogError> {
        let path = dir.join(CATALOG_FILE);
        let raw = read(&path)?;
        let specs: Vec<RouteSpec> =
            serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
                path: path.clone(),
                source,
            })?;

        let routes = specs
            .into_iter()
            .map(|spec| spec.resolve(dir))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { routes })
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    fn find(&self, method: &Method, path: &str) -> Option<&Route> {
        self.routes
            .iter()
            .find(|route| route.method == *method && route.path == path)
    }
}

impl RouteSpec {
    fn resolve(self, dir: &Path) -> Result<Route, CatalogError> {
        let invalid = |reason: String| CatalogError::Route {
            method: self.method.clone(),
            path: self.path.clone(),
            reason,
        };
        let method =
            Method::from_bytes(self.method.as_bytes()).map_err(|e| invalid(e.to_string()))?;
        let status = StatusCode::from_u16(self.status).map_err(|e| invalid(e.to_string()))?;
        let body = self
            .response
            .as_deref()
            .map(|name| read(&dir.join(name)))
            .transpose()?;
        let mut headers = HeaderMap::new();
        for (name, value) in &self.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| invalid(format!("header `{name}`: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| invalid(format!("header `{name}`: {e}")))?;
            headers.insert(name, value);
        }
        Ok(Route {
            method,
            path: self.path,
            status,
            headers,
            body,
        })
    }
}

fn read(path: &Path) -> Result<String, CatalogError> {
    fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn app(catalog: Catalog) -> Router {
    Router::new().fallback(replay).with_state(Arc::new(catalog))
}

pub async fn run(listener: TcpListener, catalog: Catalog) -> Result<(), io::Error> {
    axum::serve(listener, app(catalog)).await
}

async fn replay(
    State(catalog): State<Arc<Catalog>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let path = uri.path_and_query().map_or(uri.path(), |pq| pq.as_str());

    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.to_ascii_lowercase().starts_with("bearer "));
    if !authorized {
        warn!(%method, path, "rejecting unauthenticated request");
        return platform_error(
            StatusCode::UNAUTHORIZED,
            1000,
            "Invalid Auth Token",
            "CF-InvalidAuthToken",
        );
    }

    let Some(route) = catalog.find(&method, path) else {
        warn!(%method, path, "no scripted route");
        return platform_error(StatusCode::NOT_FOUND, 10000, "Unknown request", "CF-NotFound");
    };
    debug!(%method, path, status = route.status.as_u16(), "replaying");

    let mut response = match &route.body {
        Some(body) => (
            route.status,
            [(header::CONTENT_TYPE, "application/json")],
            body.clone(),
        )
            .into_response(),
        None => route.status.into_response(),
    };
    response.headers_mut().extend(route.headers.clone());
    response
}

fn platform_error(status: StatusCode, code: u32, description: &str, error_code: &str) -> Response {
    let body = serde_json::json!({
        "code": code,
        "description": description,
        "error_code": error_code,
    });
    (status, axum::Json(body)).into_response()
}
