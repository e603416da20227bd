//! REST-backed remote store (PostgREST-style `designers` resource).
//!
//! # Responsibility
//! - Issue list/get/create/update/delete requests with the fixed auth headers.
//! - Surface non-2xx responses with the raw response body.
//!
//! # Invariants
//! - Every request carries `apikey`, bearer `Authorization`, JSON content type
//!   and `Prefer: return=representation`.
//! - An empty response body is read as "no rows".
//! - The API key is never logged.

use crate::model::designer::{Designer, DesignerPatch};
use crate::remote::row::{from_row, patch_to_row, to_row, DesignerRow};
use crate::remote::{RemoteError, RemoteResult, RemoteStore};
use log::{debug, error};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use std::time::{Duration, Instant};

const RESOURCE_PATH: &str = "rest/v1/designers";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Blocking HTTP client for the remote `designers` table.
#[derive(Debug, Clone)]
pub struct RestRemoteStore {
    client: Client,
    resource_url: String,
}

impl RestRemoteStore {
    /// Builds a store for `base_url` (the project root, without `/rest/v1`).
    pub fn new(base_url: &str, api_key: &str) -> RemoteResult<Self> {
        Self::with_timeout(base_url, api_key, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, api_key: &str, timeout: Duration) -> RemoteResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert("apikey", header_value(api_key)?);
        headers.insert(AUTHORIZATION, header_value(&format!("Bearer {api_key}"))?);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert("Prefer", HeaderValue::from_static("return=representation"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            resource_url: format!("{}/{RESOURCE_PATH}", base_url.trim_end_matches('/')),
        })
    }

    pub fn resource_url(&self) -> &str {
        &self.resource_url
    }

    fn request(&self, method: Method) -> RequestBuilder {
        self.client.request(method, &self.resource_url)
    }

    fn send(&self, operation: &'static str, request: RequestBuilder) -> RemoteResult<Vec<DesignerRow>> {
        let started_at = Instant::now();
        debug!("event=remote_request module=remote status=start op={operation}");

        let response = request.send().map_err(|err| {
            error!(
                "event=remote_request module=remote status=error op={operation} duration_ms={} error_code=transport",
                started_at.elapsed().as_millis()
            );
            RemoteError::from(err)
        })?;

        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            error!(
                "event=remote_request module=remote status=error op={operation} duration_ms={} http_status={}",
                started_at.elapsed().as_millis(),
                status.as_u16()
            );
            return Err(RemoteError::Http {
                status: status.as_u16(),
                message: body,
            });
        }

        debug!(
            "event=remote_request module=remote status=ok op={operation} duration_ms={} http_status={}",
            started_at.elapsed().as_millis(),
            status.as_u16()
        );

        if body.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&body)?)
    }
}

impl RemoteStore for RestRemoteStore {
    fn list(&self) -> RemoteResult<Vec<Designer>> {
        let request = self
            .request(Method::GET)
            .query(&[("select", "*"), ("order", "name")]);
        let rows = self.send("list", request)?;
        Ok(rows.into_iter().map(from_row).collect())
    }

    fn get(&self, id: &str) -> RemoteResult<Option<Designer>> {
        let request = self.request(Method::GET).query(&[("id", eq_filter(id))]);
        let rows = self.send("get", request)?;
        Ok(rows.into_iter().next().map(from_row))
    }

    fn create(&self, designer: &Designer) -> RemoteResult<Designer> {
        let request = self.request(Method::POST).json(&to_row(designer));
        let rows = self.send("create", request)?;
        rows.into_iter()
            .next()
            .map(from_row)
            .ok_or(RemoteError::EmptyResponse("create"))
    }

    fn update(
        &self,
        id: &str,
        patch: &DesignerPatch,
        last_updated: &str,
    ) -> RemoteResult<Option<Designer>> {
        let request = self
            .request(Method::PATCH)
            .query(&[("id", eq_filter(id))])
            .json(&patch_to_row(patch, last_updated));
        let rows = self.send("update", request)?;
        Ok(rows.into_iter().next().map(from_row))
    }

    fn delete(&self, id: &str) -> RemoteResult<bool> {
        let request = self.request(Method::DELETE).query(&[("id", eq_filter(id))]);
        let rows = self.send("delete", request)?;
        Ok(!rows.is_empty())
    }
}

fn eq_filter(id: &str) -> String {
    format!("eq.{id}")
}

fn header_value(value: &str) -> RemoteResult<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|_| RemoteError::Transport("api key contains invalid header characters".to_string()))
}
