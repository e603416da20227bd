//! Remote store adapter.
//!
//! # Responsibility
//! - Define the CRUD contract against the remote `designers` resource.
//! - Translate between the camelCase `Designer` and the snake_case row shape.
//!
//! # Invariants
//! - No caching: every call round-trips to the backing store.
//! - Any non-success response surfaces as `RemoteError` carrying the raw
//!   server message; there is no partial success.

use crate::model::designer::{Designer, DesignerPatch};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory;
pub mod rest;
pub mod row;

pub use memory::InMemoryRemoteStore;
pub use rest::RestRemoteStore;
pub use row::{from_row, patch_to_row, to_row, DesignerPatchRow, DesignerRow};

pub type RemoteResult<T> = Result<T, RemoteError>;

/// Failure talking to the remote store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    /// Non-2xx response; `message` is the raw response body.
    Http { status: u16, message: String },
    /// Connection, TLS or timeout failure before a response arrived.
    Transport(String),
    /// Response body was not the expected row array.
    Decode(String),
    /// The store answered without the row the operation must echo.
    EmptyResponse(&'static str),
    /// The store is switched off (in-memory store only).
    Unavailable(String),
}

impl Display for RemoteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http { status, message } => {
                write!(f, "remote store error (HTTP {status}): {message}")
            }
            Self::Transport(message) => write!(f, "remote store unreachable: {message}"),
            Self::Decode(message) => write!(f, "invalid remote store response: {message}"),
            Self::EmptyResponse(operation) => {
                write!(f, "remote store returned no row for {operation}")
            }
            Self::Unavailable(message) => write!(f, "remote store unavailable: {message}"),
        }
    }
}

impl Error for RemoteError {}

impl From<reqwest::Error> for RemoteError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(value.to_string())
    }
}

impl From<serde_json::Error> for RemoteError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value.to_string())
    }
}

/// CRUD contract for the remote `designers` resource.
pub trait RemoteStore {
    /// Lists every designer ordered by name.
    fn list(&self) -> RemoteResult<Vec<Designer>>;
    /// Gets one designer; `None` when no row matches.
    fn get(&self, id: &str) -> RemoteResult<Option<Designer>>;
    /// Creates one designer and returns the row the store echoes back.
    fn create(&self, designer: &Designer) -> RemoteResult<Designer>;
    /// Applies a partial update stamped with `last_updated`.
    ///
    /// Returns `None` when no row matches `id`.
    fn update(
        &self,
        id: &str,
        patch: &DesignerPatch,
        last_updated: &str,
    ) -> RemoteResult<Option<Designer>>;
    /// Deletes one designer; `false` when no row matched.
    fn delete(&self, id: &str) -> RemoteResult<bool>;
}
