//! Core domain logic for the designer AI-competency tracker.
//! Owns the catalog, the designer record rules, persistence and rendering.

pub mod config;
pub mod db;
pub mod export;
pub mod logging;
pub mod model;
pub mod remote;
pub mod render;
pub mod repo;
pub mod service;

pub use config::{ConfigError, TrackerConfig};
pub use export::{export_json, import_json, ExportError, EXPORT_FILE_NAME};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::catalog::{ActionStatus, Priority, ProficiencyLevel, ToolKey};
pub use model::designer::{
    ActionItem, ActionOwner, Designer, DesignerDraft, DesignerId, DesignerPatch,
    DesignerValidationError, Goal, PainPoint, ProgressNote, ToolProficiency,
};
pub use remote::{InMemoryRemoteStore, RemoteError, RemoteStore, RestRemoteStore};
pub use repo::aggregate::{ActionFilter, ActionItemView, SummaryStats, TARGET_DESIGNER_COUNT};
pub use repo::designer_repo::{DesignerRepository, HydrationSource, RepoError, RepoResult};
pub use repo::snapshot_repo::{SnapshotStore, SqliteSnapshotStore};
pub use service::tracker_service::{DesignerForm, TrackerService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
