//! Designer repository: the authoritative in-memory collection.
//!
//! # Responsibility
//! - Hydrate the collection once (remote store, else local snapshot, else
//!   empty) and expose CRUD plus aggregate queries over it.
//! - Write every mutation through to the remote store, then back up the
//!   collection to the local snapshot.
//!
//! # Invariants
//! - A mutation is applied to a copy, written remotely, and only then
//!   committed in memory; readers never observe a half-applied change.
//! - Every mutation re-stamps `last_updated`.
//! - `id` values are unique within the collection and never rewritten.
//! - Snapshot write failures are logged and never fail a mutation.

use crate::db::DbError;
use crate::export::{export_json, import_json, ExportError};
use crate::model::catalog::ActionStatus;
use crate::model::designer::{
    today, ActionItem, ActionOwner, Designer, DesignerDraft, DesignerId, DesignerPatch,
    DesignerValidationError, ProgressNote,
};
use crate::remote::{RemoteError, RemoteStore};
use crate::repo::aggregate::{all_action_items, summary_stats, ActionItemView, SummaryStats};
use crate::repo::snapshot_repo::SnapshotStore;
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;
use uuid::Uuid;

/// Snapshot key holding the whole collection.
pub const SNAPSHOT_KEY: &str = "designersData";

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug)]
pub enum RepoError {
    Validation(DesignerValidationError),
    NotFound(DesignerId),
    ActionIndexOutOfRange {
        designer_id: DesignerId,
        index: usize,
        len: usize,
    },
    ActionNotFound {
        designer_id: DesignerId,
        key: Uuid,
    },
    DuplicateId(DesignerId),
    Remote(RemoteError),
    Snapshot(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "designer not found: {id}"),
            Self::ActionIndexOutOfRange {
                designer_id,
                index,
                len,
            } => write!(
                f,
                "action index {index} out of range for designer {designer_id} ({len} items)"
            ),
            Self::ActionNotFound { designer_id, key } => {
                write!(f, "action {key} not found for designer {designer_id}")
            }
            Self::DuplicateId(id) => write!(f, "designer id already exists: {id}"),
            Self::Remote(err) => write!(f, "{err}"),
            Self::Snapshot(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid snapshot data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Remote(err) => Some(err),
            Self::Snapshot(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DesignerValidationError> for RepoError {
    fn from(value: DesignerValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RemoteError> for RepoError {
    fn from(value: RemoteError) -> Self {
        Self::Remote(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Snapshot(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Snapshot(DbError::Sqlite(value))
    }
}

impl From<ExportError> for RepoError {
    fn from(value: ExportError) -> Self {
        Self::InvalidData(value.to_string())
    }
}

/// Where the collection came from when the repository was opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HydrationSource {
    Remote,
    Snapshot,
    Empty,
}

impl HydrationSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Remote => "remote",
            Self::Snapshot => "snapshot",
            Self::Empty => "empty",
        }
    }
}

/// In-memory designer collection with write-through persistence.
pub struct DesignerRepository<R: RemoteStore, S: SnapshotStore> {
    remote: R,
    snapshot: S,
    designers: Vec<Designer>,
    source: HydrationSource,
    clock: fn() -> String,
}

impl<R: RemoteStore, S: SnapshotStore> DesignerRepository<R, S> {
    /// Opens the repository; never fails.
    ///
    /// Falls back to the snapshot when the remote list fails, and to an empty
    /// collection when the snapshot is missing or unreadable too.
    pub fn open(remote: R, snapshot: S) -> Self {
        let started_at = Instant::now();
        info!("event=repo_open module=repo status=start");

        let (designers, source) = match remote.list() {
            Ok(designers) => (designers, HydrationSource::Remote),
            Err(err) => {
                warn!(
                    "event=repo_open module=repo status=fallback error_code=remote_list_failed error={}",
                    err
                );
                match load_snapshot(&snapshot) {
                    Ok(Some(designers)) => (designers, HydrationSource::Snapshot),
                    Ok(None) => (Vec::new(), HydrationSource::Empty),
                    Err(err) => {
                        warn!(
                            "event=repo_open module=repo status=fallback error_code=snapshot_load_failed error={}",
                            err
                        );
                        (Vec::new(), HydrationSource::Empty)
                    }
                }
            }
        };

        let repo = Self {
            remote,
            snapshot,
            designers,
            source,
            clock: today,
        };
        if source == HydrationSource::Remote {
            repo.backup_snapshot();
        }

        info!(
            "event=repo_open module=repo status=ok source={} count={} duration_ms={}",
            source.as_str(),
            repo.designers.len(),
            started_at.elapsed().as_millis()
        );
        repo
    }

    /// Replaces the date source used for `last_updated` stamps.
    pub fn with_clock(mut self, clock: fn() -> String) -> Self {
        self.clock = clock;
        self
    }

    /// Current stamp date as reported by the repository clock.
    pub fn today(&self) -> String {
        (self.clock)()
    }

    pub fn source(&self) -> HydrationSource {
        self.source
    }

    /// Current collection in insertion order.
    pub fn list(&self) -> &[Designer] {
        &self.designers
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Designer> {
        self.designers.iter().find(|designer| designer.id == id)
    }

    /// Creates a designer with `id = slugify(name)` and today's stamp.
    ///
    /// # Errors
    /// - `Validation` when the name is blank.
    /// - `DuplicateId` when another designer already has the same slug.
    /// - `Remote` when the store rejects the row; nothing is stored locally.
    pub fn add(&mut self, draft: DesignerDraft) -> RepoResult<Designer> {
        draft.validate()?;
        let id = draft.slug();
        if self.get_by_id(&id).is_some() {
            return Err(RepoError::DuplicateId(id));
        }

        let designer = draft.into_designer((self.clock)());
        let created = self.remote.create(&designer).map_err(|err| {
            error!(
                "event=designer_add module=repo status=error designer_id={} error={}",
                id, err
            );
            RepoError::from(err)
        })?;

        self.designers.push(created.clone());
        self.backup_snapshot();
        info!(
            "event=designer_add module=repo status=ok designer_id={} count={}",
            created.id,
            self.designers.len()
        );
        Ok(created)
    }

    /// Shallow-merges `patch` into the stored designer and re-stamps it.
    pub fn update(&mut self, id: &str, patch: DesignerPatch) -> RepoResult<Designer> {
        self.commit(id, "designer_update", patch)
    }

    /// Hard-deletes a designer.
    pub fn delete(&mut self, id: &str) -> RepoResult<()> {
        let index = self.position(id)?;
        let existed_remotely = self.remote.delete(id).map_err(|err| {
            error!(
                "event=designer_delete module=repo status=error designer_id={} error={}",
                id, err
            );
            RepoError::from(err)
        })?;
        if !existed_remotely {
            warn!("event=designer_delete module=repo status=skip designer_id={id} reason=remote_row_missing");
        }

        self.designers.remove(index);
        self.backup_snapshot();
        info!(
            "event=designer_delete module=repo status=ok designer_id={} count={}",
            id,
            self.designers.len()
        );
        Ok(())
    }

    /// Appends a progress note dated today.
    pub fn add_progress_note(&mut self, id: &str, text: impl Into<String>) -> RepoResult<()> {
        let mut notes = self.designer(id)?.progress_notes.clone();
        notes.push(ProgressNote {
            date: (self.clock)(),
            note: text.into(),
        });
        let patch = DesignerPatch {
            progress_notes: Some(notes),
            ..DesignerPatch::default()
        };
        self.commit(id, "note_add", patch).map(|_| ())
    }

    /// Appends a pending action item and returns its index.
    pub fn add_action_item(
        &mut self,
        id: &str,
        action: impl Into<String>,
        owner: ActionOwner,
    ) -> RepoResult<usize> {
        let mut items = self.designer(id)?.action_items.clone();
        items.push(ActionItem::new(action, owner));
        let index = items.len() - 1;
        let patch = DesignerPatch {
            action_items: Some(items),
            ..DesignerPatch::default()
        };
        self.commit(id, "action_add", patch)?;
        Ok(index)
    }

    /// Sets the status of the action item at `index`.
    pub fn set_action_item_status(
        &mut self,
        id: &str,
        index: usize,
        status: ActionStatus,
    ) -> RepoResult<()> {
        let mut items = self.designer(id)?.action_items.clone();
        let len = items.len();
        let item = items
            .get_mut(index)
            .ok_or_else(|| RepoError::ActionIndexOutOfRange {
                designer_id: id.to_string(),
                index,
                len,
            })?;
        item.status = status;

        let patch = DesignerPatch {
            action_items: Some(items),
            ..DesignerPatch::default()
        };
        self.commit(id, "action_status", patch).map(|_| ())
    }

    /// Sets the status of the action item with stable `key`.
    pub fn set_action_item_status_by_key(
        &mut self,
        id: &str,
        key: Uuid,
        status: ActionStatus,
    ) -> RepoResult<()> {
        let index = self
            .designer(id)?
            .action_items
            .iter()
            .position(|item| item.key == key)
            .ok_or_else(|| RepoError::ActionNotFound {
                designer_id: id.to_string(),
                key,
            })?;
        self.set_action_item_status(id, index, status)
    }

    /// Flips `done` to `pending` and anything else to `done`.
    ///
    /// Returns the new status.
    pub fn toggle_action_item_status(&mut self, id: &str, index: usize) -> RepoResult<ActionStatus> {
        let items = &self.designer(id)?.action_items;
        let current = items
            .get(index)
            .map(|item| item.status)
            .ok_or_else(|| RepoError::ActionIndexOutOfRange {
                designer_id: id.to_string(),
                index,
                len: items.len(),
            })?;
        let next = current.toggled();
        self.set_action_item_status(id, index, next)?;
        Ok(next)
    }

    pub fn summary_stats(&self) -> SummaryStats {
        summary_stats(&self.designers)
    }

    pub fn all_action_items(&self) -> Vec<ActionItemView> {
        all_action_items(&self.designers)
    }

    /// Serializes the whole collection as a pretty-printed export document.
    pub fn export_json(&self) -> RepoResult<String> {
        Ok(export_json(&self.designers)?)
    }

    /// Flushes the collection to the snapshot and releases the stores.
    pub fn close(self) -> RepoResult<()> {
        let document = export_json(&self.designers)?;
        self.snapshot.save(SNAPSHOT_KEY, &document)?;
        info!(
            "event=repo_close module=repo status=ok count={}",
            self.designers.len()
        );
        Ok(())
    }

    fn position(&self, id: &str) -> RepoResult<usize> {
        self.designers
            .iter()
            .position(|designer| designer.id == id)
            .ok_or_else(|| RepoError::NotFound(id.to_string()))
    }

    fn designer(&self, id: &str) -> RepoResult<&Designer> {
        self.get_by_id(id)
            .ok_or_else(|| RepoError::NotFound(id.to_string()))
    }

    /// Writes `patch` remotely and commits the echoed row in memory.
    fn commit(&mut self, id: &str, event: &str, patch: DesignerPatch) -> RepoResult<Designer> {
        let index = self.position(id)?;
        let stamp = (self.clock)();

        let stored = match self.remote.update(id, &patch, &stamp) {
            Ok(Some(designer)) => designer,
            Ok(None) => {
                warn!("event={event} module=repo status=error designer_id={id} error_code=remote_row_missing");
                return Err(RepoError::NotFound(id.to_string()));
            }
            Err(err) => {
                error!("event={event} module=repo status=error designer_id={id} error={err}");
                return Err(err.into());
            }
        };

        self.designers[index] = stored.clone();
        self.backup_snapshot();
        info!("event={event} module=repo status=ok designer_id={id}");
        Ok(stored)
    }

    fn backup_snapshot(&self) {
        let result = export_json(&self.designers)
            .map_err(RepoError::from)
            .and_then(|document| self.snapshot.save(SNAPSHOT_KEY, &document));
        if let Err(err) = result {
            warn!("event=snapshot_save module=repo status=error error={err}");
        }
    }
}

fn load_snapshot(snapshot: &impl SnapshotStore) -> RepoResult<Option<Vec<Designer>>> {
    match snapshot.load(SNAPSHOT_KEY)? {
        Some(document) => Ok(Some(import_json(&document)?)),
        None => Ok(None),
    }
}
