//! In-process remote store.
//!
//! Stores rows exactly as the REST backend would (snake_case, `null` for
//! empty strings) so the row mapping is exercised without a network. Clones
//! share one table, which lets a test keep a handle after moving the store
//! into a repository.

use crate::model::designer::{Designer, DesignerPatch};
use crate::remote::row::{from_row, to_row, DesignerRow};
use crate::remote::{RemoteError, RemoteResult, RemoteStore};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Default)]
struct MemoryTable {
    rows: Vec<DesignerRow>,
    offline: bool,
    fail_next: Option<String>,
    calls: usize,
}

/// Shared in-memory `designers` table.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRemoteStore {
    table: Rc<RefCell<MemoryTable>>,
}

impl InMemoryRemoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with `designers`.
    pub fn with_designers(designers: &[Designer]) -> Self {
        let store = Self::new();
        store.table.borrow_mut().rows = designers.iter().map(to_row).collect();
        store
    }

    /// While offline every call fails with `RemoteError::Unavailable`.
    pub fn set_offline(&self, offline: bool) {
        self.table.borrow_mut().offline = offline;
    }

    /// Makes the next call fail with an HTTP 500 carrying `message`.
    pub fn fail_next(&self, message: impl Into<String>) {
        self.table.borrow_mut().fail_next = Some(message.into());
    }

    /// Raw persisted rows, in insertion order.
    pub fn rows(&self) -> Vec<DesignerRow> {
        self.table.borrow().rows.clone()
    }

    /// Number of calls made against this store, failed ones included.
    pub fn call_count(&self) -> usize {
        self.table.borrow().calls
    }

    fn begin(&self) -> RemoteResult<()> {
        let mut table = self.table.borrow_mut();
        table.calls += 1;
        if table.offline {
            return Err(RemoteError::Unavailable("store is offline".to_string()));
        }
        if let Some(message) = table.fail_next.take() {
            return Err(RemoteError::Http {
                status: 500,
                message,
            });
        }
        Ok(())
    }
}

impl RemoteStore for InMemoryRemoteStore {
    fn list(&self) -> RemoteResult<Vec<Designer>> {
        self.begin()?;
        let mut rows = self.rows();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows.into_iter().map(from_row).collect())
    }

    fn get(&self, id: &str) -> RemoteResult<Option<Designer>> {
        self.begin()?;
        let table = self.table.borrow();
        Ok(table
            .rows
            .iter()
            .find(|row| row.id == id)
            .cloned()
            .map(from_row))
    }

    fn create(&self, designer: &Designer) -> RemoteResult<Designer> {
        self.begin()?;
        let mut table = self.table.borrow_mut();
        if table.rows.iter().any(|row| row.id == designer.id) {
            return Err(RemoteError::Http {
                status: 409,
                message: format!(
                    "duplicate key value violates unique constraint \"designers_pkey\" (id={})",
                    designer.id
                ),
            });
        }
        let row = to_row(designer);
        table.rows.push(row.clone());
        Ok(from_row(row))
    }

    fn update(
        &self,
        id: &str,
        patch: &DesignerPatch,
        last_updated: &str,
    ) -> RemoteResult<Option<Designer>> {
        self.begin()?;
        let mut table = self.table.borrow_mut();
        let Some(row) = table.rows.iter_mut().find(|row| row.id == id) else {
            return Ok(None);
        };

        let mut designer = from_row(row.clone());
        patch.apply_to(&mut designer);
        designer.last_updated = last_updated.to_string();
        *row = to_row(&designer);
        Ok(Some(from_row(row.clone())))
    }

    fn delete(&self, id: &str) -> RemoteResult<bool> {
        self.begin()?;
        let mut table = self.table.borrow_mut();
        let before = table.rows.len();
        table.rows.retain(|row| row.id != id);
        Ok(table.rows.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::InMemoryRemoteStore;
    use crate::model::designer::{DesignerDraft, DesignerPatch};
    use crate::remote::{RemoteError, RemoteStore};

    #[test]
    fn list_orders_by_name() {
        let store = InMemoryRemoteStore::with_designers(&[
            DesignerDraft::new("Mette").into_designer("2026-01-01"),
            DesignerDraft::new("Asta").into_designer("2026-01-01"),
        ]);
        let names: Vec<String> = store.list().unwrap().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["Asta", "Mette"]);
    }

    #[test]
    fn update_merges_only_patched_columns() {
        let mut draft = DesignerDraft::new("Asta Lin");
        draft.team = "Audio".to_string();
        let store = InMemoryRemoteStore::with_designers(&[draft.into_designer("2026-01-01")]);

        let patch = DesignerPatch {
            key_insight: Some("likes Rovo".to_string()),
            ..DesignerPatch::default()
        };
        let updated = store.update("asta-lin", &patch, "2026-01-05").unwrap().unwrap();

        assert_eq!(updated.team, "Audio");
        assert_eq!(updated.key_insight, "likes Rovo");
        assert_eq!(updated.last_updated, "2026-01-05");
        assert!(store.update("nobody", &patch, "2026-01-05").unwrap().is_none());
    }

    #[test]
    fn duplicate_create_is_rejected_with_conflict() {
        let designer = DesignerDraft::new("Asta Lin").into_designer("2026-01-01");
        let store = InMemoryRemoteStore::new();
        store.create(&designer).unwrap();

        let err = store.create(&designer).unwrap_err();
        assert!(matches!(err, RemoteError::Http { status: 409, .. }));
    }

    #[test]
    fn injected_failures_surface_once() {
        let store = InMemoryRemoteStore::new();
        store.fail_next("boom");
        let err = store.list().unwrap_err();
        assert_eq!(
            err,
            RemoteError::Http {
                status: 500,
                message: "boom".to_string()
            }
        );
        assert!(store.list().unwrap().is_empty());

        store.set_offline(true);
        assert!(matches!(store.delete("x"), Err(RemoteError::Unavailable(_))));
        assert_eq!(store.call_count(), 3);
    }
}
