//! Tracker use-case service.
//!
//! # Responsibility
//! - Turn interview-form input into repository create/update calls.
//! - Validate free-text input the repository assumes is already checked.
//! - Provide the owner-filtered action list.
//!
//! # Invariants
//! - A newly submitted designer starts with one "Initial interview completed"
//!   progress note; edits keep the existing notes untouched.
//! - Form rows with blank text are dropped, never stored.
//! - Every catalog tool has an entry in submitted proficiency maps.
//! - An action row that came from an existing item keeps that item's key.

use crate::model::catalog::{ActionStatus, ToolKey};
use crate::model::designer::{
    ActionItem, ActionOwner, Designer, DesignerDraft, DesignerPatch,
    DesignerValidationError, Goal, PainPoint, ProgressNote, ToolProficiency,
};
use crate::remote::RemoteStore;
use crate::repo::aggregate::{filter_action_items, ActionFilter, ActionItemView};
use crate::repo::designer_repo::{DesignerRepository, RepoError, RepoResult};
use crate::repo::snapshot_repo::SnapshotStore;
use std::collections::BTreeMap;
use uuid::Uuid;

/// Progress note recorded when a designer is first added.
pub const INITIAL_NOTE: &str = "Initial interview completed";

/// Owner choice offered by the interview form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OwnerChoice {
    #[default]
    Me,
    /// The interviewed designer; resolved to their lowercased name.
    Designer,
}

/// One action row from the interview form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionDraft {
    /// Key of the stored item this row edits; `None` for a new row.
    pub key: Option<Uuid>,
    pub action: String,
    pub owner: OwnerChoice,
    pub status: ActionStatus,
}

/// Raw interview form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DesignerForm {
    pub name: String,
    pub team: String,
    pub interview_date: String,
    pub key_insight: String,
    pub tool_proficiency: BTreeMap<ToolKey, ToolProficiency>,
    pub pain_points: Vec<PainPoint>,
    pub goals: Vec<Goal>,
    pub actions: Vec<ActionDraft>,
}

impl DesignerForm {
    /// Pre-fills the edit form from a stored designer.
    ///
    /// Actions owned by someone other than me or the designer cannot be
    /// expressed by the form and come back as `Designer` rows.
    pub fn from_designer(designer: &Designer) -> Self {
        let actions = designer
            .action_items
            .iter()
            .map(|item| ActionDraft {
                key: Some(item.key),
                action: item.action.clone(),
                owner: if item.owner.is_me() {
                    OwnerChoice::Me
                } else {
                    OwnerChoice::Designer
                },
                status: item.status,
            })
            .collect();

        Self {
            name: designer.name.clone(),
            team: designer.team.clone(),
            interview_date: designer.interview_date.clone(),
            key_insight: designer.key_insight.clone(),
            tool_proficiency: designer.tool_proficiency.clone(),
            pain_points: designer.pain_points.clone(),
            goals: designer.goals.clone(),
            actions,
        }
    }

    fn into_draft(self) -> DesignerDraft {
        let designer_owner = self.name.to_lowercase();
        let tool_proficiency = ToolKey::ALL
            .into_iter()
            .map(|tool| {
                let entry = self.tool_proficiency.get(&tool).cloned().unwrap_or_default();
                (tool, entry)
            })
            .collect();
        let action_items = self
            .actions
            .into_iter()
            .filter(|draft| !draft.action.trim().is_empty())
            .map(|draft| {
                let owner = match draft.owner {
                    OwnerChoice::Me => ActionOwner::Me,
                    OwnerChoice::Designer => ActionOwner::from(designer_owner.clone()),
                };
                let mut item = ActionItem::new(draft.action, owner).with_status(draft.status);
                if let Some(key) = draft.key {
                    item.key = key;
                }
                item
            })
            .collect();

        DesignerDraft {
            name: self.name,
            team: self.team,
            interview_date: self.interview_date,
            key_insight: self.key_insight,
            tool_proficiency,
            pain_points: self
                .pain_points
                .into_iter()
                .filter(|pain| !pain.issue.trim().is_empty())
                .collect(),
            goals: self
                .goals
                .into_iter()
                .filter(|goal| !goal.goal.trim().is_empty())
                .collect(),
            action_items,
            progress_notes: Vec::new(),
        }
    }
}

/// Use-case facade over the designer repository.
pub struct TrackerService<R: RemoteStore, S: SnapshotStore> {
    repo: DesignerRepository<R, S>,
}

impl<R: RemoteStore, S: SnapshotStore> TrackerService<R, S> {
    pub fn new(repo: DesignerRepository<R, S>) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &DesignerRepository<R, S> {
        &self.repo
    }

    pub fn repository_mut(&mut self) -> &mut DesignerRepository<R, S> {
        &mut self.repo
    }

    /// Creates a designer from the form and seeds the initial progress note.
    pub fn submit_new(&mut self, form: DesignerForm) -> RepoResult<Designer> {
        let mut draft = form.into_draft();
        draft.progress_notes = vec![ProgressNote {
            date: self.repo.today(),
            note: INITIAL_NOTE.to_string(),
        }];
        self.repo.add(draft)
    }

    /// Replaces the editable fields of an existing designer from the form.
    ///
    /// Progress notes are preserved; the slug stays the same on rename.
    pub fn submit_edit(&mut self, id: &str, form: DesignerForm) -> RepoResult<Designer> {
        let draft = form.into_draft();
        draft.validate()?;
        let patch = DesignerPatch {
            name: Some(draft.name),
            team: Some(draft.team),
            interview_date: Some(draft.interview_date),
            key_insight: Some(draft.key_insight),
            tool_proficiency: Some(draft.tool_proficiency),
            pain_points: Some(draft.pain_points),
            goals: Some(draft.goals),
            action_items: Some(draft.action_items),
            progress_notes: None,
        };
        self.repo.update(id, patch)
    }

    pub fn add_note(&mut self, id: &str, text: &str) -> RepoResult<()> {
        if text.trim().is_empty() {
            return Err(DesignerValidationError::EmptyNoteText.into());
        }
        self.repo.add_progress_note(id, text)
    }

    /// Adds a pending action; a blank owner defaults to the designer's
    /// lowercased name.
    pub fn add_action(&mut self, id: &str, text: &str, owner: Option<&str>) -> RepoResult<usize> {
        if text.trim().is_empty() {
            return Err(DesignerValidationError::EmptyActionText.into());
        }
        let owner = match owner.map(str::trim).filter(|value| !value.is_empty()) {
            Some(value) => ActionOwner::from(value),
            None => {
                let designer = self
                    .repo
                    .get_by_id(id)
                    .ok_or_else(|| RepoError::NotFound(id.to_string()))?;
                ActionOwner::from(designer.name.to_lowercase())
            }
        };
        self.repo.add_action_item(id, text, owner)
    }

    pub fn toggle_action(&mut self, id: &str, index: usize) -> RepoResult<ActionStatus> {
        self.repo.toggle_action_item_status(id, index)
    }

    pub fn filter_actions(&self, filter: &ActionFilter) -> Vec<ActionItemView> {
        filter_action_items(self.repo.all_action_items(), filter)
    }

    /// Flushes the snapshot and consumes the service.
    pub fn close(self) -> RepoResult<()> {
        self.repo.close()
    }
}
