//! Designer domain model.
//!
//! # Responsibility
//! - Define the canonical record for one interviewed designer.
//! - Define the draft/patch shapes used by create and update paths.
//! - Derive the stable slug identifier from a display name.
//!
//! # Invariants
//! - `id` is `slugify(name)` at creation time and never changes afterwards.
//! - `tool_proficiency` lookups for a missing tool resolve to `none`.
//! - `last_updated` is an ISO `YYYY-MM-DD` date rewritten by every mutation.

use crate::model::catalog::{ActionStatus, Priority, ProficiencyLevel, ToolKey};
use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Slug identifier for a designer.
pub type DesignerId = String;

/// Owner value that stands for the person running the tracker.
pub const ME_OWNER: &str = "ditte";

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Lowercases `name` and collapses every whitespace run into one hyphen.
///
/// Idempotent: `slugify(&slugify(x)) == slugify(x)`.
pub fn slugify(name: &str) -> DesignerId {
    WHITESPACE_RE
        .replace_all(&name.to_lowercase(), "-")
        .into_owned()
}

/// Today's date in ISO `YYYY-MM-DD` form (UTC).
pub fn today() -> String {
    Utc::now().date_naive().format("%Y-%m-%d").to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesignerValidationError {
    EmptyName,
    EmptyActionText,
    EmptyNoteText,
}

impl Display for DesignerValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "designer name cannot be empty"),
            Self::EmptyActionText => write!(f, "action item text cannot be empty"),
            Self::EmptyNoteText => write!(f, "progress note text cannot be empty"),
        }
    }
}

impl Error for DesignerValidationError {}

/// Proficiency entry for one tool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolProficiency {
    #[serde(default)]
    pub level: ProficiencyLevel,
    #[serde(default)]
    pub notes: String,
}

impl ToolProficiency {
    pub fn new(level: ProficiencyLevel, notes: impl Into<String>) -> Self {
        Self {
            level,
            notes: notes.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PainPoint {
    pub issue: String,
    #[serde(default)]
    pub details: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub goal: String,
    #[serde(default)]
    pub priority: Priority,
}

/// Who is expected to follow up on an action item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActionOwner {
    /// The tracker's own user (`ditte` on the wire).
    Me,
    /// Anyone else, usually the designer's lowercased name.
    Other(String),
}

impl ActionOwner {
    pub fn as_key(&self) -> &str {
        match self {
            Self::Me => ME_OWNER,
            Self::Other(value) => value.as_str(),
        }
    }

    pub fn is_me(&self) -> bool {
        matches!(self, Self::Me)
    }

    /// Display label: the wire key with its first character uppercased.
    pub fn label(&self) -> String {
        let key = self.as_key();
        let mut chars = key.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl From<String> for ActionOwner {
    fn from(value: String) -> Self {
        if value == ME_OWNER {
            Self::Me
        } else {
            Self::Other(value)
        }
    }
}

impl From<&str> for ActionOwner {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<ActionOwner> for String {
    fn from(value: ActionOwner) -> Self {
        match value {
            ActionOwner::Me => ME_OWNER.to_string(),
            ActionOwner::Other(value) => value,
        }
    }
}

/// Follow-up item tied to a designer.
///
/// `key` gives each item a stable handle next to its positional index. Items
/// read without one carry the nil key until [`Designer::fill_missing_action_keys`]
/// derives it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionItem {
    #[serde(default = "Uuid::nil")]
    pub key: Uuid,
    pub action: String,
    pub owner: ActionOwner,
    #[serde(default)]
    pub status: ActionStatus,
}

impl ActionItem {
    /// Creates a pending item with a fresh stable key.
    pub fn new(action: impl Into<String>, owner: impl Into<ActionOwner>) -> Self {
        Self {
            key: Uuid::new_v4(),
            action: action.into(),
            owner: owner.into(),
            status: ActionStatus::Pending,
        }
    }

    pub fn with_status(mut self, status: ActionStatus) -> Self {
        self.status = status;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressNote {
    pub date: String,
    pub note: String,
}

/// Canonical in-memory record for one designer (camelCase on the wire).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Designer {
    pub id: DesignerId,
    pub name: String,
    #[serde(default)]
    pub team: String,
    #[serde(default)]
    pub interview_date: String,
    #[serde(default)]
    pub last_updated: String,
    #[serde(default)]
    pub key_insight: String,
    #[serde(default)]
    pub tool_proficiency: BTreeMap<ToolKey, ToolProficiency>,
    #[serde(default)]
    pub pain_points: Vec<PainPoint>,
    #[serde(default)]
    pub goals: Vec<Goal>,
    #[serde(default)]
    pub action_items: Vec<ActionItem>,
    #[serde(default)]
    pub progress_notes: Vec<ProgressNote>,
}

impl Designer {
    /// Proficiency for `tool`, defaulting to `none` with empty notes.
    pub fn proficiency(&self, tool: ToolKey) -> ToolProficiency {
        self.tool_proficiency
            .get(&tool)
            .cloned()
            .unwrap_or_default()
    }

    /// First action item that is not done yet.
    pub fn next_open_action(&self) -> Option<&ActionItem> {
        self.action_items.iter().find(|item| !item.status.is_done())
    }

    /// Replaces nil action keys with a v5 UUID of `<id>/<index>`.
    ///
    /// The derived key is the same in every session, so callers can hold on
    /// to it before the item is ever written back with its key.
    pub fn fill_missing_action_keys(&mut self) {
        for (index, item) in self.action_items.iter_mut().enumerate() {
            if item.key.is_nil() {
                item.key = derived_action_key(&self.id, index);
            }
        }
    }
}

fn derived_action_key(id: &str, index: usize) -> Uuid {
    Uuid::new_v5(&Uuid::NAMESPACE_OID, format!("{id}/{index}").as_bytes())
}

/// Input for creating a designer; `id` and `last_updated` are assigned on add.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DesignerDraft {
    pub name: String,
    pub team: String,
    pub interview_date: String,
    pub key_insight: String,
    pub tool_proficiency: BTreeMap<ToolKey, ToolProficiency>,
    pub pain_points: Vec<PainPoint>,
    pub goals: Vec<Goal>,
    pub action_items: Vec<ActionItem>,
    pub progress_notes: Vec<ProgressNote>,
}

impl DesignerDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), DesignerValidationError> {
        if self.name.trim().is_empty() {
            return Err(DesignerValidationError::EmptyName);
        }
        Ok(())
    }

    /// Slug this draft will be stored under.
    pub fn slug(&self) -> DesignerId {
        slugify(&self.name)
    }

    /// Builds the stored record with a derived id and the given stamp date.
    pub fn into_designer(self, last_updated: impl Into<String>) -> Designer {
        Designer {
            id: slugify(&self.name),
            name: self.name,
            team: self.team,
            interview_date: self.interview_date,
            last_updated: last_updated.into(),
            key_insight: self.key_insight,
            tool_proficiency: self.tool_proficiency,
            pain_points: self.pain_points,
            goals: self.goals,
            action_items: self.action_items,
            progress_notes: self.progress_notes,
        }
    }
}

/// Partial update; `Some` fields replace the stored value wholesale.
///
/// There is deliberately no `id` field: renaming keeps the original slug.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DesignerPatch {
    pub name: Option<String>,
    pub team: Option<String>,
    pub interview_date: Option<String>,
    pub key_insight: Option<String>,
    pub tool_proficiency: Option<BTreeMap<ToolKey, ToolProficiency>>,
    pub pain_points: Option<Vec<PainPoint>>,
    pub goals: Option<Vec<Goal>>,
    pub action_items: Option<Vec<ActionItem>>,
    pub progress_notes: Option<Vec<ProgressNote>>,
}

impl DesignerPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Shallow-merges this patch into `designer`.
    pub fn apply_to(&self, designer: &mut Designer) {
        if let Some(value) = &self.name {
            designer.name = value.clone();
        }
        if let Some(value) = &self.team {
            designer.team = value.clone();
        }
        if let Some(value) = &self.interview_date {
            designer.interview_date = value.clone();
        }
        if let Some(value) = &self.key_insight {
            designer.key_insight = value.clone();
        }
        if let Some(value) = &self.tool_proficiency {
            designer.tool_proficiency = value.clone();
        }
        if let Some(value) = &self.pain_points {
            designer.pain_points = value.clone();
        }
        if let Some(value) = &self.goals {
            designer.goals = value.clone();
        }
        if let Some(value) = &self.action_items {
            designer.action_items = value.clone();
        }
        if let Some(value) = &self.progress_notes {
            designer.progress_notes = value.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{slugify, ActionOwner, Designer, DesignerDraft, DesignerPatch, PainPoint};
    use crate::model::catalog::{ProficiencyLevel, ToolKey};

    #[test]
    fn slugify_lowercases_and_hyphenates_whitespace_runs() {
        assert_eq!(slugify("Asta Lin"), "asta-lin");
        assert_eq!(slugify("Mette  Bo\tHansen"), "mette-bo-hansen");
    }

    #[test]
    fn slugify_is_idempotent() {
        for name in ["Asta Lin", "  padded name ", "ÅSE Ødegård", "x"] {
            let once = slugify(name);
            assert_eq!(slugify(&once), once);
        }
    }

    #[test]
    fn owner_maps_me_value_and_capitalizes_label() {
        assert_eq!(ActionOwner::from("ditte"), ActionOwner::Me);
        assert_eq!(ActionOwner::Me.label(), "Ditte");
        assert_eq!(ActionOwner::from("asta lin").label(), "Asta lin");
        assert_eq!(ActionOwner::Other(String::new()).label(), "");
    }

    #[test]
    fn missing_tool_resolves_to_none_level() {
        let designer = DesignerDraft::new("Asta Lin").into_designer("2026-01-01");
        let prof = designer.proficiency(ToolKey::Claude);
        assert_eq!(prof.level, ProficiencyLevel::None);
        assert!(prof.notes.is_empty());
    }

    #[test]
    fn patch_replaces_arrays_wholesale_and_keeps_other_fields() {
        let mut designer: Designer = DesignerDraft {
            name: "Asta Lin".to_string(),
            team: "Audio".to_string(),
            pain_points: vec![
                PainPoint {
                    issue: "a".to_string(),
                    details: String::new(),
                },
                PainPoint {
                    issue: "b".to_string(),
                    details: String::new(),
                },
            ],
            ..DesignerDraft::default()
        }
        .into_designer("2026-01-01");

        let patch = DesignerPatch {
            name: Some("Asta Lindqvist".to_string()),
            pain_points: Some(vec![PainPoint {
                issue: "c".to_string(),
                details: "only".to_string(),
            }]),
            ..DesignerPatch::default()
        };
        patch.apply_to(&mut designer);

        assert_eq!(designer.id, "asta-lin");
        assert_eq!(designer.name, "Asta Lindqvist");
        assert_eq!(designer.team, "Audio");
        assert_eq!(designer.pain_points.len(), 1);
        assert_eq!(designer.pain_points[0].issue, "c");
    }

    #[test]
    fn designer_serializes_camel_case_fields() {
        let designer = DesignerDraft::new("Asta Lin").into_designer("2026-01-01");
        let json = serde_json::to_value(&designer).unwrap();
        assert_eq!(json["id"], "asta-lin");
        assert_eq!(json["lastUpdated"], "2026-01-01");
        assert!(json["toolProficiency"].is_object());
        assert!(json["progressNotes"].is_array());
    }
}
