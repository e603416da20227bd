//! Snake_case row shape used by the remote store.
//!
//! # Invariants
//! - `to_row` writes empty optional strings as `null` and stamps a missing
//!   `last_updated` with today's date.
//! - `from_row` maps `null`/absent columns to `''`, `{}` and `[]`.
//! - `from_row(to_row(d)) == d` for any designer with `last_updated` set.

use crate::model::catalog::ToolKey;
use crate::model::designer::{
    today, ActionItem, Designer, DesignerPatch, Goal, PainPoint, ProgressNote, ToolProficiency,
};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One persisted `designers` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignerRow {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub team: Option<String>,
    pub interview_date: Option<String>,
    pub last_updated: Option<String>,
    pub tool_proficiency: Option<BTreeMap<String, ToolProficiency>>,
    pub pain_points: Option<Vec<PainPoint>>,
    pub goals: Option<Vec<Goal>>,
    pub action_items: Option<Vec<ActionItem>>,
    pub progress_notes: Option<Vec<ProgressNote>>,
    pub key_insight: Option<String>,
}

/// Body of a PATCH request; only present columns are serialized.
///
/// String columns are `Option<Option<_>>` so an emptied value is sent as an
/// explicit `null` rather than being left out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DesignerPatchRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interview_date: Option<Option<String>>,
    pub last_updated: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_proficiency: Option<BTreeMap<String, ToolProficiency>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pain_points: Option<Vec<PainPoint>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goals: Option<Vec<Goal>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_items: Option<Vec<ActionItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress_notes: Option<Vec<ProgressNote>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_insight: Option<Option<String>>,
}

/// Converts an in-memory designer into its persisted row.
pub fn to_row(designer: &Designer) -> DesignerRow {
    let last_updated = if designer.last_updated.is_empty() {
        today()
    } else {
        designer.last_updated.clone()
    };

    DesignerRow {
        id: designer.id.clone(),
        name: designer.name.clone(),
        team: non_empty(&designer.team),
        interview_date: non_empty(&designer.interview_date),
        last_updated: Some(last_updated),
        tool_proficiency: Some(tools_to_row(&designer.tool_proficiency)),
        pain_points: Some(designer.pain_points.clone()),
        goals: Some(designer.goals.clone()),
        action_items: Some(designer.action_items.clone()),
        progress_notes: Some(designer.progress_notes.clone()),
        key_insight: non_empty(&designer.key_insight),
    }
}

/// Converts a persisted row into the in-memory designer shape.
///
/// Tool keys outside the catalog are dropped with a warning.
pub fn from_row(row: DesignerRow) -> Designer {
    let mut tool_proficiency = BTreeMap::new();
    for (key, proficiency) in row.tool_proficiency.unwrap_or_default() {
        match ToolKey::parse(&key) {
            Some(tool) => {
                tool_proficiency.insert(tool, proficiency);
            }
            None => warn!(
                "event=row_decode module=remote status=skip designer_id={} unknown_tool={}",
                row.id, key
            ),
        }
    }

    let mut designer = Designer {
        id: row.id,
        name: row.name,
        team: row.team.unwrap_or_default(),
        interview_date: row.interview_date.unwrap_or_default(),
        last_updated: row.last_updated.unwrap_or_default(),
        key_insight: row.key_insight.unwrap_or_default(),
        tool_proficiency,
        pain_points: row.pain_points.unwrap_or_default(),
        goals: row.goals.unwrap_or_default(),
        action_items: row.action_items.unwrap_or_default(),
        progress_notes: row.progress_notes.unwrap_or_default(),
    };
    designer.fill_missing_action_keys();
    designer
}

/// Converts a partial update into a PATCH body stamped with `last_updated`.
pub fn patch_to_row(patch: &DesignerPatch, last_updated: &str) -> DesignerPatchRow {
    DesignerPatchRow {
        name: patch.name.clone(),
        team: patch.team.as_deref().map(non_empty),
        interview_date: patch.interview_date.as_deref().map(non_empty),
        last_updated: last_updated.to_string(),
        tool_proficiency: patch.tool_proficiency.as_ref().map(tools_to_row),
        pain_points: patch.pain_points.clone(),
        goals: patch.goals.clone(),
        action_items: patch.action_items.clone(),
        progress_notes: patch.progress_notes.clone(),
        key_insight: patch.key_insight.as_deref().map(non_empty),
    }
}

fn tools_to_row(tools: &BTreeMap<ToolKey, ToolProficiency>) -> BTreeMap<String, ToolProficiency> {
    tools
        .iter()
        .map(|(tool, proficiency)| (tool.as_key().to_string(), proficiency.clone()))
        .collect()
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
