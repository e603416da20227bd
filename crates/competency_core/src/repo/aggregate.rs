//! Derived aggregate queries over the designer collection.
//!
//! # Invariants
//! - `interviewed_count` always equals the collection length.
//! - Flattened action views keep each item's original index verbatim; that
//!   index is what positional status updates address.
//! - Frequency tables group by exact string equality.

use crate::model::designer::{ActionItem, Designer, DesignerId};
use serde::Serialize;
use std::collections::BTreeMap;

/// Number of designers the interview round aims to cover.
pub const TARGET_DESIGNER_COUNT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    pub total_designers: usize,
    pub interviewed_count: usize,
    /// Action items not yet done, across all designers.
    pub pending_actions: usize,
    /// Subset of `pending_actions` owned by the tracker's user.
    pub my_actions: usize,
    pub pain_point_counts: BTreeMap<String, usize>,
    pub goal_counts: BTreeMap<String, usize>,
}

impl SummaryStats {
    /// Most frequent pain points, highest count first, ties by text.
    pub fn top_pain_points(&self, limit: usize) -> Vec<(&str, usize)> {
        top_entries(&self.pain_point_counts, limit)
    }

    /// Most frequent goals, highest count first, ties by text.
    pub fn top_goals(&self, limit: usize) -> Vec<(&str, usize)> {
        top_entries(&self.goal_counts, limit)
    }

    pub fn below_target(&self) -> bool {
        self.interviewed_count < self.total_designers
    }
}

/// One action item annotated with its owning designer and original index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionItemView {
    pub designer_id: DesignerId,
    pub designer_name: String,
    pub action_index: usize,
    #[serde(flatten)]
    pub item: ActionItem,
}

/// Owner filter for the action list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ActionFilter {
    #[default]
    All,
    Mine,
    Owner(String),
}

impl ActionFilter {
    pub fn matches(&self, view: &ActionItemView) -> bool {
        match self {
            Self::All => true,
            Self::Mine => view.item.owner.is_me(),
            Self::Owner(owner) => view.item.owner.as_key() == owner,
        }
    }
}

pub fn summary_stats(designers: &[Designer]) -> SummaryStats {
    let mut pending_actions = 0;
    let mut my_actions = 0;
    let mut pain_point_counts = BTreeMap::new();
    let mut goal_counts = BTreeMap::new();

    for designer in designers {
        for item in designer.action_items.iter().filter(|a| !a.status.is_done()) {
            pending_actions += 1;
            if item.owner.is_me() {
                my_actions += 1;
            }
        }
        for pain in &designer.pain_points {
            *pain_point_counts.entry(pain.issue.clone()).or_insert(0) += 1;
        }
        for goal in &designer.goals {
            *goal_counts.entry(goal.goal.clone()).or_insert(0) += 1;
        }
    }

    SummaryStats {
        total_designers: TARGET_DESIGNER_COUNT,
        interviewed_count: designers.len(),
        pending_actions,
        my_actions,
        pain_point_counts,
        goal_counts,
    }
}

/// Action views for a single designer.
pub fn designer_action_items(designer: &Designer) -> Vec<ActionItemView> {
    designer
        .action_items
        .iter()
        .enumerate()
        .map(|(action_index, item)| ActionItemView {
            designer_id: designer.id.clone(),
            designer_name: designer.name.clone(),
            action_index,
            item: item.clone(),
        })
        .collect()
}

/// Flattens every designer's action items, collection order first.
pub fn all_action_items(designers: &[Designer]) -> Vec<ActionItemView> {
    designers.iter().flat_map(designer_action_items).collect()
}

pub fn filter_action_items(items: Vec<ActionItemView>, filter: &ActionFilter) -> Vec<ActionItemView> {
    items.into_iter().filter(|view| filter.matches(view)).collect()
}

fn top_entries(counts: &BTreeMap<String, usize>, limit: usize) -> Vec<(&str, usize)> {
    let mut entries: Vec<(&str, usize)> = counts
        .iter()
        .map(|(text, count)| (text.as_str(), *count))
        .collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    entries.truncate(limit);
    entries
}
