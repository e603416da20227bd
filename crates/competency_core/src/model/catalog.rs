//! Static catalog registry.
//!
//! # Responsibility
//! - Enumerate the tracked AI tools with display metadata.
//! - Enumerate proficiency levels, goal priorities and action statuses with
//!   their labels and rendering colors.
//!
//! # Invariants
//! - The catalog is read-only; nothing mutates it at runtime.
//! - `ProficiencyLevel::rank` is strictly increasing with mastery (0..=5).
//! - Unknown level/priority/status keys resolve to `none`/`low`/`pending`.

use serde::{Deserialize, Serialize};

/// Whether a tool is provided in-house or by an outside vendor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolTier {
    Internal,
    External,
}

/// Display metadata for one catalog tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolInfo {
    pub display_name: &'static str,
    pub tier: ToolTier,
    pub description: &'static str,
}

/// Closed set of tracked tools.
///
/// Variant order is the catalog order used by every rendered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ToolKey {
    #[serde(rename = "gnpt")]
    Gnpt,
    #[serde(rename = "rovo")]
    Rovo,
    #[serde(rename = "figmaAI")]
    FigmaAi,
    #[serde(rename = "copilot")]
    Copilot,
    #[serde(rename = "miroAI")]
    MiroAi,
    #[serde(rename = "githubCopilot")]
    GithubCopilot,
    #[serde(rename = "claude")]
    Claude,
    #[serde(rename = "chatgpt")]
    Chatgpt,
    #[serde(rename = "gemini")]
    Gemini,
    #[serde(rename = "lovable")]
    Lovable,
}

impl ToolKey {
    pub const ALL: [ToolKey; 10] = [
        Self::Gnpt,
        Self::Rovo,
        Self::FigmaAi,
        Self::Copilot,
        Self::MiroAi,
        Self::GithubCopilot,
        Self::Claude,
        Self::Chatgpt,
        Self::Gemini,
        Self::Lovable,
    ];

    /// Wire key used in persisted `tool_proficiency` maps.
    pub fn as_key(self) -> &'static str {
        match self {
            Self::Gnpt => "gnpt",
            Self::Rovo => "rovo",
            Self::FigmaAi => "figmaAI",
            Self::Copilot => "copilot",
            Self::MiroAi => "miroAI",
            Self::GithubCopilot => "githubCopilot",
            Self::Claude => "claude",
            Self::Chatgpt => "chatgpt",
            Self::Gemini => "gemini",
            Self::Lovable => "lovable",
        }
    }

    /// Parses a wire key. Tools have no fallback: unknown keys are `None`.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.as_key() == value)
    }

    pub fn info(self) -> ToolInfo {
        let (display_name, tier, description) = match self {
            Self::Gnpt => ("GNPT", ToolTier::Internal, "Jabra's internal AI"),
            Self::Rovo => ("Rovo", ToolTier::Internal, "Confluence AI"),
            Self::FigmaAi => ("Figma AI", ToolTier::Internal, "Design tool AI"),
            Self::Copilot => ("M365 Copilot", ToolTier::Internal, "Microsoft 365 Copilot"),
            Self::MiroAi => ("Miro AI", ToolTier::Internal, "Collaboration board AI"),
            Self::GithubCopilot => ("GitHub Copilot", ToolTier::Internal, "Code assistant"),
            Self::Claude => ("Claude", ToolTier::External, "Anthropic AI"),
            Self::Chatgpt => ("ChatGPT", ToolTier::External, "OpenAI"),
            Self::Gemini => ("Gemini", ToolTier::External, "Google AI"),
            Self::Lovable => ("Lovable", ToolTier::External, "UI prototyping"),
        };
        ToolInfo {
            display_name,
            tier,
            description,
        }
    }
}

/// Six ordered competency tiers, `none` through `expert`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProficiencyLevel {
    #[default]
    None,
    Minimal,
    Learning,
    Occasional,
    Confident,
    Expert,
}

impl ProficiencyLevel {
    pub const ALL: [ProficiencyLevel; 6] = [
        Self::None,
        Self::Minimal,
        Self::Learning,
        Self::Occasional,
        Self::Confident,
        Self::Expert,
    ];

    pub fn as_key(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Minimal => "minimal",
            Self::Learning => "learning",
            Self::Occasional => "occasional",
            Self::Confident => "confident",
            Self::Expert => "expert",
        }
    }

    /// Resolves a key, falling back to `none` for anything unrecognized.
    pub fn from_key(value: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|level| level.as_key() == value)
            .unwrap_or_default()
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::None => "Not Using",
            Self::Minimal => "Tried Briefly",
            Self::Learning => "Learning",
            Self::Occasional => "Occasional",
            Self::Confident => "Confident",
            Self::Expert => "Expert",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::None => "#6b7280",
            Self::Minimal => "#ef4444",
            Self::Learning => "#f97316",
            Self::Occasional => "#eab308",
            Self::Confident => "#22c55e",
            Self::Expert => "#3b82f6",
        }
    }

    pub fn rank(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Minimal => 1,
            Self::Learning => 2,
            Self::Occasional => 3,
            Self::Confident => 4,
            Self::Expert => 5,
        }
    }
}

impl From<String> for ProficiencyLevel {
    fn from(value: String) -> Self {
        Self::from_key(&value)
    }
}

impl From<ProficiencyLevel> for String {
    fn from(value: ProficiencyLevel) -> Self {
        value.as_key().to_string()
    }
}

/// Goal priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    High,
    Medium,
    #[default]
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Self::High, Self::Medium, Self::Low];

    pub fn as_key(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Resolves a key, falling back to `low` for anything unrecognized.
    pub fn from_key(value: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|priority| priority.as_key() == value)
            .unwrap_or_default()
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::High => "#ef4444",
            Self::Medium => "#f97316",
            Self::Low => "#6b7280",
        }
    }
}

impl From<String> for Priority {
    fn from(value: String) -> Self {
        Self::from_key(&value)
    }
}

impl From<Priority> for String {
    fn from(value: Priority) -> Self {
        value.as_key().to_string()
    }
}

/// Three-state action item lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActionStatus {
    #[default]
    Pending,
    InProgress,
    Done,
}

impl ActionStatus {
    pub const ALL: [ActionStatus; 3] = [Self::Pending, Self::InProgress, Self::Done];

    pub fn as_key(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Done => "done",
        }
    }

    /// Resolves a key, falling back to `pending` for anything unrecognized.
    pub fn from_key(value: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|status| status.as_key() == value)
            .unwrap_or_default()
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Pending => "#6b7280",
            Self::InProgress => "#f97316",
            Self::Done => "#22c55e",
        }
    }

    pub fn is_done(self) -> bool {
        self == Self::Done
    }

    /// Binary toggle: `done` flips to `pending`, anything else to `done`.
    ///
    /// `in-progress` therefore moves forward to `done`.
    pub fn toggled(self) -> Self {
        if self.is_done() {
            Self::Pending
        } else {
            Self::Done
        }
    }
}

impl From<String> for ActionStatus {
    fn from(value: String) -> Self {
        Self::from_key(&value)
    }
}

impl From<ActionStatus> for String {
    fn from(value: ActionStatus) -> Self {
        value.as_key().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::{ActionStatus, Priority, ProficiencyLevel, ToolKey, ToolTier};

    #[test]
    fn tool_keys_roundtrip_through_wire_names() {
        for tool in ToolKey::ALL {
            assert_eq!(ToolKey::parse(tool.as_key()), Some(tool));
            let json = serde_json::to_value(tool).unwrap();
            assert_eq!(json, tool.as_key());
        }
        assert_eq!(ToolKey::parse("figmaAi"), None);
    }

    #[test]
    fn tool_tiers_split_internal_and_external() {
        let external = ToolKey::ALL
            .into_iter()
            .filter(|tool| tool.info().tier == ToolTier::External)
            .count();
        assert_eq!(external, 4);
        assert_eq!(ToolKey::GithubCopilot.info().display_name, "GitHub Copilot");
    }

    #[test]
    fn proficiency_rank_is_strictly_increasing() {
        let ranks: Vec<u8> = ProficiencyLevel::ALL.iter().map(|l| l.rank()).collect();
        assert_eq!(ranks, vec![0, 1, 2, 3, 4, 5]);
        assert!(ProficiencyLevel::Expert > ProficiencyLevel::Confident);
    }

    #[test]
    fn unknown_keys_fall_back_to_defaults() {
        assert_eq!(ProficiencyLevel::from_key("wizard"), ProficiencyLevel::None);
        assert_eq!(Priority::from_key("urgent"), Priority::Low);
        assert_eq!(ActionStatus::from_key("blocked"), ActionStatus::Pending);

        let level: ProficiencyLevel = serde_json::from_str("\"guru\"").unwrap();
        assert_eq!(level, ProficiencyLevel::None);
    }

    #[test]
    fn status_serializes_with_hyphenated_key() {
        let json = serde_json::to_string(&ActionStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
    }

    #[test]
    fn toggle_flips_end_states_and_advances_in_progress() {
        assert_eq!(ActionStatus::Done.toggled(), ActionStatus::Pending);
        assert_eq!(ActionStatus::Pending.toggled(), ActionStatus::Done);
        assert_eq!(ActionStatus::InProgress.toggled(), ActionStatus::Done);
    }
}
