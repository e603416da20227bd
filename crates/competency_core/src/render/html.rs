//! HTML fragment renderers for the dashboard views.
//!
//! Interactive hooks are exposed as `data-*` attributes; wiring them to
//! handlers is left to the embedding page.

use crate::model::catalog::{ActionStatus, Priority, ProficiencyLevel, ToolKey};
use crate::model::designer::{ActionOwner, Designer};
use crate::repo::aggregate::{designer_action_items, ActionItemView, SummaryStats};

const ME_COLOR: &str = "#8b5cf6";
const OTHER_OWNER_COLOR: &str = "#6366f1";

/// Escapes text for use in element content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

pub fn proficiency_badge(level: ProficiencyLevel) -> String {
    let color = level.color();
    format!(
        r#"<span class="proficiency-badge" style="background-color: {color}20; color: {color}; border: 1px solid {color}40;">{}</span>"#,
        level.label()
    )
}

pub fn priority_badge(priority: Priority) -> String {
    let color = priority.color();
    format!(
        r#"<span class="priority-badge" style="background-color: {color}20; color: {color};">{}</span>"#,
        priority.label()
    )
}

pub fn status_badge(status: ActionStatus) -> String {
    let color = status.color();
    format!(
        r#"<span class="status-badge" style="background-color: {color}20; color: {color};">{}</span>"#,
        status.label()
    )
}

pub fn owner_badge(owner: &ActionOwner) -> String {
    let color = if owner.is_me() { ME_COLOR } else { OTHER_OWNER_COLOR };
    format!(
        r#"<span class="owner-badge" style="background-color: {color}20; color: {color};">{}</span>"#,
        escape(&owner.label())
    )
}

/// Designer × tool grid; missing entries render as "Not Using".
pub fn competency_matrix(designers: &[Designer]) -> String {
    let mut html = String::from(
        r#"<div class="competency-matrix-wrapper"><table class="competency-matrix"><thead><tr><th class="designer-col">Designer</th>"#,
    );
    for tool in ToolKey::ALL {
        let info = tool.info();
        html.push_str(&format!(
            r#"<th class="tool-col" title="{}">{}</th>"#,
            escape(info.description),
            escape(info.display_name)
        ));
    }
    html.push_str("</tr></thead><tbody>");

    for designer in designers {
        html.push_str(&format!(
            r##"<tr><td class="designer-name"><a href="#designer/{id}">{name}</a><span class="team-label">{team}</span></td>"##,
            id = escape(&designer.id),
            name = escape(&designer.name),
            team = escape(&designer.team)
        ));
        for tool in ToolKey::ALL {
            let proficiency = designer.proficiency(tool);
            let notes = if proficiency.notes.is_empty() {
                "No notes".to_string()
            } else {
                escape(&proficiency.notes)
            };
            html.push_str(&format!(
                r#"<td class="proficiency-cell" style="background-color: {}30;" title="{notes}">{}</td>"#,
                proficiency.level.color(),
                proficiency.level.label()
            ));
        }
        html.push_str("</tr>");
    }

    html.push_str("</tbody></table></div>");
    html
}

/// Summary card with the first open action as "Next action".
pub fn designer_card(designer: &Designer) -> String {
    let next_action = match designer.next_open_action() {
        Some(item) => format!(
            r#"<div class="top-action"><span class="action-label">Next action:</span>{}<span class="action-text">{}</span></div>"#,
            owner_badge(&item.owner),
            escape(&item.action)
        ),
        None => r#"<p class="no-actions">No pending actions</p>"#.to_string(),
    };

    format!(
        r#"<div class="designer-card glass-card clickable" data-designer-id="{id}"><div class="designer-card-header"><h3>{name}</h3><span class="team-badge">{team}</span></div><p class="key-insight">{insight}</p>{next_action}<div class="card-footer"><span class="interview-date">Interviewed: {date}</span></div></div>"#,
        id = escape(&designer.id),
        name = escape(&designer.name),
        team = escape(&designer.team),
        insight = escape(&designer.key_insight),
        date = escape(&designer.interview_date)
    )
}

/// Action rows addressed by `(designer id, action index)`.
pub fn action_items_list(items: &[ActionItemView], show_designer: bool) -> String {
    if items.is_empty() {
        return r#"<p class="empty-state">No action items</p>"#.to_string();
    }

    let mut html = String::from(r#"<div class="action-items-list">"#);
    for view in items {
        let done = view.item.status.is_done();
        let designer = if show_designer {
            format!(
                r#"<span class="action-designer">{}</span>"#,
                escape(&view.designer_name)
            )
        } else {
            String::new()
        };
        html.push_str(&format!(
            r#"<div class="action-item-row{completed}"><button class="status-toggle" data-designer-id="{id}" data-action-index="{index}" title="Toggle status">{mark}</button><div class="action-content">{designer}<span class="action-text">{text}</span></div>{owner}{status}</div>"#,
            completed = if done { " completed" } else { "" },
            id = escape(&view.designer_id),
            index = view.action_index,
            mark = if done { "✓" } else { "○" },
            text = escape(&view.item.action),
            owner = owner_badge(&view.item.owner),
            status = status_badge(view.item.status)
        ));
    }
    html.push_str("</div>");
    html
}

pub fn designer_profile(designer: &Designer) -> String {
    let id = escape(&designer.id);
    let mut html = format!(
        r#"<div class="designer-profile"><div class="profile-header glass-card"><div class="profile-title"><h1>{name}</h1><span class="team-badge large">{team}</span></div><div class="profile-meta"><span>Interviewed: {interviewed}</span><span>Updated: {updated}</span></div><button class="edit-btn" data-designer-id="{id}">Edit Profile</button></div>"#,
        name = escape(&designer.name),
        team = escape(&designer.team),
        interviewed = escape(&designer.interview_date),
        updated = escape(&designer.last_updated)
    );

    html.push_str(&format!(
        r#"<div class="profile-insight glass-card"><h3>Key Insight</h3><p>{}</p></div>"#,
        escape(&designer.key_insight)
    ));

    html.push_str(r#"<div class="profile-section glass-card"><h3>Tool Proficiency</h3><div class="tool-proficiency-grid">"#);
    for tool in ToolKey::ALL {
        let proficiency = designer.proficiency(tool);
        let notes = if proficiency.notes.is_empty() {
            String::new()
        } else {
            format!(r#"<p class="tool-notes">{}</p>"#, escape(&proficiency.notes))
        };
        html.push_str(&format!(
            r#"<div class="tool-item"><div class="tool-header"><span class="tool-name">{}</span>{}</div>{notes}</div>"#,
            escape(tool.info().display_name),
            proficiency_badge(proficiency.level)
        ));
    }
    html.push_str("</div></div>");

    html.push_str(r#"<div class="profile-section glass-card"><h3>Pain Points</h3><div class="pain-points-list">"#);
    for pain in &designer.pain_points {
        html.push_str(&format!(
            r#"<div class="pain-point-item"><strong>{}</strong><p>{}</p></div>"#,
            escape(&pain.issue),
            escape(&pain.details)
        ));
    }
    html.push_str("</div></div>");

    html.push_str(r#"<div class="profile-section glass-card"><h3>Goals</h3><div class="goals-list">"#);
    for goal in &designer.goals {
        html.push_str(&format!(
            r#"<div class="goal-item">{}<span>{}</span></div>"#,
            priority_badge(goal.priority),
            escape(&goal.goal)
        ));
    }
    html.push_str("</div></div>");

    html.push_str(&format!(
        r#"<div class="profile-section glass-card"><h3>Action Items</h3>{}<button class="add-btn" data-add-action="{id}">+ Add Action</button></div>"#,
        action_items_list(&designer_action_items(designer), false)
    ));

    html.push_str(r#"<div class="profile-section glass-card"><h3>Progress Notes</h3><div class="progress-timeline">"#);
    for note in &designer.progress_notes {
        html.push_str(&format!(
            r#"<div class="progress-note"><span class="note-date">{}</span><p>{}</p></div>"#,
            escape(&note.date),
            escape(&note.note)
        ));
    }
    html.push_str(&format!(
        r#"</div><button class="add-btn" data-add-note="{id}">+ Add Note</button></div></div>"#
    ));
    html
}

/// Dashboard landing view: stats, matrix, cards and every action.
pub fn team_overview(designers: &[Designer], stats: &SummaryStats, actions: &[ActionItemView]) -> String {
    let mut html = format!(
        r#"<div class="team-overview"><div class="stats-grid"><div class="stat-card glass-card"><span class="stat-number">{}/{}</span><span class="stat-label">Designers Interviewed</span></div><div class="stat-card glass-card"><span class="stat-number">{}</span><span class="stat-label">Pending Actions</span></div><div class="stat-card glass-card"><span class="stat-number">{}</span><span class="stat-label">My Actions</span></div></div>"#,
        stats.interviewed_count, stats.total_designers, stats.pending_actions, stats.my_actions
    );

    html.push_str(r#"<div class="section-header"><h2>Competency Matrix</h2></div>"#);
    html.push_str(&competency_matrix(designers));

    html.push_str(r#"<div class="section-header"><h2>Designers</h2></div><div class="designers-grid">"#);
    for designer in designers {
        html.push_str(&designer_card(designer));
    }
    if stats.below_target() {
        html.push_str(r#"<div class="designer-card glass-card clickable empty-card" data-add-designer="true"><span class="add-icon">+</span><span>Add Designer</span></div>"#);
    }
    html.push_str("</div>");

    html.push_str(r#"<div class="section-header"><h2>All Actions</h2><div class="filter-buttons"><button class="filter-btn active" data-filter="all">All</button><button class="filter-btn" data-filter="mine">Mine</button></div></div>"#);
    html.push_str(&action_items_list(actions, true));
    html.push_str("</div>");
    html
}
