use competency_core::db::open_db_in_memory;
use competency_core::service::tracker_service::{ActionDraft, OwnerChoice, INITIAL_NOTE};
use competency_core::{
    ActionFilter, ActionStatus, DesignerForm, DesignerRepository, DesignerValidationError, Goal,
    InMemoryRemoteStore, PainPoint, Priority, ProficiencyLevel, RepoError, SqliteSnapshotStore,
    ToolKey, ToolProficiency, TrackerService,
};

type Service = TrackerService<InMemoryRemoteStore, SqliteSnapshotStore>;

fn fixed_day() -> String {
    "2026-04-10".to_string()
}

fn service(remote: &InMemoryRemoteStore) -> Service {
    let snapshot = SqliteSnapshotStore::new(open_db_in_memory().unwrap());
    TrackerService::new(DesignerRepository::open(remote.clone(), snapshot).with_clock(fixed_day))
}

fn interview(name: &str) -> DesignerForm {
    let mut form = DesignerForm {
        name: name.to_string(),
        team: "Video".to_string(),
        interview_date: "2026-04-09".to_string(),
        key_insight: "Prompts in Figma".to_string(),
        ..DesignerForm::default()
    };
    form.tool_proficiency.insert(
        ToolKey::FigmaAi,
        ToolProficiency::new(ProficiencyLevel::Confident, "auto layout"),
    );
    form.pain_points = vec![
        PainPoint {
            issue: "Slow exports".to_string(),
            details: String::new(),
        },
        PainPoint {
            issue: "  ".to_string(),
            details: "ignored".to_string(),
        },
    ];
    form.goals = vec![
        Goal {
            goal: "Learn Lovable".to_string(),
            priority: Priority::Medium,
        },
        Goal {
            goal: String::new(),
            priority: Priority::High,
        },
    ];
    form.actions = vec![
        ActionDraft {
            key: None,
            action: "Send Lovable invite".to_string(),
            owner: OwnerChoice::Me,
            status: ActionStatus::Pending,
        },
        ActionDraft {
            key: None,
            action: "Try Rovo for research".to_string(),
            owner: OwnerChoice::Designer,
            status: ActionStatus::InProgress,
        },
        ActionDraft {
            key: None,
            action: String::new(),
            owner: OwnerChoice::Me,
            status: ActionStatus::Pending,
        },
    ];
    form
}

#[test]
fn submit_new_seeds_initial_note_and_skips_blank_rows() {
    let remote = InMemoryRemoteStore::new();
    let mut service = service(&remote);

    let designer = service.submit_new(interview("Jonas Berg")).unwrap();

    assert_eq!(designer.id, "jonas-berg");
    assert_eq!(designer.progress_notes.len(), 1);
    assert_eq!(designer.progress_notes[0].note, INITIAL_NOTE);
    assert_eq!(designer.progress_notes[0].date, "2026-04-10");
    assert_eq!(designer.tool_proficiency.len(), ToolKey::ALL.len());
    assert_eq!(designer.proficiency(ToolKey::Gemini).level, ProficiencyLevel::None);
    assert_eq!(designer.pain_points.len(), 1);
    assert_eq!(designer.goals.len(), 1);
    assert_eq!(designer.action_items.len(), 2);
    assert!(designer.action_items[0].owner.is_me());
    assert_eq!(designer.action_items[1].owner.as_key(), "jonas berg");
}

#[test]
fn submit_edit_keeps_progress_notes() {
    let remote = InMemoryRemoteStore::new();
    let mut service = service(&remote);
    service.submit_new(interview("Jonas Berg")).unwrap();
    service.add_note("jonas-berg", "Shared prompt sheet").unwrap();

    let mut form = interview("Jonas Berg");
    form.team = "Audio".to_string();
    form.actions.clear();
    let edited = service.submit_edit("jonas-berg", form).unwrap();

    assert_eq!(edited.team, "Audio");
    assert!(edited.action_items.is_empty());
    let notes: Vec<&str> = edited.progress_notes.iter().map(|n| n.note.as_str()).collect();
    assert_eq!(notes, vec![INITIAL_NOTE, "Shared prompt sheet"]);
}

#[test]
fn blank_text_is_rejected_before_reaching_the_store() {
    let remote = InMemoryRemoteStore::new();
    let mut service = service(&remote);
    service.submit_new(interview("Jonas Berg")).unwrap();
    let calls = remote.call_count();

    assert!(matches!(
        service.add_note("jonas-berg", "   "),
        Err(RepoError::Validation(DesignerValidationError::EmptyNoteText))
    ));
    assert!(matches!(
        service.add_action("jonas-berg", "", None),
        Err(RepoError::Validation(DesignerValidationError::EmptyActionText))
    ));
    assert!(matches!(
        service.submit_new(interview(" ")),
        Err(RepoError::Validation(DesignerValidationError::EmptyName))
    ));
    assert_eq!(remote.call_count(), calls);
}

#[test]
fn add_action_defaults_owner_to_designer() {
    let remote = InMemoryRemoteStore::new();
    let mut service = service(&remote);
    service.submit_new(interview("Jonas Berg")).unwrap();

    let defaulted = service.add_action("jonas-berg", "Demo Copilot", Some(" ")).unwrap();
    let mine = service.add_action("jonas-berg", "Book follow-up", Some("ditte")).unwrap();

    let designer = service.repository().get_by_id("jonas-berg").unwrap();
    assert_eq!(designer.action_items[defaulted].owner.as_key(), "jonas berg");
    assert!(designer.action_items[mine].owner.is_me());
    assert!(matches!(
        service.add_action("nobody", "x", None),
        Err(RepoError::NotFound(_))
    ));
}

#[test]
fn filter_actions_by_owner() {
    let remote = InMemoryRemoteStore::new();
    let mut service = service(&remote);
    service.submit_new(interview("Jonas Berg")).unwrap();
    service.submit_new(interview("Asta Lin")).unwrap();

    assert_eq!(service.filter_actions(&ActionFilter::All).len(), 4);
    let mine = service.filter_actions(&ActionFilter::Mine);
    assert_eq!(mine.len(), 2);
    assert!(mine.iter().all(|view| view.item.owner.is_me()));

    let asta = service.filter_actions(&ActionFilter::Owner("asta lin".to_string()));
    assert_eq!(asta.len(), 1);
    assert_eq!(asta[0].designer_id, "asta-lin");
    assert_eq!(asta[0].action_index, 1);

    assert_eq!(service.toggle_action("asta-lin", 1).unwrap(), ActionStatus::Done);
    service.close().unwrap();
}

#[test]
fn edit_form_keeps_action_keys_addressable() {
    let remote = InMemoryRemoteStore::new();
    let mut service = service(&remote);
    let created = service.submit_new(interview("Asta Lin")).unwrap();
    let keys: Vec<_> = created.action_items.iter().map(|item| item.key).collect();

    let mut form = DesignerForm::from_designer(&created);
    form.team = "Audio".to_string();
    form.actions.push(ActionDraft {
        key: None,
        action: "Pair on Copilot".to_string(),
        owner: OwnerChoice::Me,
        status: ActionStatus::Pending,
    });
    let edited = service.submit_edit("asta-lin", form).unwrap();

    assert_eq!(edited.team, "Audio");
    assert_eq!(edited.action_items.len(), 3);
    assert_eq!(edited.action_items[0].key, keys[0]);
    assert_eq!(edited.action_items[1].key, keys[1]);
    assert_eq!(edited.action_items[1].owner.as_key(), "asta lin");
    assert!(!keys.contains(&edited.action_items[2].key));

    service
        .repository_mut()
        .set_action_item_status_by_key("asta-lin", keys[0], ActionStatus::Done)
        .unwrap();
    let designer = service.repository().get_by_id("asta-lin").unwrap();
    assert_eq!(designer.action_items[0].status, ActionStatus::Done);
}
