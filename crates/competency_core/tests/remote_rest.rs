use competency_core::{
    DesignerDraft, DesignerPatch, ProficiencyLevel, RemoteError, RemoteStore, RestRemoteStore,
    ToolKey,
};
use mockito::Matcher;
use serde_json::json;

const API_KEY: &str = "anon-test-key";

fn store(server: &mockito::Server) -> RestRemoteStore {
    RestRemoteStore::new(&server.url(), API_KEY).unwrap()
}

fn asta_row() -> serde_json::Value {
    json!({
        "id": "asta-lin",
        "name": "Asta Lin",
        "team": null,
        "interview_date": "2026-02-20",
        "last_updated": "2026-03-01",
        "tool_proficiency": {
            "claude": { "level": "expert", "notes": "daily" },
            "retiredTool": { "level": "learning", "notes": "" }
        },
        "pain_points": null,
        "goals": [{ "goal": "Faster prototyping", "priority": "urgent" }],
        "action_items": [{ "action": "Try GNPT", "owner": "ditte", "status": "pending" }],
        "progress_notes": [],
        "key_insight": null
    })
}

#[test]
fn resource_url_is_built_from_the_project_root() {
    let store = RestRemoteStore::new("https://example.supabase.co/", API_KEY).unwrap();
    assert_eq!(
        store.resource_url(),
        "https://example.supabase.co/rest/v1/designers"
    );
}

#[test]
fn list_sends_auth_headers_and_sorted_select() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/rest/v1/designers")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("select".into(), "*".into()),
            Matcher::UrlEncoded("order".into(), "name".into()),
        ]))
        .match_header("apikey", API_KEY)
        .match_header("authorization", format!("Bearer {API_KEY}").as_str())
        .match_header("content-type", "application/json")
        .match_header("prefer", "return=representation")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!([asta_row()]).to_string())
        .create();

    let designers = store(&server).list().unwrap();
    mock.assert();

    assert_eq!(designers.len(), 1);
    let asta = &designers[0];
    assert_eq!(asta.id, "asta-lin");
    assert_eq!(asta.team, "");
    assert_eq!(asta.key_insight, "");
    assert!(asta.pain_points.is_empty());
    assert_eq!(asta.tool_proficiency.len(), 1);
    assert_eq!(asta.proficiency(ToolKey::Claude).level, ProficiencyLevel::Expert);
    assert_eq!(asta.goals[0].priority, competency_core::Priority::Low);
    assert!(asta.action_items[0].owner.is_me());
}

#[test]
fn get_filters_by_id_and_reads_missing_row_as_none() {
    let mut server = mockito::Server::new();
    let found = server
        .mock("GET", "/rest/v1/designers")
        .match_query(Matcher::UrlEncoded("id".into(), "eq.asta-lin".into()))
        .with_status(200)
        .with_body(json!([asta_row()]).to_string())
        .create();
    let missing = server
        .mock("GET", "/rest/v1/designers")
        .match_query(Matcher::UrlEncoded("id".into(), "eq.nobody".into()))
        .with_status(200)
        .with_body("[]")
        .create();

    let store = store(&server);
    assert_eq!(store.get("asta-lin").unwrap().unwrap().name, "Asta Lin");
    assert!(store.get("nobody").unwrap().is_none());
    found.assert();
    missing.assert();
}

#[test]
fn create_posts_snake_case_row_with_nulls_for_empty_strings() {
    let mut server = mockito::Server::new();
    let designer = DesignerDraft::new("Asta Lin").into_designer("2026-03-01");
    let mock = server
        .mock("POST", "/rest/v1/designers")
        .match_body(Matcher::PartialJson(json!({
            "id": "asta-lin",
            "name": "Asta Lin",
            "team": null,
            "key_insight": null,
            "last_updated": "2026-03-01"
        })))
        .with_status(201)
        .with_body(json!([{ "id": "asta-lin", "name": "Asta Lin", "last_updated": "2026-03-01" }]).to_string())
        .create();

    let created = store(&server).create(&designer).unwrap();
    mock.assert();
    assert_eq!(created, designer);
}

#[test]
fn update_patches_only_changed_columns() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("PATCH", "/rest/v1/designers")
        .match_query(Matcher::UrlEncoded("id".into(), "eq.asta-lin".into()))
        .match_body(Matcher::Json(json!({
            "team": null,
            "last_updated": "2026-03-02"
        })))
        .with_status(200)
        .with_body(json!([{ "id": "asta-lin", "name": "Asta Lin", "last_updated": "2026-03-02" }]).to_string())
        .create();

    let patch = DesignerPatch {
        team: Some(String::new()),
        ..DesignerPatch::default()
    };
    let updated = store(&server)
        .update("asta-lin", &patch, "2026-03-02")
        .unwrap()
        .unwrap();
    mock.assert();
    assert_eq!(updated.last_updated, "2026-03-02");
}

#[test]
fn non_success_status_carries_raw_body() {
    let mut server = mockito::Server::new();
    server
        .mock("DELETE", "/rest/v1/designers")
        .match_query(Matcher::UrlEncoded("id".into(), "eq.asta-lin".into()))
        .with_status(401)
        .with_body(r#"{"message":"Invalid API key"}"#)
        .create();

    let err = store(&server).delete("asta-lin").unwrap_err();
    assert_eq!(
        err,
        RemoteError::Http {
            status: 401,
            message: r#"{"message":"Invalid API key"}"#.to_string(),
        }
    );
}

#[test]
fn empty_bodies_read_as_no_rows() {
    let mut server = mockito::Server::new();
    server
        .mock("DELETE", "/rest/v1/designers")
        .match_query(Matcher::Any)
        .with_status(204)
        .create();
    server
        .mock("POST", "/rest/v1/designers")
        .with_status(201)
        .with_body("")
        .create();

    let store = store(&server);
    assert!(!store.delete("asta-lin").unwrap());

    let designer = DesignerDraft::new("Asta Lin").into_designer("2026-03-01");
    assert_eq!(
        store.create(&designer).unwrap_err(),
        RemoteError::EmptyResponse("create")
    );
}

#[test]
fn malformed_body_is_a_decode_error() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/rest/v1/designers")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>gateway</html>")
        .create();

    assert!(matches!(store(&server).list(), Err(RemoteError::Decode(_))));
}
