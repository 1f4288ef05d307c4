//! End-to-end client scenarios against an in-memory Joplin service
//!
//! Covers the composite operations:
//! - Creating a note with tags (note first, then per-tag resolve/create/attach)
//! - Reusing existing tags instead of creating duplicates
//! - Idempotent tag removal
//! - Append/prepend content layout
//! - Reference-checked resource deletion

use joplin_mcp::client::{MockTransport, RecordedCall};
use joplin_mcp::{JoplinApi, JoplinError, ListOptions, NewNote, ResourceDeletion};
use reqwest::Method;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

// Fake service keeping just enough state for tag and note scenarios
mod fake_service {
    use super::*;

    #[derive(Default)]
    pub struct State {
        pub tags: Vec<(String, String)>,
        pub links: Vec<(String, String)>,
        pub bodies: Vec<(String, String)>,
        pub resource_refs: Vec<(String, String)>,
        pub next_id: usize,
    }

    impl State {
        fn next_id(&mut self, prefix: &str) -> String {
            self.next_id += 1;
            format!("{prefix}-{}", self.next_id)
        }
    }

    fn not_found() -> JoplinError {
        JoplinError::Api {
            status: 404,
            body: "{\"error\":\"Not Found\"}".to_string(),
        }
    }

    fn segments(call: &RecordedCall) -> Vec<String> {
        call.path().split('/').map(str::to_string).collect()
    }

    pub fn respond(
        state: &Mutex<State>,
        call: &RecordedCall,
    ) -> joplin_mcp::Result<Option<Value>> {
        let mut state = state.lock().unwrap();
        let parts = segments(call);
        let parts: Vec<&str> = parts.iter().map(String::as_str).collect();

        match (call.method.as_str(), parts.as_slice()) {
            ("POST", ["notes"]) => {
                let body = call.body.clone().unwrap_or_default();
                let id = state.next_id("note");
                let text = body["body"].as_str().unwrap_or_default().to_string();
                state.bodies.push((id.clone(), text));
                Ok(Some(json!({"id": id, "title": body["title"]})))
            }
            ("GET", ["notes", id]) => {
                let body = state
                    .bodies
                    .iter()
                    .find(|(note, _)| note == id)
                    .map(|(_, body)| body.clone())
                    .ok_or_else(not_found)?;
                Ok(Some(json!({"id": id, "title": "Note", "body": body})))
            }
            ("PUT", ["notes", id]) => {
                let new_body = call.body.as_ref().unwrap()["body"]
                    .as_str()
                    .unwrap()
                    .to_string();
                let entry = state
                    .bodies
                    .iter_mut()
                    .find(|(note, _)| note == id)
                    .ok_or_else(not_found)?;
                entry.1 = new_body.clone();
                Ok(Some(json!({"id": id, "body": new_body})))
            }
            ("GET", ["notes", id, "tags"]) => {
                let items: Vec<Value> = state
                    .links
                    .iter()
                    .filter(|(_, note)| note == id)
                    .filter_map(|(tag, _)| state.tags.iter().find(|(t, _)| t == tag))
                    .map(|(id, title)| json!({"id": id, "title": title}))
                    .collect();
                Ok(Some(MockTransport::page(items, false)))
            }
            ("GET", ["search"]) => {
                // relevance search: substring matches, not exact ones
                let query = call.query("query").unwrap_or_default().to_lowercase();
                let items: Vec<Value> = state
                    .tags
                    .iter()
                    .filter(|(_, title)| title.to_lowercase().contains(&query))
                    .map(|(id, title)| json!({"id": id, "title": title}))
                    .collect();
                Ok(Some(MockTransport::page(items, false)))
            }
            ("POST", ["tags"]) => {
                let title = call.body.as_ref().unwrap()["title"]
                    .as_str()
                    .unwrap()
                    .to_string();
                let id = state.next_id("tag");
                state.tags.push((id.clone(), title.clone()));
                Ok(Some(json!({"id": id, "title": title})))
            }
            ("POST", ["tags", tag, "notes"]) => {
                let note = call.body.as_ref().unwrap()["id"]
                    .as_str()
                    .unwrap()
                    .to_string();
                let link = (tag.to_string(), note);
                if !state.links.contains(&link) {
                    state.links.push(link);
                }
                Ok(Some(json!({})))
            }
            ("DELETE", ["tags", tag, "notes", note]) => {
                let before = state.links.len();
                state.links.retain(|(t, n)| !(t == tag && n == note));
                if state.links.len() == before {
                    Err(not_found())
                } else {
                    Ok(None)
                }
            }
            ("GET", ["resources", id, "notes"]) => {
                let items: Vec<Value> = state
                    .resource_refs
                    .iter()
                    .filter(|(resource, _)| resource == id)
                    .map(|(_, note)| json!({"id": note}))
                    .collect();
                Ok(Some(MockTransport::page(items, false)))
            }
            ("DELETE", ["resources", _]) => Ok(None),
            _ => panic!("unexpected call {} {}", call.method, call.endpoint),
        }
    }
}

use fake_service::State;

fn fake_api(state: State) -> (JoplinApi, Arc<MockTransport>, Arc<Mutex<State>>) {
    let state = Arc::new(Mutex::new(state));
    let shared = state.clone();
    let mock = Arc::new(MockTransport::new(move |call| {
        fake_service::respond(&shared, call)
    }));
    (JoplinApi::with_transport(mock.clone(), 100), mock, state)
}

fn with_tags(tags: &[(&str, &str)]) -> State {
    State {
        tags: tags
            .iter()
            .map(|(id, title)| (id.to_string(), title.to_string()))
            .collect(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_create_note_with_new_tags_issues_dependent_calls_in_order() {
    let (api, mock, _) = fake_api(State::default());

    let created = api
        .notes()
        .create(NewNote {
            title: "Standup".to_string(),
            body: "Notes".to_string(),
            tags: Some("work, urgent".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    let calls = mock.calls();
    assert_eq!(calls.len(), 7);
    assert!(calls[0].is(&Method::POST, "notes"));
    let note_id = created.note.id.clone();

    let expected: [(Method, &str); 6] = [
        (Method::GET, "search"),
        (Method::POST, "tags"),
        (Method::POST, "tags/tag-2/notes"),
        (Method::GET, "search"),
        (Method::POST, "tags"),
        (Method::POST, "tags/tag-3/notes"),
    ];
    for (call, (method, path)) in calls[1..].iter().zip(expected.iter()) {
        assert!(
            call.is(method, path),
            "expected {method} {path}, got {} {}",
            call.method,
            call.endpoint
        );
    }

    assert_eq!(calls[1].query("query").as_deref(), Some("work"));
    assert_eq!(calls[1].query("type").as_deref(), Some("tag"));
    assert_eq!(calls[4].query("query").as_deref(), Some("urgent"));
    assert_eq!(calls[3].body, Some(json!({"id": note_id})));
    assert_eq!(calls[6].body, Some(json!({"id": note_id})));

    let titles: Vec<&str> = created.tags.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["work", "urgent"]);
}

#[tokio::test]
async fn test_existing_tag_is_reused_case_insensitively() {
    let (api, mock, state) = fake_api(with_tags(&[("t-1", "Work"), ("t-2", "workshop")]));

    let attached = api.tags().add_tags_to_note("note-9", "WORK").await.unwrap();
    assert_eq!(attached.len(), 1);
    assert_eq!(attached[0].id, "t-1");

    assert!(mock.calls_to(Method::POST, "tags").is_empty());
    assert_eq!(state.lock().unwrap().tags.len(), 2);
}

#[tokio::test]
async fn test_partial_match_does_not_count_as_existing() {
    let (api, mock, _) = fake_api(with_tags(&[("t-1", "workshop")]));

    let attached = api.tags().add_tags_to_note("note-9", "work").await.unwrap();
    assert_ne!(attached[0].id, "t-1");
    assert_eq!(mock.calls_to(Method::POST, "tags").len(), 1);
}

#[tokio::test]
async fn test_adding_tags_twice_is_safe() {
    let (api, _, state) = fake_api(State::default());

    api.tags().add_tags_to_note("note-1", "a, b").await.unwrap();
    api.tags().add_tags_to_note("note-1", "a, b").await.unwrap();

    let state = state.lock().unwrap();
    assert_eq!(state.tags.len(), 2);
    assert_eq!(state.links.len(), 2);
}

#[tokio::test]
async fn test_tag_removal_is_idempotent() {
    let mut state = with_tags(&[("t-1", "work"), ("t-2", "home")]);
    state.links = vec![
        ("t-1".to_string(), "note-1".to_string()),
        ("t-2".to_string(), "note-1".to_string()),
        ("t-1".to_string(), "note-2".to_string()),
    ];
    let (api, _, state) = fake_api(state);

    let removed = api
        .tags()
        .remove_tags_from_note("note-1", "work, nonexistent")
        .await
        .unwrap();
    assert_eq!(removed.len(), 1);

    // second run: tag exists but is no longer attached
    let removed = api
        .tags()
        .remove_tags_from_note("note-1", "work, nonexistent")
        .await
        .unwrap();
    assert!(removed.is_empty());

    let links = state.lock().unwrap().links.clone();
    assert_eq!(
        links,
        vec![
            ("t-2".to_string(), "note-1".to_string()),
            ("t-1".to_string(), "note-2".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_append_and_prepend_layout() {
    let state = State {
        bodies: vec![("note-1".to_string(), "A".to_string())],
        ..Default::default()
    };
    let (api, _, state) = fake_api(state);

    let appended = api.notes().append("note-1", "B").await.unwrap();
    assert_eq!(appended.body.as_deref(), Some("A\n\nB"));

    state.lock().unwrap().bodies[0].1 = "A".to_string();
    let prepended = api.notes().prepend("note-1", "B").await.unwrap();
    assert_eq!(prepended.body.as_deref(), Some("B\n\nA"));
}

#[tokio::test]
async fn test_get_note_merges_tags() {
    let mut state = with_tags(&[("t-1", "work")]);
    state.bodies = vec![("note-1".to_string(), "Body".to_string())];
    state.links = vec![("t-1".to_string(), "note-1".to_string())];
    let (api, mock, _) = fake_api(state);

    let note = api.notes().get("note-1", None).await.unwrap();
    assert_eq!(note.note.body.as_deref(), Some("Body"));
    assert_eq!(note.tags.len(), 1);
    assert_eq!(note.tags[0].title, "work");

    let merged = serde_json::to_value(&note).unwrap();
    assert_eq!(merged["tags"][0]["id"], "t-1");
    assert_eq!(mock.call_count(), 2);
}

#[tokio::test]
async fn test_get_missing_note_propagates_not_found() {
    let (api, _, _) = fake_api(State::default());
    let err = api.notes().get("missing", None).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_safe_delete_keeps_referenced_resource() {
    let state = State {
        resource_refs: vec![("res-1".to_string(), "note-1".to_string())],
        ..Default::default()
    };
    let (api, mock, _) = fake_api(state);

    let outcome = api.safe_delete_resource("res-1").await.unwrap();
    match outcome {
        ResourceDeletion::Blocked { referenced_by, .. } => {
            assert_eq!(referenced_by.len(), 1);
            assert_eq!(referenced_by[0].id, "note-1");
        }
        other => panic!("expected blocked deletion, got {other:?}"),
    }
    assert!(mock.calls_to(Method::DELETE, "resources/res-1").is_empty());
}

#[tokio::test]
async fn test_safe_delete_removes_unreferenced_resource_once() {
    let (api, mock, _) = fake_api(State::default());

    let outcome = api.safe_delete_resource("res-1").await.unwrap();
    assert_eq!(
        outcome,
        ResourceDeletion::Deleted {
            resource_id: "res-1".to_string()
        }
    );
    assert_eq!(mock.calls_to(Method::DELETE, "resources/res-1").len(), 1);
}

#[tokio::test]
async fn test_notes_for_tag_name_resolves_first() {
    let (api, _, _) = fake_api(with_tags(&[("t-1", "workshop")]));

    let err = api
        .tags()
        .notes_for_tag_name("work", &ListOptions::new())
        .await
        .unwrap_err();
    assert!(matches!(err, JoplinError::TagNotFound(ref name) if name == "work"));
}
