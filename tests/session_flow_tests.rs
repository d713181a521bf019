//! End-to-end session flows: reducer + simulated provider, no terminal.
//!
//! Each test drives the same loop the TUI runs: feed `Submit` to the
//! reducer, run the provider for the submitted prompt, feed the result
//! back in as `ResponseArrived`.

use std::sync::Arc;
use std::time::Duration;

use trident::core::action::{Action, Effect, update};
use trident::core::catalog::Catalog;
use trident::core::message::Role;
use trident::core::state::App;
use trident::inference::{ResponseProvider, ResponseRequest, SimulatedProvider};

fn test_app() -> App {
    App::new(
        Arc::new(SimulatedProvider::new(Duration::ZERO)),
        Catalog::builtin(),
    )
}

/// Run the outstanding submission through the provider and deliver the
/// reply, the way the event loop's spawned task does.
async fn resolve_pending(app: &mut App) {
    assert!(app.is_loading, "no outstanding submission to resolve");
    let prompt = app.transcript.last().unwrap().content.clone();
    let model = app.selected_model().clone();

    let reply = app
        .provider
        .generate(ResponseRequest {
            prompt: &prompt,
            model: &model,
        })
        .await
        .unwrap();

    update(
        app,
        Action::ResponseArrived {
            model_id: model.id,
            content: reply.content,
            references: reply.references,
        },
    );
}

#[tokio::test]
async fn test_offline_flow_appends_pair_without_references() {
    let mut app = test_app();
    update(&mut app, Action::SelectModel("local".to_string()));

    let effect = update(&mut app, Action::Submit("sort a linked list".to_string()));
    assert_eq!(effect, Effect::SpawnRequest);
    assert!(app.is_loading);

    resolve_pending(&mut app).await;

    assert!(!app.is_loading);
    assert_eq!(app.transcript.len(), 2);
    let reply = app.transcript.last().unwrap();
    assert_eq!(reply.role, Role::Assistant);
    assert_eq!(reply.model_id, "local");
    assert!(!reply.has_references());
    assert!(!app.panel_visible);
    assert!(app.active_references.is_empty());
}

#[tokio::test]
async fn test_grounded_flow_opens_panel_on_reply() {
    let mut app = test_app();
    update(&mut app, Action::SelectModel("search".to_string()));
    update(&mut app, Action::Submit("vector databases".to_string()));

    resolve_pending(&mut app).await;

    let reply = app.transcript.last().unwrap();
    assert_eq!(reply.references.len(), 5, "web search pool");
    assert!(app.panel_visible);
    assert_eq!(app.active_references, reply.references);
    assert!(reply.content.contains("vector databases"));
}

#[tokio::test]
async fn test_submissions_rejected_while_response_pending() {
    let mut app = test_app();
    update(&mut app, Action::Submit("first".to_string()));

    // Hammer Enter while the reply is outstanding.
    for _ in 0..5 {
        let effect = update(&mut app, Action::Submit("again".to_string()));
        assert_eq!(effect, Effect::None);
    }

    resolve_pending(&mut app).await;

    assert_eq!(app.transcript.len(), 2, "exactly one exchange");
    assert_eq!(app.transcript.count_role(Role::User), 1);
}

#[tokio::test]
async fn test_show_references_for_older_message_across_models() {
    let mut app = test_app();

    // First exchange with the entity model (3-reference pool).
    update(&mut app, Action::SelectModel("entity".to_string()));
    update(&mut app, Action::Submit("extract names".to_string()));
    resolve_pending(&mut app).await;
    let entity_reply_id = app.transcript.last().unwrap().id;
    let entity_refs = app.transcript.last().unwrap().references.clone();
    assert_eq!(entity_refs.len(), 3);

    // Second exchange with the search model (5-reference pool).
    update(&mut app, Action::SelectModel("search".to_string()));
    update(&mut app, Action::Submit("find docs".to_string()));
    resolve_pending(&mut app).await;
    assert_eq!(app.active_references.len(), 5);

    // Jump back to the older reply's sources.
    update(&mut app, Action::ShowReferencesFor(entity_reply_id));
    assert!(app.panel_visible);
    assert_eq!(app.active_references, entity_refs);
}

#[tokio::test]
async fn test_cancel_then_resubmit_recovers() {
    let mut app = test_app();
    update(&mut app, Action::Submit("first".to_string()));
    update(&mut app, Action::CancelRequest);
    assert!(!app.is_loading);
    assert_eq!(app.transcript.len(), 1);

    // The session accepts new work after a cancel.
    let effect = update(&mut app, Action::Submit("second".to_string()));
    assert_eq!(effect, Effect::SpawnRequest);
    resolve_pending(&mut app).await;
    assert_eq!(app.transcript.len(), 3);
    assert_eq!(app.transcript.count_role(Role::Assistant), 1);
}

#[tokio::test]
async fn test_toggle_references_after_grounded_reply() {
    let mut app = test_app();
    update(&mut app, Action::SelectModel("search".to_string()));
    update(&mut app, Action::Submit("q".to_string()));
    resolve_pending(&mut app).await;
    assert!(app.panel_visible);

    update(&mut app, Action::ToggleReferences);
    assert!(!app.panel_visible);
    update(&mut app, Action::ToggleReferences);
    assert!(app.panel_visible);

    // Switching to the offline model force-hides and clears.
    update(&mut app, Action::SelectModel("local".to_string()));
    assert!(!app.panel_visible);
    assert!(app.active_references.is_empty());
    update(&mut app, Action::ToggleReferences);
    assert!(!app.panel_visible, "offline models never show the panel");
}
