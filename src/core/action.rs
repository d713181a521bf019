//! # Actions
//!
//! Everything that can happen in a Trident session becomes an `Action`.
//! User presses Enter? That's `Action::Submit`. The provider finishes?
//! That's `Action::ResponseArrived`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an `Effect` telling the event loop what I/O (if
//! any) to perform. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! The session is a two-state machine: Idle and AwaitingResponse, tracked
//! by `App::is_loading`. An accepted `Submit` moves Idle → AwaitingResponse;
//! `ResponseArrived`, `ResponseFailed`, and `CancelRequest` move back to
//! Idle. Every other action is legal in both states and leaves the machine
//! state alone.

use log::{debug, warn};

use crate::core::message::Reference;
use crate::core::state::App;

#[derive(Debug, Clone)]
pub enum Action {
    /// Switch the selected model to the given catalog id.
    SelectModel(String),
    /// Submit the user's text to the selected model.
    Submit(String),
    /// Flip the sources panel, when there is something to show.
    ToggleReferences,
    /// Re-open the panel on an older assistant message's references.
    ShowReferencesFor(u64),
    /// The provider produced a reply for the outstanding submission.
    ResponseArrived {
        /// Model the submission was addressed to (captured at submit time,
        /// so a mid-flight model switch cannot mislabel the reply).
        model_id: String,
        content: String,
        references: Vec<Reference>,
    },
    /// The provider failed or timed out. No assistant message is appended.
    ResponseFailed(String),
    /// Abandon the outstanding request (Esc while loading, or teardown).
    CancelRequest,
    /// Clear a displayed provider error.
    DismissError,
    Quit,
}

/// What the event loop must do after an `update()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Spawn the provider task for the just-accepted submission.
    SpawnRequest,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::SelectModel(id) => {
            if id == app.selected_model_id {
                // Re-selecting the current model changes nothing.
                return Effect::None;
            }
            let Some(model) = app.catalog.get(&id) else {
                warn!("SelectModel rejected: unknown id '{}'", id);
                app.status_message = format!("Unknown model: {}", id);
                return Effect::None;
            };
            app.status_message = format!("Switched to {} ({})", model.name, model.model_name);
            if !model.category.produces_references() {
                // Offline models never cite; the panel has nothing to show.
                app.panel_visible = false;
                app.active_references.clear();
            }
            app.selected_model_id = id;
            Effect::None
        }

        Action::Submit(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                debug!("Submit rejected: empty input");
                return Effect::None;
            }
            if app.is_loading {
                debug!("Submit rejected: a response is still pending");
                return Effect::None;
            }
            app.transcript
                .push_user(trimmed.to_string(), app.selected_model_id.clone());
            app.is_loading = true;
            app.error = None;
            app.status_message = format!("Asking {}...", app.selected_model().name);
            Effect::SpawnRequest
        }

        Action::ResponseArrived {
            model_id,
            content,
            references,
        } => {
            if !app.is_loading {
                // A cancelled or superseded request resolved late. Drop it.
                debug!("ResponseArrived ignored: no outstanding request");
                return Effect::None;
            }
            let show_panel = !references.is_empty();
            let message = app
                .transcript
                .push_assistant(content, model_id, references);
            if show_panel {
                app.active_references = message.references.clone();
                app.panel_visible = true;
            }
            app.is_loading = false;
            app.status_message = String::from("Ready");
            Effect::None
        }

        Action::ResponseFailed(reason) => {
            if !app.is_loading {
                debug!("ResponseFailed ignored: no outstanding request");
                return Effect::None;
            }
            warn!("Response failed: {}", reason);
            app.is_loading = false;
            app.error = Some(reason);
            app.status_message = String::from("Response failed");
            Effect::None
        }

        Action::CancelRequest => {
            if app.is_loading {
                app.is_loading = false;
                app.status_message = String::from("Cancelled");
            }
            Effect::None
        }

        Action::ToggleReferences => {
            let supported = app.selected_model().category.produces_references();
            if supported && !app.active_references.is_empty() {
                app.panel_visible = !app.panel_visible;
            }
            Effect::None
        }

        Action::ShowReferencesFor(message_id) => {
            match app.transcript.get(message_id) {
                Some(message) if message.has_references() => {
                    app.active_references = message.references.clone();
                    app.panel_visible = true;
                }
                _ => {
                    // Unknown id or a message without citations: not an error.
                    debug!("ShowReferencesFor({}) is a no-op", message_id);
                }
            }
            Effect::None
        }

        Action::DismissError => {
            app.error = None;
            Effect::None
        }

        Action::Quit => Effect::Quit,
    }
}
