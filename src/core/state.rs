//! # Session State
//!
//! Core business state for Trident. This module contains domain state only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── provider: Arc<dyn ResponseProvider>  // reply source (simulated or Ollama)
//! ├── catalog: Catalog                     // fixed model list
//! ├── selected_model_id: String            // always a catalog id
//! ├── transcript: Transcript               // append-only message history
//! ├── is_loading: bool                     // a reply is outstanding
//! ├── panel_visible: bool                  // sources panel open
//! ├── active_references: Vec<Reference>    // what the panel shows
//! ├── status_message: String               // status bar text
//! └── error: Option<String>                // recoverable provider failure
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use std::sync::Arc;

use crate::core::catalog::{Catalog, ModelSpec};
use crate::core::message::{Reference, Transcript};
use crate::inference::ResponseProvider;

pub struct App {
    pub provider: Arc<dyn ResponseProvider>,
    pub catalog: Catalog,
    pub selected_model_id: String,
    pub transcript: Transcript,
    pub status_message: String,
    pub is_loading: bool,
    pub panel_visible: bool,
    pub active_references: Vec<Reference>,
    pub error: Option<String>,
}

impl App {
    /// Fresh session: Idle, empty history, first catalog entry selected,
    /// panel hidden.
    pub fn new(provider: Arc<dyn ResponseProvider>, catalog: Catalog) -> Self {
        let selected_model_id = catalog.first().id.clone();
        Self {
            provider,
            catalog,
            selected_model_id,
            transcript: Transcript::new(),
            status_message: String::from("Welcome to Trident!"),
            is_loading: false,
            panel_visible: false,
            active_references: Vec::new(),
            error: None,
        }
    }

    /// The currently selected model. The selection invariant (id always in
    /// the catalog) makes this infallible.
    pub fn selected_model(&self) -> &ModelSpec {
        self.catalog
            .get(&self.selected_model_id)
            .expect("selected model id is always a catalog id")
    }
}
