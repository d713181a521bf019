//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Animating** (landing page, loading spinner): draws every ~80ms.
//! - **Idle** (conversation, no input): sleeps up to 500ms, only redraws on
//!   events or terminal resize.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call, making blinking cursors appear erratic during continuous
//! redraws.

mod component;
mod components;
mod event;
mod ui;

use std::io::stdout;
use std::sync::{Arc, mpsc};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use log::{debug, info, warn};

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::export;
use crate::core::state::App;
use crate::inference::{
    OllamaProvider, ResponseProvider, ResponseRequest, SimulatedProvider,
};
use crate::tui::component::EventHandler;
use crate::tui::components::{
    InputBox, InputEvent, MessageListEvent, MessageListState, ModelPickerEvent, ModelPickerState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Hard ceiling on a single provider round trip.
const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(120);

/// Modal input mode: determines how keyboard events are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Navigate messages with arrow keys. Typing auto-switches to Input.
    Cursor,
    /// Text editing in the input box. Esc switches to Cursor.
    Input,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    // Persistent component states
    pub message_list: MessageListState,
    pub input_box: InputBox,
    // Modal input mode
    pub input_mode: InputMode,
    // Model picker overlay (None = hidden)
    pub model_picker: Option<ModelPickerState>,
}

impl TuiState {
    pub fn new(app: &App) -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(app.selected_model().name.clone()),
            input_mode: InputMode::Input, // User expects to type immediately
            model_picker: None,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture, // Scroll wheel over the transcript
            EnableBracketedPaste,
            Show,                        // Show cursor for input editing
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset from continuous redraws
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide // Hide cursor on exit
        );
    }
}

/// Build a provider from a resolved config's provider name.
pub fn build_provider(config: &ResolvedConfig) -> Arc<dyn ResponseProvider> {
    match config.provider.as_str() {
        "ollama" => Arc::new(OllamaProvider::new(Some(config.ollama_base_url.clone()))),
        _ => {
            // Default to the simulated provider
            Arc::new(SimulatedProvider::new(std::time::Duration::from_millis(
                config.response_delay_ms,
            )))
        }
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let provider = build_provider(&config);
    let mut app = App::new(provider, config.catalog.clone());

    // Startup model from config, applied through the reducer so the
    // selection invariant holds.
    if let Some(ref id) = config.default_model {
        update(&mut app, Action::SelectModel(id.clone()));
        app.status_message = String::from("Welcome to Trident!");
    }

    let mut tui = TuiState::new(&app);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    // Abort handle for the outstanding request (used by Escape-to-cancel)
    let mut active_abort_handle: Option<tokio::task::AbortHandle> = None;

    let start_time = std::time::Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        // Sync InputBox props with App/TUI state
        tui.input_box.model_name = app.selected_model().name.clone();
        tui.input_box.dimmed = matches!(tui.input_mode, InputMode::Cursor);
        tui.input_box.loading = app.is_loading;

        let animating = app.is_loading || app.transcript.is_empty();
        if animating {
            needs_redraw = true;
        }

        // Only draw when something changed
        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating (~12fps), long when idle
        let timeout = if animating {
            std::time::Duration::from_millis(80)
        } else {
            std::time::Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            // Resize just needs a redraw (already flagged above)
            if matches!(event, TuiEvent::Resize) {
                continue;
            }

            // ForceQuit (Ctrl+C) always quits regardless of mode
            if matches!(event, TuiEvent::ForceQuit) {
                if update(&mut app, Action::Quit) == Effect::Quit {
                    should_quit = true;
                }
                continue;
            }

            // When the model picker is open, route all events to it
            if let Some(ref mut picker) = tui.model_picker {
                if let Some(picker_event) = picker.handle_event(&event) {
                    match picker_event {
                        ModelPickerEvent::Select(id) => {
                            update(&mut app, Action::SelectModel(id));
                            tui.model_picker = None;
                        }
                        ModelPickerEvent::Dismiss => {
                            tui.model_picker = None;
                        }
                    }
                }
                continue;
            }

            // Ctrl+P opens the model picker
            if matches!(event, TuiEvent::OpenModelPicker) {
                tui.model_picker = Some(ModelPickerState::new(
                    app.catalog.to_vec(),
                    &app.selected_model_id,
                ));
                continue;
            }

            // Ctrl+S toggles the sources panel
            if matches!(event, TuiEvent::ToggleSources) {
                update(&mut app, Action::ToggleReferences);
                continue;
            }

            // Ctrl+E exports the transcript
            if matches!(event, TuiEvent::ExportTranscript) {
                match export::export_transcript(&app.transcript, &app.catalog) {
                    Ok(path) => {
                        app.status_message = format!("Exported to {}", path.display());
                    }
                    Err(e) => {
                        warn!("Export failed: {}", e);
                        app.status_message = format!("Export failed: {}", e);
                    }
                }
                continue;
            }

            // Scroll events always go to MessageList regardless of mode
            if matches!(
                event,
                TuiEvent::ScrollUp
                    | TuiEvent::ScrollDown
                    | TuiEvent::ScrollPageUp
                    | TuiEvent::ScrollPageDown
            ) {
                tui.message_list.handle_event(&event);
                continue;
            }

            // Esc priority: cancel an outstanding request, then dismiss a
            // displayed error, then fall through to mode switching.
            if matches!(event, TuiEvent::Escape) {
                if app.is_loading {
                    if let Some(handle) = active_abort_handle.take() {
                        handle.abort();
                    }
                    update(&mut app, Action::CancelRequest);
                    continue;
                }
                if app.error.is_some() {
                    update(&mut app, Action::DismissError);
                    continue;
                }
            }

            // Modal event dispatch
            match tui.input_mode {
                InputMode::Input => {
                    // Esc → switch to Cursor mode, selecting the last message
                    if matches!(event, TuiEvent::Escape) {
                        tui.input_mode = InputMode::Cursor;
                        let len = app.transcript.len();
                        tui.message_list.selected_index =
                            if len > 0 { Some(len - 1) } else { None };
                        continue;
                    }

                    // InputBox handles everything else
                    if let Some(input_event) = tui.input_box.handle_event(&event) {
                        match input_event {
                            InputEvent::Submit(text) => {
                                if update(&mut app, Action::Submit(text)) == Effect::SpawnRequest {
                                    active_abort_handle = Some(spawn_request(&app, tx.clone()));
                                }
                            }
                            InputEvent::ContentChanged => {}
                        }
                    }
                }
                InputMode::Cursor => match event {
                    // Esc in Cursor mode returns to the input box
                    TuiEvent::Escape => {
                        tui.input_mode = InputMode::Input;
                        tui.message_list.selected_index = None;
                    }
                    // Typing auto-switches to Input mode and forwards the event
                    TuiEvent::InputChar(_) | TuiEvent::Paste(_) => {
                        tui.input_mode = InputMode::Input;
                        tui.message_list.selected_index = None;
                        tui.input_box.handle_event(&event);
                    }
                    // Up/Down walk the transcript
                    TuiEvent::CursorUp => {
                        tui.message_list.select_prev(app.transcript.len());
                    }
                    TuiEvent::CursorDown => {
                        tui.message_list.select_next(app.transcript.len());
                    }
                    // Enter re-opens the panel on the selected message's sources
                    TuiEvent::Submit => {
                        if let Some(MessageListEvent::Activate(index)) =
                            tui.message_list.handle_event(&event)
                        {
                            activate_message(&mut app, index);
                        }
                    }
                    _ => {}
                },
            }
        }

        if should_quit {
            break;
        }

        // Handle background task actions (provider replies and failures)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            match update(&mut app, action) {
                Effect::Quit => {
                    should_quit = true;
                    break;
                }
                Effect::SpawnRequest => {
                    active_abort_handle = Some(spawn_request(&app, tx.clone()));
                }
                Effect::None => {}
            }
            if !app.is_loading {
                active_abort_handle = None;
            }
        }

        if should_quit {
            break;
        }
    }

    ratatui::restore();
    Ok(())
}

/// Re-open the panel on the references of the transcript entry at `index`.
/// The id is extracted first so the transcript borrow ends before the
/// reducer takes `app` mutably.
fn activate_message(app: &mut App, index: usize) {
    let id = app.transcript.iter().nth(index).map(|m| m.id);
    if let Some(id) = id {
        update(app, Action::ShowReferencesFor(id));
    }
}

/// Spawn the provider task for the just-accepted submission. The prompt is
/// the last transcript entry (the user message `Submit` pushed); the model
/// is captured now so a mid-flight switch cannot mislabel the reply.
fn spawn_request(app: &App, tx: mpsc::Sender<Action>) -> tokio::task::AbortHandle {
    let provider = app.provider.clone();
    let prompt = app
        .transcript
        .last()
        .map(|m| m.content.clone())
        .unwrap_or_default();
    let model = app.selected_model().clone();
    info!("Spawning request to {} ({})", provider.name(), model.tag);

    let handle = tokio::spawn(async move {
        let request = ResponseRequest {
            prompt: &prompt,
            model: &model,
        };
        let action = match tokio::time::timeout(REQUEST_TIMEOUT, provider.generate(request)).await
        {
            Ok(Ok(reply)) => Action::ResponseArrived {
                model_id: model.id.clone(),
                content: reply.content,
                references: reply.references,
            },
            Ok(Err(e)) => Action::ResponseFailed(e.to_string()),
            Err(_) => Action::ResponseFailed(format!(
                "request timed out after {}s",
                REQUEST_TIMEOUT.as_secs()
            )),
        };
        if tx.send(action).is_err() {
            warn!("Failed to deliver provider result: receiver dropped");
        }
    });

    handle.abort_handle()
}
