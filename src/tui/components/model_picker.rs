//! # Model Picker Component
//!
//! Centered overlay for switching models at runtime. Opened with Ctrl+P.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `ModelPickerState` lives in `TuiState`
//! - `ModelPicker` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph};

use crate::core::catalog::{ModelSpec, ModelStatus};
use crate::tui::event::TuiEvent;

/// Persistent state for the model picker overlay.
pub struct ModelPickerState {
    pub models: Vec<ModelSpec>,
    pub selected: usize,
    pub list_state: ListState,
}

impl ModelPickerState {
    pub fn new(models: Vec<ModelSpec>, current_id: &str) -> Self {
        let initial = models
            .iter()
            .position(|m| m.id == current_id)
            .unwrap_or(0);
        let mut list_state = ListState::default();
        if !models.is_empty() {
            list_state.select(Some(initial));
        }
        Self {
            models,
            selected: initial,
            list_state,
        }
    }

    /// Handle a key event, returning a ModelPickerEvent if the overlay should act.
    pub fn handle_event(&mut self, event: &TuiEvent) -> Option<ModelPickerEvent> {
        match event {
            TuiEvent::Escape => Some(ModelPickerEvent::Dismiss),
            TuiEvent::CursorUp => {
                if !self.models.is_empty() {
                    self.selected = self.selected.saturating_sub(1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::CursorDown => {
                if !self.models.is_empty() {
                    self.selected = (self.selected + 1).min(self.models.len() - 1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::Submit => self
                .models
                .get(self.selected)
                .map(|model| ModelPickerEvent::Select(model.id.clone())),
            _ => None,
        }
    }
}

/// Events emitted by the model picker.
pub enum ModelPickerEvent {
    Select(String),
    Dismiss,
}

/// Transient render wrapper for the model picker overlay.
pub struct ModelPicker<'a> {
    state: &'a mut ModelPickerState,
    current_id: &'a str,
}

impl<'a> ModelPicker<'a> {
    pub fn new(state: &'a mut ModelPickerState, current_id: &'a str) -> Self {
        Self { state, current_id }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(70, 60, area);

        // Clear underlying content
        frame.render_widget(Clear, overlay);

        let help_text = " Enter Select  Esc Back ";

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Models ")
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(help_text).centered())
            .padding(Padding::horizontal(1));

        if self.state.models.is_empty() {
            let empty = Paragraph::new(
                "No models configured.\nAdd [[models]] entries to ~/.trident/config.toml",
            )
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(block);
            frame.render_widget(empty, overlay);
            return;
        }

        let items: Vec<ListItem> = self
            .state
            .models
            .iter()
            .enumerate()
            .map(|(i, model)| {
                let is_active = model.id == self.current_id;
                let category_tag = format!("[{}]", model.category.label());
                let params = format!("{} params", model.params);
                let active_marker = if is_active { " *" } else { "" };

                // Space left for the model name after the fixed columns.
                let inner_width = overlay.width.saturating_sub(4) as usize; // borders + padding
                let fixed_width =
                    category_tag.len() + 2 + params.len() + 2 + active_marker.len();
                let name = format!("{} ({})", model.name, model.model_name);
                let name_width = inner_width.saturating_sub(fixed_width);
                let padded_name =
                    format!("{:<width$}", truncate_str(&name, name_width), width = name_width);

                let style = if i == self.state.selected {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else if is_active {
                    let (r, g, b) = model.accent;
                    Style::default().fg(Color::Rgb(r, g, b))
                } else if model.status == ModelStatus::Offline {
                    Style::default().fg(Color::DarkGray)
                } else {
                    Style::default().fg(Color::Gray)
                };

                let tag_color = match model.category {
                    crate::core::catalog::ModelCategory::Grounded => Color::Cyan,
                    crate::core::catalog::ModelCategory::Offline => Color::Yellow,
                };

                let mut spans = vec![
                    Span::styled(
                        category_tag,
                        if i == self.state.selected {
                            style
                        } else {
                            Style::default().fg(tag_color)
                        },
                    ),
                    Span::styled("  ", style),
                    Span::styled(padded_name, style),
                    Span::styled("  ", style),
                    Span::styled(
                        params,
                        if i == self.state.selected {
                            style
                        } else {
                            Style::default().fg(Color::DarkGray)
                        },
                    ),
                ];

                if !active_marker.is_empty() {
                    spans.push(Span::styled(active_marker, style));
                }

                ListItem::new(Line::from(spans))
            })
            .collect();

        let list = List::new(items).block(block);

        frame.render_stateful_widget(list, overlay, &mut self.state.list_state);
    }
}

/// Truncate a string to fit within `max_width` chars, adding "..." if needed.
fn truncate_str(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else if max_width <= 3 {
        ".".repeat(max_width)
    } else {
        let cut: String = s.chars().take(max_width - 3).collect();
        format!("{cut}...")
    }
}

/// Compute a centered rect using percentage of the outer rect.
fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::Catalog;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn picker_state() -> ModelPickerState {
        ModelPickerState::new(Catalog::builtin().to_vec(), "search")
    }

    #[test]
    fn test_picker_starts_on_current_model() {
        let state = picker_state();
        assert_eq!(state.models[state.selected].id, "search");
    }

    #[test]
    fn test_navigation_clamps_at_bounds() {
        let mut state = ModelPickerState::new(Catalog::builtin().to_vec(), "entity");
        state.handle_event(&TuiEvent::CursorUp);
        assert_eq!(state.selected, 0);

        for _ in 0..10 {
            state.handle_event(&TuiEvent::CursorDown);
        }
        assert_eq!(state.selected, state.models.len() - 1);
    }

    #[test]
    fn test_submit_selects_highlighted_model() {
        let mut state = ModelPickerState::new(Catalog::builtin().to_vec(), "entity");
        state.handle_event(&TuiEvent::CursorDown);
        match state.handle_event(&TuiEvent::Submit) {
            Some(ModelPickerEvent::Select(id)) => assert_eq!(id, "search"),
            _ => panic!("Expected Select event"),
        }
    }

    #[test]
    fn test_escape_dismisses() {
        let mut state = picker_state();
        assert!(matches!(
            state.handle_event(&TuiEvent::Escape),
            Some(ModelPickerEvent::Dismiss)
        ));
    }

    #[test]
    fn test_render_lists_all_models() {
        let mut state = picker_state();
        let backend = TestBackend::new(90, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| ModelPicker::new(&mut state, "search").render(f, f.area()))
            .unwrap();
        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(text.contains("Models"));
        assert!(text.contains("Entity"));
        assert!(text.contains("Search"));
        assert!(text.contains("Local"));
    }
}
