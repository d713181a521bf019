//! # MessageList Component
//!
//! Scrollable view of the conversation transcript.
//!
//! ## Architecture
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent scroll/selection state) and props
//! (transcript, catalog, loading flag).
//!
//! The transcript is flattened into styled lines once per render and drawn
//! through a `Paragraph` with a vertical scroll offset. Per-message start
//! lines are recorded so keyboard selection can be kept in view.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::catalog::Catalog;
use crate::core::message::{Message, Role, Transcript};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Scroll and selection state for the message list.
/// Must be persisted in the parent TuiState.
pub struct MessageListState {
    /// First visible line of the flattened transcript.
    pub scroll_offset: u16,
    /// When true, auto-scroll to bottom on new content.
    pub stick_to_bottom: bool,
    /// Keyboard-selected message index, when the list has focus.
    pub selected_index: Option<usize>,
    /// Start line of each message within the flattened text, rebuilt on render.
    line_starts: Vec<u16>,
    /// Total flattened line count, rebuilt on render.
    total_lines: u16,
    /// Last known viewport height, for paging and clamping between frames.
    pub viewport_height: u16,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_offset: 0,
            stick_to_bottom: true, // Start attached to bottom
            selected_index: None,
            line_starts: Vec::new(),
            total_lines: 0,
            viewport_height: 0,
        }
    }

    fn max_offset(&self) -> u16 {
        self.total_lines.saturating_sub(self.viewport_height)
    }

    /// Clamp the offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        self.scroll_offset = self.scroll_offset.min(self.max_offset());
    }

    /// Re-engage auto-scroll when the user has scrolled back to the bottom.
    pub fn repin_if_at_bottom(&mut self) {
        if self.scroll_offset >= self.max_offset() {
            self.scroll_offset = self.max_offset();
            self.stick_to_bottom = true;
        }
    }

    /// Scroll so the selected message's first line is visible.
    pub fn scroll_to_selected(&mut self) {
        let Some(idx) = self.selected_index else {
            return;
        };
        let Some(&top) = self.line_starts.get(idx) else {
            return;
        };
        let bottom = self
            .line_starts
            .get(idx + 1)
            .copied()
            .unwrap_or(self.total_lines);

        if top < self.scroll_offset {
            self.scroll_offset = top;
            self.stick_to_bottom = false;
        } else if bottom > self.scroll_offset + self.viewport_height {
            self.scroll_offset = bottom.saturating_sub(self.viewport_height);
            self.stick_to_bottom = self.scroll_offset >= self.max_offset();
        }
    }

    /// Move the keyboard selection, wrapping in from "nothing selected" at
    /// the nearest end.
    pub fn select_prev(&mut self, message_count: usize) {
        if message_count == 0 {
            return;
        }
        self.selected_index = Some(match self.selected_index {
            None => message_count - 1,
            Some(i) => i.saturating_sub(1),
        });
        self.scroll_to_selected();
    }

    pub fn select_next(&mut self, message_count: usize) {
        if message_count == 0 {
            return;
        }
        self.selected_index = Some(match self.selected_index {
            None => 0,
            Some(i) => (i + 1).min(message_count - 1),
        });
        self.scroll_to_selected();
    }
}

/// Events emitted by the message list.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageListEvent {
    /// The selected message was activated (Enter in cursor mode).
    Activate(usize),
}

/// Scrollable conversation view component.
/// Created fresh each frame with references to state and data.
pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub transcript: &'a Transcript,
    pub catalog: &'a Catalog,
    pub is_loading: bool,
    pub spinner_frame: usize,
    /// Whether the list has keyboard focus (cursor mode).
    pub focused: bool,
}

impl<'a> MessageList<'a> {
    pub fn new(
        state: &'a mut MessageListState,
        transcript: &'a Transcript,
        catalog: &'a Catalog,
        is_loading: bool,
        spinner_frame: usize,
        focused: bool,
    ) -> Self {
        Self {
            state,
            transcript,
            catalog,
            is_loading,
            spinner_frame,
            focused,
        }
    }

    fn header_line(&self, message: &Message, selected: bool) -> Line<'static> {
        let (label, style) = match message.role {
            Role::User => (
                "you".to_string(),
                Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD),
            ),
            Role::Assistant => {
                match self.catalog.get(&message.model_id) {
                    Some(spec) => {
                        let (r, g, b) = spec.accent;
                        (
                            format!("{} · {}", spec.name, spec.model_name),
                            Style::default()
                                .fg(Color::Rgb(r, g, b))
                                .add_modifier(Modifier::BOLD),
                        )
                    }
                    None => (
                        "assistant".to_string(),
                        Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD),
                    ),
                }
            }
        };
        let style = if selected {
            style.add_modifier(Modifier::REVERSED)
        } else {
            style
        };
        Line::from(Span::styled(label, style))
    }

    /// Flatten the transcript into styled lines, recording each message's
    /// start line in the state.
    fn build_lines(&mut self, width: u16) -> Vec<Line<'static>> {
        let wrap_width = width.max(1) as usize;
        let mut lines: Vec<Line> = Vec::new();
        self.state.line_starts.clear();

        for (i, message) in self.transcript.iter().enumerate() {
            self.state.line_starts.push(lines.len() as u16);
            let selected = self.focused && self.state.selected_index == Some(i);

            lines.push(self.header_line(message, selected));
            for logical in message.content.split('\n') {
                if logical.is_empty() {
                    lines.push(Line::from(""));
                } else {
                    for chunk in textwrap::wrap(logical, wrap_width) {
                        lines.push(Line::from(chunk.to_string()));
                    }
                }
            }
            if message.has_references() {
                lines.push(Line::from(Span::styled(
                    format!("└ {} sources", message.references.len()),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            lines.push(Line::from(""));
        }

        if self.is_loading {
            let spinner = SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()];
            lines.push(Line::from(Span::styled(
                format!("{spinner} Thinking..."),
                Style::default().fg(Color::DarkGray),
            )));
        }

        self.state.total_lines = lines.len() as u16;
        lines
    }
}

impl Component for MessageList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let lines = self.build_lines(area.width);

        self.state.viewport_height = area.height;
        if self.state.stick_to_bottom {
            self.state.scroll_offset = self.state.max_offset();
        } else {
            self.state.clamp_scroll();
        }

        let paragraph = Paragraph::new(lines).scroll((self.state.scroll_offset, 0));
        frame.render_widget(paragraph, area);
    }
}

/// EventHandler is implemented on `MessageListState` rather than `MessageList`
/// because event handling needs the persistent scroll and selection state,
/// while `MessageList` is recreated each frame.
impl EventHandler for MessageListState {
    type Event = MessageListEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_offset = self.scroll_offset.saturating_sub(1);
                self.stick_to_bottom = false;
                None
            }
            TuiEvent::ScrollDown => {
                self.scroll_offset = self.scroll_offset.saturating_add(1);
                self.repin_if_at_bottom();
                None
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_offset = self.scroll_offset.saturating_sub(self.viewport_height);
                self.stick_to_bottom = false;
                None
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_offset = self.scroll_offset.saturating_add(self.viewport_height);
                self.repin_if_at_bottom();
                None
            }
            TuiEvent::Submit => self.selected_index.map(MessageListEvent::Activate),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::Reference;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn sample_transcript() -> Transcript {
        let mut transcript = Transcript::new();
        transcript.push_user("what is a vector database?".to_string(), "search".to_string());
        transcript.push_assistant(
            "An index over embeddings.".to_string(),
            "search".to_string(),
            vec![Reference {
                id: "ref-1".to_string(),
                title: "Vector Databases Explained".to_string(),
                url: "https://docs.example.org/vectors".to_string(),
                domain: "docs.example.org".to_string(),
                snippet: "How embeddings are indexed.".to_string(),
            }],
        );
        transcript
    }

    fn render_to_text(list: &mut MessageList) -> String {
        let backend = TestBackend::new(60, 15);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| list.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_render_shows_roles_and_source_footer() {
        let transcript = sample_transcript();
        let catalog = Catalog::builtin();
        let mut state = MessageListState::new();
        let mut list = MessageList::new(&mut state, &transcript, &catalog, false, 0, false);
        let text = render_to_text(&mut list);

        assert!(text.contains("you"));
        assert!(text.contains("Search · Qwen 2.5 7B"));
        assert!(text.contains("1 sources"));
        assert!(!text.contains("Thinking"));
    }

    #[test]
    fn test_loading_row_rendered_while_waiting() {
        let mut transcript = Transcript::new();
        transcript.push_user("hi".to_string(), "local".to_string());
        let catalog = Catalog::builtin();
        let mut state = MessageListState::new();
        let mut list = MessageList::new(&mut state, &transcript, &catalog, true, 0, false);
        let text = render_to_text(&mut list);

        assert!(text.contains("Thinking..."));
    }

    #[test]
    fn test_scroll_up_unpins_and_scroll_down_repins() {
        let mut state = MessageListState::new();
        state.total_lines = 40;
        state.viewport_height = 10;
        state.scroll_offset = 30;

        state.handle_event(&TuiEvent::ScrollUp);
        assert!(!state.stick_to_bottom);
        assert_eq!(state.scroll_offset, 29);

        state.handle_event(&TuiEvent::ScrollDown);
        assert!(state.stick_to_bottom, "reaching the bottom re-pins");
    }

    #[test]
    fn test_selection_walks_and_clamps() {
        let mut state = MessageListState::new();
        state.line_starts = vec![0, 4, 8];
        state.total_lines = 12;
        state.viewport_height = 20;

        state.select_prev(3);
        assert_eq!(state.selected_index, Some(2), "enter from the bottom");
        state.select_prev(3);
        state.select_prev(3);
        state.select_prev(3);
        assert_eq!(state.selected_index, Some(0), "clamped at the top");

        state.select_next(3);
        assert_eq!(state.selected_index, Some(1));
    }

    #[test]
    fn test_submit_activates_selected_message() {
        let mut state = MessageListState::new();
        assert_eq!(state.handle_event(&TuiEvent::Submit), None);

        state.selected_index = Some(1);
        assert_eq!(
            state.handle_event(&TuiEvent::Submit),
            Some(MessageListEvent::Activate(1))
        );
    }
}
