//! # TitleBar Component
//!
//! Single-line header: app name, selected model, status text, and a
//! sources counter when references are active. Purely presentational: all
//! fields are props from the parent, there is no internal state.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::component::Component;

pub struct TitleBar {
    /// Display name of the selected model (e.g. "Search").
    pub model_name: String,
    /// Model label (e.g. "Qwen 2.5 7B").
    pub model_label: String,
    /// Accent color of the selected model.
    pub accent: (u8, u8, u8),
    /// Transient status (e.g. "Asking Search...").
    pub status_message: String,
    /// Number of active references, shown when non-zero.
    pub source_count: usize,
    /// Whether the sources panel is currently open.
    pub panel_visible: bool,
}

impl TitleBar {
    pub fn new(
        model_name: String,
        model_label: String,
        accent: (u8, u8, u8),
        status_message: String,
        source_count: usize,
        panel_visible: bool,
    ) -> Self {
        Self {
            model_name,
            model_label,
            accent,
            status_message,
            source_count,
            panel_visible,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let (r, g, b) = self.accent;
        let accent_style = Style::default().fg(Color::Rgb(r, g, b));

        let mut spans = vec![
            Span::styled("Trident AI", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(self.model_name.clone(), accent_style),
            Span::styled(
                format!(" · {}", self.model_label),
                Style::default().fg(Color::DarkGray),
            ),
        ];

        if !self.status_message.is_empty() {
            spans.push(Span::styled(
                format!("  | {}", self.status_message),
                Style::default().fg(Color::Gray),
            ));
        }

        if self.source_count > 0 {
            let marker = if self.panel_visible { "▣" } else { "▢" };
            spans.push(Span::styled(
                format!("  {} {} sources", marker, self.source_count),
                accent_style,
            ));
        }

        spans.push(Span::styled(
            "  ● online",
            Style::default().fg(Color::Green),
        ));

        frame.render_widget(Line::from(spans), area);
    }
}
