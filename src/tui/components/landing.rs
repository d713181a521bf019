//! # Landing Component
//!
//! Shown while the transcript is empty: logo, the selected model's mode
//! title, its label and parameter count, a short description, and a few
//! suggestion prompts.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::catalog::ModelSpec;
use crate::tui::component::Component;
use crate::tui::components::logo::Logo;

pub const SUGGESTIONS: &[&str] = &[
    "Explain how transformers work in neural networks",
    "Extract all entities from a paragraph of text",
    "Search for documentation on vector databases",
    "Write a Python function to sort a linked list",
];

pub struct Landing<'a> {
    model: &'a ModelSpec,
}

impl<'a> Landing<'a> {
    pub fn new(model: &'a ModelSpec) -> Self {
        Self { model }
    }
}

impl Component for Landing<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let (r, g, b) = self.model.accent;
        let accent = Style::default().fg(Color::Rgb(r, g, b));

        let mut text_lines = vec![
            Line::from(Span::styled(
                format!("{} Mode", self.model.name),
                accent.add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("{} · {} parameters", self.model.model_name, self.model.params),
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(""),
        ];

        for chunk in textwrap::wrap(&self.model.description, (area.width.saturating_sub(8)) as usize) {
            text_lines.push(Line::from(Span::styled(
                chunk.to_string(),
                Style::default().fg(Color::Gray),
            )));
        }

        text_lines.push(Line::from(""));
        for suggestion in SUGGESTIONS {
            text_lines.push(Line::from(Span::styled(
                format!("» {}", suggestion),
                Style::default().fg(Color::DarkGray),
            )));
        }

        let text_height = text_lines.len() as u16;
        let vertical_layout = Layout::vertical([
            Constraint::Length(Logo::required_height()),
            Constraint::Length(1), // Spacer
            Constraint::Length(text_height),
        ])
        .flex(Flex::Center)
        .split(area);

        Logo::render(frame, vertical_layout[0], self.model.accent);

        let paragraph = Paragraph::new(text_lines).alignment(Alignment::Center);
        frame.render_widget(paragraph, vertical_layout[2]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::Catalog;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_landing_shows_mode_and_params() {
        let catalog = Catalog::builtin();
        let backend = TestBackend::new(80, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| Landing::new(catalog.get("search").unwrap()).render(f, f.area()))
            .unwrap();
        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(text.contains("Search Mode"));
        assert!(text.contains("7B parameters"));
        assert!(text.contains("vector databases"));
    }
}
