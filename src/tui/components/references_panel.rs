//! # References Panel Component
//!
//! Side panel listing the citations behind the active assistant reply.
//! Stateless: the reference list and accent color are props; visibility
//! is decided by the session, not here.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};

use crate::core::message::Reference;
use crate::tui::component::Component;

pub struct ReferencesPanel<'a> {
    references: &'a [Reference],
    accent: (u8, u8, u8),
}

impl<'a> ReferencesPanel<'a> {
    pub fn new(references: &'a [Reference], accent: (u8, u8, u8)) -> Self {
        Self { references, accent }
    }
}

impl Component for ReferencesPanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let (r, g, b) = self.accent;
        let accent_style = Style::default().fg(Color::Rgb(r, g, b));

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" Sources ({}) ", self.references.len()))
            .title_style(accent_style.add_modifier(Modifier::BOLD));

        let mut lines: Vec<Line> = Vec::new();
        for (i, reference) in self.references.iter().enumerate() {
            lines.push(Line::from(vec![
                Span::styled(format!("{}. ", i + 1), accent_style),
                Span::styled(
                    reference.title.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ]));
            lines.push(Line::from(Span::styled(
                format!("   {}", reference.domain),
                accent_style,
            )));
            lines.push(Line::from(Span::styled(
                format!("   {}", reference.snippet),
                Style::default().fg(Color::Gray),
            )));
            lines.push(Line::from(Span::styled(
                format!("   {}", reference.url),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::UNDERLINED),
            )));
            lines.push(Line::from(""));
        }

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn sample_references() -> Vec<Reference> {
        vec![
            Reference {
                id: "ref-1".to_string(),
                title: "Understanding Neural Networks".to_string(),
                url: "https://example.com/neural-networks".to_string(),
                domain: "example.com".to_string(),
                snippet: "A gentle introduction.".to_string(),
            },
            Reference {
                id: "ref-2".to_string(),
                title: "Vector Databases Explained".to_string(),
                url: "https://docs.example.org/vectors".to_string(),
                domain: "docs.example.org".to_string(),
                snippet: "How embeddings are indexed.".to_string(),
            },
        ]
    }

    #[test]
    fn test_panel_shows_count_and_entries() {
        let references = sample_references();
        let backend = TestBackend::new(50, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                ReferencesPanel::new(&references, (0x0e, 0xa5, 0xe9)).render(f, f.area())
            })
            .unwrap();
        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(text.contains("Sources (2)"));
        assert!(text.contains("Understanding Neural Networks"));
        assert!(text.contains("docs.example.org"));
    }

    #[test]
    fn test_empty_panel_renders_zero_count() {
        let backend = TestBackend::new(40, 6);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| ReferencesPanel::new(&[], (0x06, 0xb6, 0xd4)).render(f, f.area()))
            .unwrap();
        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(text.contains("Sources (0)"));
    }
}
