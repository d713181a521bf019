//! Decorative trident logo shown on the landing page.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

const TRIDENT: &[&str] = &[
    "╻   ╻   ╻",
    "┃   ┃   ┃",
    "┗━━━╋━━━┛",
    "    ┃",
    "    ┃",
    "   ━┻━",
];

pub struct Logo;

impl Logo {
    /// Height the artwork needs, for layout math.
    pub fn required_height() -> u16 {
        TRIDENT.len() as u16
    }

    /// Render the trident in the given accent color, centered in `area`.
    pub fn render(frame: &mut Frame, area: Rect, accent: (u8, u8, u8)) {
        let (r, g, b) = accent;
        let style = Style::default().fg(Color::Rgb(r, g, b));
        let lines: Vec<Line> = TRIDENT.iter().map(|row| Line::from(*row)).collect();
        let paragraph = Paragraph::new(lines)
            .style(style)
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
    }
}
