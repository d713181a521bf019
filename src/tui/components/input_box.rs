//! # InputBox Component
//!
//! Multi-line text entry. Enter submits, Ctrl+J inserts a newline.
//! The buffer is internal state; the model name and dim flag are props.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Tallest the box grows before it pins to the last lines.
const MAX_VISIBLE_LINES: u16 = 6;
/// Top + bottom border.
const VERTICAL_OVERHEAD: u16 = 2;

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User submitted the text (Enter pressed)
    Submit(String),
    /// Text content changed
    ContentChanged,
}

pub struct InputBox {
    /// Text buffer (internal state)
    pub buffer: String,
    /// Byte offset of the cursor into `buffer`
    cursor: usize,
    /// Display name of the selected model (prop)
    pub model_name: String,
    /// Dimmed while the message list has focus (prop)
    pub dimmed: bool,
    /// A request is outstanding; Enter is held and the draft stays (prop)
    pub loading: bool,
}

impl InputBox {
    pub fn new(model_name: String) -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            model_name,
            dimmed: false,
            loading: false,
        }
    }

    /// Height needed for the current buffer, clamped to the viewport limit.
    pub fn calculate_height(&self, content_width: u16) -> u16 {
        let lines = wrapped_lines(&self.buffer, inner_width(content_width)).len() as u16;
        lines.clamp(1, MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
    }

    fn prev_char_boundary(&self) -> usize {
        self.buffer[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_char_boundary(&self) -> usize {
        self.buffer[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
            .unwrap_or(self.buffer.len())
    }

    /// Cursor position as (row, col) within the wrapped text.
    fn cursor_rowcol(&self, width: u16) -> (u16, u16) {
        let prefix = &self.buffer[..self.cursor];
        let rows = wrapped_lines(prefix, width);
        match rows.last() {
            Some(last) => ((rows.len() - 1) as u16, last.width() as u16),
            None => (0, 0),
        }
    }
}

/// Wrap `text` to `width` columns, preserving explicit newlines. Always
/// returns at least one (possibly empty) line.
fn wrapped_lines(text: &str, width: u16) -> Vec<String> {
    let width = width.max(1) as usize;
    let options = textwrap::Options::new(width)
        .break_words(true)
        .word_splitter(textwrap::WordSplitter::NoHyphenation);
    let mut out = Vec::new();
    for logical in text.split('\n') {
        if logical.is_empty() {
            out.push(String::new());
        } else {
            out.extend(textwrap::wrap(logical, &options).iter().map(|l| l.to_string()));
        }
    }
    if out.is_empty() {
        out.push(String::new());
    }
    out
}

fn inner_width(content_width: u16) -> u16 {
    content_width.saturating_sub(2) // borders
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = inner_width(area.width);
        let mut lines = wrapped_lines(&self.buffer, width);
        let (cursor_row, cursor_col) = self.cursor_rowcol(width);

        // Pin to the tail when the buffer outgrows the box.
        let visible = area.height.saturating_sub(VERTICAL_OVERHEAD).max(1);
        let skip = (lines.len() as u16).saturating_sub(visible);
        lines.drain(..skip as usize);

        let style = if self.dimmed {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(style)
            .title(format!(" Message {} ", self.model_name))
            .title_style(style.add_modifier(Modifier::BOLD));

        let input = Paragraph::new(lines.join("\n")).block(block).style(style);
        frame.render_widget(input, area);

        if !self.dimmed {
            let row_on_screen = cursor_row.saturating_sub(skip);
            frame.set_cursor_position((area.x + 1 + cursor_col, area.y + 1 + row_on_screen));
        }
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                self.buffer.insert_str(self.cursor, text);
                self.cursor += text.len();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => {
                if self.cursor > 0 {
                    let prev = self.prev_char_boundary();
                    self.buffer.drain(prev..self.cursor);
                    self.cursor = prev;
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::Delete => {
                if self.cursor < self.buffer.len() {
                    let next = self.next_char_boundary();
                    self.buffer.drain(self.cursor..next);
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::CursorLeft => {
                if self.cursor > 0 {
                    self.cursor = self.prev_char_boundary();
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::CursorRight => {
                if self.cursor < self.buffer.len() {
                    self.cursor = self.next_char_boundary();
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::CursorHome => {
                let line_start = self.buffer[..self.cursor]
                    .rfind('\n')
                    .map(|i| i + 1)
                    .unwrap_or(0);
                (self.cursor != line_start).then(|| {
                    self.cursor = line_start;
                    InputEvent::ContentChanged
                })
            }
            TuiEvent::CursorEnd => {
                let line_end = self.buffer[self.cursor..]
                    .find('\n')
                    .map(|i| self.cursor + i)
                    .unwrap_or(self.buffer.len());
                (self.cursor != line_end).then(|| {
                    self.cursor = line_end;
                    InputEvent::ContentChanged
                })
            }
            TuiEvent::Submit => {
                if !self.loading && !self.buffer.trim().is_empty() {
                    let text = std::mem::take(&mut self.buffer);
                    self.cursor = 0;
                    Some(InputEvent::Submit(text))
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_input_box_new() {
        let input = InputBox::new("Search".to_string());
        assert!(input.buffer.is_empty());
        assert_eq!(input.calculate_height(40), 1 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn test_handle_input_and_backspace() {
        let mut input = InputBox::new("Search".to_string());

        assert_eq!(
            input.handle_event(&TuiEvent::InputChar('a')),
            Some(InputEvent::ContentChanged)
        );
        input.handle_event(&TuiEvent::InputChar('b'));
        assert_eq!(input.buffer, "ab");

        input.handle_event(&TuiEvent::Backspace);
        assert_eq!(input.buffer, "a");
    }

    #[test]
    fn test_backspace_on_empty_is_noop() {
        let mut input = InputBox::new("Search".to_string());
        assert_eq!(input.handle_event(&TuiEvent::Backspace), None);
    }

    #[test]
    fn test_multibyte_editing() {
        let mut input = InputBox::new("Search".to_string());
        input.handle_event(&TuiEvent::InputChar('é'));
        input.handle_event(&TuiEvent::InputChar('x'));
        input.handle_event(&TuiEvent::CursorLeft);
        input.handle_event(&TuiEvent::Backspace);
        assert_eq!(input.buffer, "x");
    }

    #[test]
    fn test_submit_clears_buffer() {
        let mut input = InputBox::new("Search".to_string());
        input.handle_event(&TuiEvent::Paste("hello".to_string()));

        match input.handle_event(&TuiEvent::Submit) {
            Some(InputEvent::Submit(text)) => assert_eq!(text, "hello"),
            other => panic!("Expected Submit event, got {:?}", other),
        }
        assert!(input.buffer.is_empty());
    }

    #[test]
    fn test_submit_while_loading_keeps_draft() {
        let mut input = InputBox::new("Search".to_string());
        input.handle_event(&TuiEvent::Paste("second question".to_string()));

        input.loading = true;
        assert_eq!(input.handle_event(&TuiEvent::Submit), None);
        assert_eq!(input.buffer, "second question");

        input.loading = false;
        match input.handle_event(&TuiEvent::Submit) {
            Some(InputEvent::Submit(text)) => assert_eq!(text, "second question"),
            other => panic!("Expected Submit event, got {:?}", other),
        }
    }

    #[test]
    fn test_submit_whitespace_is_noop() {
        let mut input = InputBox::new("Search".to_string());
        input.handle_event(&TuiEvent::Paste("   ".to_string()));
        assert_eq!(input.handle_event(&TuiEvent::Submit), None);
    }

    #[test]
    fn test_newlines_grow_height_up_to_limit() {
        let mut input = InputBox::new("Search".to_string());
        input.handle_event(&TuiEvent::Paste("a\nb\nc".to_string()));
        assert_eq!(input.calculate_height(40), 3 + VERTICAL_OVERHEAD);

        input.handle_event(&TuiEvent::Paste("\nd\ne\nf\ng\nh".to_string()));
        assert_eq!(
            input.calculate_height(40),
            MAX_VISIBLE_LINES + VERTICAL_OVERHEAD
        );
    }

    #[test]
    fn test_render_shows_model_name() {
        let backend = TestBackend::new(40, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut input = InputBox::new("Entity".to_string());
        terminal.draw(|f| input.render(f, f.area())).unwrap();

        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(text.contains("Message Entity"));
    }
}
