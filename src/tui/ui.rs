use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Paragraph};

use crate::core::state::App;
use crate::tui::components::{
    Landing, MessageList, ModelPicker, ReferencesPanel, TitleBar,
};
use crate::tui::component::Component;
use crate::tui::{InputMode, TuiState};

/// Width of the sources side panel when open.
const PANEL_WIDTH: u16 = 42;

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};

    let input_height = tui.input_box.calculate_height(frame.area().width);
    let layout = Layout::vertical([Length(1), Min(0), Length(input_height)]);
    let [title_area, main_area, input_area] = layout.areas(frame.area());

    // Sources panel claims a fixed column on the right when open.
    let (chat_area, panel_area) = if app.panel_visible && main_area.width > PANEL_WIDTH {
        let [chat, panel] = Layout::horizontal([Min(0), Length(PANEL_WIDTH)]).areas(main_area);
        (chat, Some(panel))
    } else {
        (main_area, None)
    };

    // Chat column - error view, landing page, or conversation
    if let Some(error_msg) = &app.error {
        draw_error_view(frame, chat_area, error_msg);
    } else if app.transcript.is_empty() && !app.is_loading {
        Landing::new(app.selected_model()).render(frame, chat_area);
    } else {
        MessageList::new(
            &mut tui.message_list,
            &app.transcript,
            &app.catalog,
            app.is_loading,
            spinner_frame,
            matches!(tui.input_mode, InputMode::Cursor),
        )
        .render(frame, chat_area);
    }

    if let Some(panel_area) = panel_area {
        ReferencesPanel::new(&app.active_references, app.selected_model().accent)
            .render(frame, panel_area);
    }

    // Title bar
    let model = app.selected_model();
    TitleBar::new(
        model.name.clone(),
        model.model_name.clone(),
        model.accent,
        app.status_message.clone(),
        app.active_references.len(),
        app.panel_visible,
    )
    .render(frame, title_area);

    // Input area
    tui.input_box.render(frame, input_area);

    // Model picker overlay renders last, over everything else.
    if let Some(ref mut picker) = tui.model_picker {
        ModelPicker::new(picker, &app.selected_model_id).render(frame, frame.area());
    }
}

fn draw_error_view(frame: &mut Frame, area: Rect, error_msg: &str) {
    let error_paragraph = Paragraph::new(format!("{error_msg}\n\nEsc to dismiss"))
        .block(
            Block::bordered()
                .title(" ERROR ")
                .border_style(Style::default().fg(Color::Red)),
        )
        .style(Style::default().fg(Color::Red))
        .alignment(Alignment::Center);

    frame.render_widget(error_paragraph, area);
}
