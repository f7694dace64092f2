//! Records feature view.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph};

use super::state::{RecordsFocus, RecordsState};
use crate::common::text::truncate_with_ellipsis;
use crate::common::widgets::{FIELD_HEIGHT, accent, centered, render_text_field};

const PANEL_WIDTH: u16 = 64;

pub fn render_records(frame: &mut Frame, state: &RecordsState, area: Rect) {
    let panel = centered(area, PANEL_WIDTH, area.height);
    let [field_area, _, list_area] = Layout::vertical([
        Constraint::Length(FIELD_HEIGHT),
        Constraint::Length(1),
        Constraint::Min(3),
    ])
    .areas(panel);

    let placeholder = if state.is_editing() {
        "Enter new data"
    } else {
        "Enter your data"
    };
    render_text_field(
        frame,
        field_area,
        state.field_label(),
        state.active_field(),
        placeholder,
        state.focus == RecordsFocus::Field,
    );

    render_list(frame, state, list_area);
}

fn render_list(frame: &mut Frame, state: &RecordsState, area: Rect) {
    let focused = state.focus == RecordsFocus::List;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(accent(focused))
        .title(Span::styled(
            " User List ",
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Center);

    if state.records.is_empty() {
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "No users found",
                Style::default().fg(Color::Gray),
            )))
            .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let editing_id = state.edit.as_ref().map(|session| session.target.id.as_str());
    let name_width = area.width.saturating_sub(6) as usize;
    let items: Vec<ListItem> = state
        .records
        .iter()
        .map(|record| {
            let mut spans = vec![Span::raw(truncate_with_ellipsis(&record.name, name_width))];
            if editing_id == Some(record.id.as_str()) {
                spans.push(Span::styled(
                    "  (editing)",
                    Style::default().fg(Color::Magenta),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(if focused {
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        })
        .highlight_symbol("▶ ");

    let mut list_state = ListState::default();
    list_state.select(Some(state.selected));
    frame.render_stateful_widget(list, area, &mut list_state);
}
