//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState`, draw to a ratatui `Frame`, and never
//! mutate state or return effects.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::auth::render_auth_form;
use crate::common::text::truncate_with_ellipsis;
use crate::records::{RecordsFocus, render_records};
use crate::state::{AppState, Screen};

const HEADER_HEIGHT: u16 = 1;
const FOOTER_HEIGHT: u16 = 1;

/// Spinner frames for the pending-calls indicator.
const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// Renders the entire TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Min(1),
        Constraint::Length(FOOTER_HEIGHT),
    ])
    .areas(frame.area());

    render_header(app, frame, header);

    let body = Rect::new(
        body.x + 1,
        body.y + 1,
        body.width.saturating_sub(2),
        body.height.saturating_sub(1),
    );
    match &app.screen {
        Screen::Auth(form) => render_auth_form(frame, form, body),
        Screen::Records(state) => render_records(frame, state, body),
    }

    render_footer(app, frame, footer);
}

fn render_header(app: &AppState, frame: &mut Frame, area: Rect) {
    let route = app.screen.route();
    let mut spans = vec![
        Span::styled(
            " userdeck ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(route.title(), Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(
            format!("  {}", route.path()),
            Style::default().fg(Color::DarkGray),
        ),
    ];
    if let Some(email) = &app.signed_in_as {
        spans.push(Span::styled(
            format!("  signed in as {email}"),
            Style::default().fg(Color::Green),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_footer(app: &AppState, frame: &mut Frame, area: Rect) {
    let mut spans = Vec::new();

    if app.pending > 0 {
        let spinner = SPINNER_FRAMES[app.spinner_frame % SPINNER_FRAMES.len()];
        spans.push(Span::styled(
            format!(" {spinner} {} pending ", app.pending),
            Style::default().fg(Color::Yellow),
        ));
    }

    if app.show_errors
        && let Some(error) = &app.last_error
    {
        let width = (area.width as usize).saturating_sub(40);
        spans.push(Span::styled(
            format!(" {} ", truncate_with_ellipsis(error, width)),
            Style::default().fg(Color::Red),
        ));
    }

    spans.push(Span::styled(
        format!(" {}", key_hints(app)),
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn key_hints(app: &AppState) -> &'static str {
    match &app.screen {
        Screen::Auth(_) => "Tab/↑↓ move · Enter submit · Ctrl+Q quit",
        Screen::Records(state) => match state.focus {
            RecordsFocus::Field => "Enter save · Tab list · Ctrl+Q quit",
            RecordsFocus::List => "↑↓/jk select · e edit · d delete · Tab field · Ctrl+Q quit",
        },
    }
}
