//! Auth feature view.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use super::state::{AuthFocus, AuthFormState, AuthMode};
use crate::common::widgets::{FIELD_HEIGHT, centered, render_button, render_text_field};

const FORM_WIDTH: u16 = 56;
const FORM_HEIGHT: u16 = 14;

pub fn render_auth_form(frame: &mut Frame, form: &AuthFormState, area: Rect) {
    let popup = centered(area, FORM_WIDTH, FORM_HEIGHT);
    let title = form.mode.route().title();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Blue))
        .title(Span::styled(
            format!(" {title} "),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Center);
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let inner = Rect::new(
        inner.x + 1,
        inner.y + 1,
        inner.width.saturating_sub(2),
        inner.height.saturating_sub(1),
    );
    let [email, password, _, submit, _, link] = Layout::vertical([
        Constraint::Length(FIELD_HEIGHT),
        Constraint::Length(FIELD_HEIGHT),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    render_text_field(
        frame,
        email,
        "Email",
        &form.email,
        "",
        form.focus == AuthFocus::Email,
    );
    render_text_field(
        frame,
        password,
        "Password",
        &form.password,
        "",
        form.focus == AuthFocus::Password,
    );
    render_button(
        frame,
        submit,
        form.mode.submit_label(),
        form.focus == AuthFocus::Submit,
    );

    if form.mode == AuthMode::Register {
        let link_style = if form.focus == AuthFocus::LoginLink {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::UNDERLINED)
        } else {
            Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::UNDERLINED)
        };
        let line = Line::from(vec![
            Span::raw("Already registered? "),
            Span::styled("Login", link_style),
            Span::styled("  (Ctrl+L)", Style::default().fg(Color::DarkGray)),
        ])
        .alignment(Alignment::Right);
        frame.render_widget(Paragraph::new(line), link);
    }
}
