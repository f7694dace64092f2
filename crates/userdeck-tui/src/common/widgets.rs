//! Small rendering helpers shared by the screens.

use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use super::TextField;
use super::text::visible_window;

/// Height of a bordered single-line field.
pub const FIELD_HEIGHT: u16 = 3;

pub fn accent(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// Draws a bordered text field and places the terminal cursor in it when
/// focused.
pub fn render_text_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    field: &TextField,
    placeholder: &str,
    focused: bool,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(accent(focused))
        .title(Span::styled(
            format!(" {label} "),
            Style::default().add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = inner.width as usize;
    let shown = field.display();
    let (visible, cursor_col) = visible_window(&shown, field.cursor(), width.saturating_sub(1));

    let line = if field.is_empty() && !placeholder.is_empty() {
        Line::from(Span::styled(
            placeholder.to_string(),
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(visible)
    };
    frame.render_widget(Paragraph::new(line), inner);

    if focused {
        let cursor_col = u16::try_from(cursor_col).unwrap_or(u16::MAX);
        frame.set_cursor_position((inner.x + cursor_col.min(inner.width), inner.y));
    }
}

/// Draws a one-line button-like label.
pub fn render_button(frame: &mut Frame, area: Rect, label: &str, focused: bool) {
    let style = if focused {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(format!("[ {label} ]"), style))),
        area,
    );
}

/// Centers a box of at most `width` x `height` inside `area`.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::layout::Position;

    use super::*;

    /// Renders `field` focused in a 12-column box; returns the text row and
    /// the cursor position.
    fn draw_field(field: &TextField) -> (String, Position) {
        let mut terminal = Terminal::new(TestBackend::new(12, FIELD_HEIGHT)).unwrap();
        terminal
            .draw(|frame| render_text_field(frame, frame.area(), "Name", field, "", true))
            .unwrap();
        let buffer = terminal.backend().buffer();
        let row = (1..11u16).map(|x| buffer[(x, 1)].symbol()).collect();
        (row, terminal.get_cursor_position().unwrap())
    }

    #[test]
    fn test_long_field_cursor_at_end() {
        let mut field = TextField::new();
        field.set("abcdefghijklmnop");
        let (row, cursor) = draw_field(&field);
        assert_eq!(row, "hijklmnop ");
        assert_eq!(cursor, Position::new(10, 1));
    }

    #[test]
    fn test_long_field_cursor_follows_home_and_left() {
        let mut field = TextField::new();
        field.set("abcdefghijklmnop");
        field.move_left();
        field.move_left();
        let (row, cursor) = draw_field(&field);
        assert_eq!(row, "hijklmnop ");
        assert_eq!(cursor, Position::new(8, 1));

        field.move_home();
        let (row, cursor) = draw_field(&field);
        assert_eq!(row, "abcdefghi ");
        assert_eq!(cursor, Position::new(1, 1));
    }

    #[test]
    fn test_centered_fits_inside() {
        let area = Rect::new(0, 0, 100, 40);
        let boxed = centered(area, 50, 10);
        assert_eq!(boxed.width, 50);
        assert_eq!(boxed.height, 10);
        assert_eq!(boxed.x, 25);
        assert_eq!(boxed.y, 15);
    }

    #[test]
    fn test_centered_clamps_to_area() {
        let area = Rect::new(0, 0, 20, 5);
        let boxed = centered(area, 50, 10);
        assert_eq!((boxed.width, boxed.height), (20, 5));
    }
}
