use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Spans,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Draw a bordered popup over whatever is below it.
pub fn render_popup<B: Backend>(
    frame: &mut Frame<B>,
    area: Rect,
    title: &str,
    lines: Vec<Spans<'_>>,
) {
    let popup = Paragraph::new(lines)
        .block(Block::default().title(title.to_string()).borders(Borders::ALL))
        .style(Style::default().fg(Color::White).bg(Color::Black))
        .wrap(Wrap { trim: false });

    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}

/// Two-choice confirmation box.
pub fn render_confirmation<B: Backend>(frame: &mut Frame<B>, size: Rect, title: &str, question: &str) {
    let area = centered_rect(50, 25, size);
    render_popup(
        frame,
        area,
        title,
        vec![
            Spans::from(""),
            Spans::from(question.to_string()),
            Spans::from(""),
            Spans::from("<Y> Confirmar  <N> Cancelar"),
        ],
    );
}

/// Single-message box dismissed with Enter.
pub fn render_notice<B: Backend>(frame: &mut Frame<B>, size: Rect, title: &str, message: &str) {
    let area = centered_rect(50, 25, size);
    render_popup(
        frame,
        area,
        title,
        vec![
            Spans::from(""),
            Spans::from(message.to_string()),
            Spans::from(""),
            Spans::from("<Enter> OK"),
        ],
    );
}

// Helper function to create a centered rect
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_sits_inside_its_parent() {
        let parent = Rect::new(0, 0, 100, 40);
        let inner = centered_rect(50, 50, parent);

        assert_eq!(inner.width, 50);
        assert_eq!(inner.height, 20);
        assert_eq!(inner.x, 25);
        assert_eq!(inner.y, 10);
    }
}
