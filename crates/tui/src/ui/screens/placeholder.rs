use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Style,
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::ui::theme::Theme;

pub fn render(frame: &mut Frame<'_>, area: Rect, message: &str) {
    let theme = Theme::default();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));

    let content = Paragraph::new(Line::styled(message, Style::default().fg(theme.text_muted)))
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(content, area);
}
