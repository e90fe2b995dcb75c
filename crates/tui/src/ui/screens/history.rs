use engine::{DayCell, MonthPosition, month_grid, month_totals};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Row, Table},
};

use crate::{
    app::AppState,
    ui::{components::money::styled_net, theme::Theme},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let month = state.history.month;
    let transactions = state.session.transactions();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(8)])
        .split(area);

    let summary = month_totals(month, transactions);
    let lines = vec![
        Line::from(Span::styled(
            month.to_string(),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("累计收入 ", Style::default().fg(theme.text_muted)),
            Span::styled(summary.income.to_string(), Style::default().fg(theme.income)),
            Span::styled("   累计支出 ", Style::default().fg(theme.text_muted)),
            Span::styled(summary.expense.to_string(), Style::default().fg(theme.expense)),
            Span::styled("   净收入 ", Style::default().fg(theme.text_muted)),
            styled_net(summary.net, &theme),
        ]),
    ];
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(theme.border)),
        ),
        layout[0],
    );

    let grid = month_grid(month, state.today, state.week_start, transactions);
    let header = Row::new(
        state
            .week_start
            .labels()
            .map(|label| Line::from(label).centered()),
    )
    .style(Style::default().fg(theme.text_muted));
    let rows = grid.weeks().map(|week| {
        Row::new(week.iter().map(|cell| day_line(cell, &theme))).height(2)
    });

    let table = Table::new(rows, [Constraint::Ratio(1, 7); 7])
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(theme.border)),
        );
    frame.render_widget(table, layout[1]);
}

/// Day number with a dot underneath for days that have entries.
fn day_line(cell: &DayCell, theme: &Theme) -> ratatui::text::Text<'static> {
    let mut style = match cell.position {
        MonthPosition::Current => Style::default().fg(theme.text),
        MonthPosition::Previous | MonthPosition::Next => Style::default().fg(theme.border),
    };
    if cell.is_today {
        style = style
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED);
    }
    let marker = if cell.has_activity {
        let color = if cell.totals.net.is_negative() {
            theme.expense
        } else {
            theme.income
        };
        Span::styled("•", Style::default().fg(color))
    } else {
        Span::raw(" ")
    };
    ratatui::text::Text::from(vec![
        Line::from(Span::styled(format!("{:>2}", cell.day), style)).centered(),
        Line::from(marker).centered(),
    ])
}
