use engine::{Transaction, daily_summary, totals};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
};

use crate::{
    app::{AppState, home_listing},
    ui::{
        components::money::{kind_color, styled_amount},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(3)])
        .split(area);

    render_totals(frame, layout[0], state.session.transactions(), &theme);
    render_days(frame, layout[1], state, &theme);
}

fn render_totals(frame: &mut Frame<'_>, area: Rect, transactions: &[Transaction], theme: &Theme) {
    let t = totals(transactions);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
        .split(area);

    for (col, title, value, color) in [
        (cols[0], "总收入", t.income, theme.income),
        (cols[1], "总支出", t.expense, theme.expense),
    ] {
        let block = Block::default()
            .title(Span::styled(format!(" {title} "), Style::default().fg(theme.text_muted)))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.border));
        let value = Paragraph::new(Line::from(Span::styled(
            value.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )))
        .block(block);
        frame.render_widget(value, col);
    }
}

fn render_days(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let groups = home_listing(state.session.transactions());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));

    if groups.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "还没有记录，按 a 记一笔",
            Style::default().fg(theme.text_muted),
        )))
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let mut items = Vec::new();
    let mut selected_item = None;
    let mut row = 0usize;

    for (date, entries) in groups.days_desc() {
        let day = daily_summary(entries);
        items.push(ListItem::new(Line::from(vec![
            Span::styled(
                date.format("%Y年%-m月%-d日").to_string(),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  收入 {}  支出 {}  ", day.income, day.expense),
                Style::default().fg(theme.text_muted),
            ),
            Span::styled(
                format!("{} 条记录", entries.len()),
                Style::default().fg(theme.text_muted),
            ),
        ])));

        for entry in entries {
            if row == state.home.selected {
                selected_item = Some(items.len());
            }
            items.push(entry_item(entry, theme));
            row += 1;
        }
    }

    if groups.skipped() > 0 {
        items.push(ListItem::new(Line::from(Span::styled(
            format!("{} 条记录日期无法识别", groups.skipped()),
            Style::default().fg(theme.error),
        ))));
    }

    let mut list_state = ListState::default();
    list_state.select(selected_item);

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(theme.highlight))
        .highlight_symbol("» ");
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn entry_item(entry: &Transaction, theme: &Theme) -> ListItem<'static> {
    let title = if entry.note.is_empty() {
        entry.kind.label().to_string()
    } else {
        entry.note.clone()
    };
    let mut spans = vec![
        Span::raw("  "),
        Span::styled(
            format!("{:<8}", entry.occurred_time),
            Style::default().fg(theme.text_muted),
        ),
        Span::styled(
            format!("{} ", entry.kind.label()),
            Style::default().fg(kind_color(entry.kind, theme)),
        ),
        styled_amount(entry.kind, entry.amount, theme),
        Span::raw("  "),
        Span::styled(title, Style::default().fg(theme.text)),
    ];
    for tag in &entry.tags {
        spans.push(Span::styled(
            format!(" #{tag}"),
            Style::default().fg(theme.accent),
        ));
    }
    if let Some(location) = &entry.location {
        spans.push(Span::styled(
            format!("  @{location}"),
            Style::default().fg(theme.text_muted),
        ));
    }
    ListItem::new(Line::from(spans))
}
