use engine::RECOMMENDED_TAGS;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
};

use crate::{
    app::{AppState, TagsFocus, TagsMode},
    ui::theme::Theme,
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let tags = &state.tags;

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(area);

    let (title, text) = match tags.mode {
        TagsMode::Browse => (" 搜索标签 ", tags.query.as_str()),
        TagsMode::Create => (" 创建新标签 ", tags.input.as_str()),
        TagsMode::Rename => (" 重命名标签 ", tags.input.as_str()),
    };
    let input = Paragraph::new(Line::from(vec![
        Span::styled(text.to_string(), Style::default().fg(theme.text)),
        Span::styled("▏", Style::default().fg(theme.accent)),
    ]))
    .block(rounded(title, tags.mode != TagsMode::Browse, &theme));
    frame.render_widget(input, layout[0]);

    let visible = tags.visible();
    let items: Vec<ListItem> = visible
        .iter()
        .map(|tag| {
            let chosen = state.edit.draft.has_tag(&tag.name);
            let name_style = if chosen {
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text)
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("#{}", tag.name), name_style),
                Span::styled(
                    format!("  {} 条记录", tag.count),
                    Style::default().fg(theme.text_muted),
                ),
            ]))
        })
        .collect();

    let mut list_state = ListState::default();
    if !items.is_empty() {
        list_state.select(Some(tags.selected.min(items.len() - 1)));
    }
    let list_title = format!(" 全部标签 ({}) ", tags.registry.len());
    let list = List::new(items)
        .block(rounded(&list_title, tags.focus == TagsFocus::List, &theme))
        .highlight_style(Style::default().bg(theme.highlight))
        .highlight_symbol("» ");
    frame.render_stateful_widget(list, layout[1], &mut list_state);

    let mut recommended = Vec::new();
    for (i, name) in RECOMMENDED_TAGS.into_iter().enumerate() {
        let mut style = if tags.registry.contains_name(name) {
            Style::default().fg(theme.text_muted)
        } else {
            Style::default().fg(theme.text)
        };
        if tags.focus == TagsFocus::Recommended && i == tags.recommended_cursor {
            style = style.bg(theme.highlight).add_modifier(Modifier::UNDERLINED);
        }
        recommended.push(Span::styled(format!("+ {name}"), style));
        recommended.push(Span::raw("   "));
    }
    frame.render_widget(
        Paragraph::new(Line::from(recommended)).block(rounded(
            " 推荐标签 ",
            tags.focus == TagsFocus::Recommended,
            &theme,
        )),
        layout[2],
    );

    if let Some(message) = &tags.message {
        frame.render_widget(
            Paragraph::new(Span::styled(
                message.clone(),
                Style::default().fg(theme.text_muted),
            )),
            layout[3],
        );
    }
}

fn rounded<'a>(title: &'a str, focused: bool, theme: &Theme) -> Block<'a> {
    let border = if focused {
        theme.border_focused
    } else {
        theme.border
    };
    Block::default()
        .title(Span::styled(title, Style::default().fg(theme.accent)))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
}
