pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use engine::Screen;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{AppState, TagsMode};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let theme = Theme::default();
    let area = frame.area();

    // Title bar, content, bottom bar
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    render_title_bar(frame, layout[0], state, &theme);

    let content = layout[1];
    match state.screen() {
        Screen::Home => screens::home::render(frame, content, state),
        Screen::Edit => screens::edit::render(frame, content, state),
        Screen::Tags => screens::tags::render(frame, content, state),
        Screen::History => screens::history::render(frame, content, state),
        Screen::Analytics => screens::placeholder::render(frame, content, "分析功能即将上线"),
        Screen::Settings => screens::placeholder::render(frame, content, "设置即将上线"),
    }

    render_bottom_bar(frame, layout[2], state, &theme);
    components::toast::render(frame, area, state.toast.as_ref());
}

fn render_title_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let title = match (state.screen(), state.session.editing_target()) {
        (Screen::Edit, Some(_)) => "编辑记录",
        (screen, _) => screen.label(),
    };
    let line = Line::from(vec![
        Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            state.today.format("%Y年%-m月%-d日").to_string(),
            Style::default().fg(theme.text_muted),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut parts = match state.screen() {
        Screen::Edit | Screen::Tags => Vec::new(),
        screen => components::bottom_nav::nav_spans(screen, theme),
    };

    let hints = context_hints(state);
    if !hints.is_empty() {
        if !parts.is_empty() {
            parts.push(Span::styled("  │  ", Style::default().fg(theme.border)));
        }
        parts.extend(components::bottom_nav::hint_spans(hints, theme));
    }

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}

/// Key hints for the current screen, as (key, description) pairs.
fn context_hints(state: &AppState) -> &'static [(&'static str, &'static str)] {
    match state.screen() {
        Screen::Home => &[("a", "记一笔"), ("↑↓", "选择"), ("Enter", "编辑"), ("q", "退出")],
        Screen::Edit => &[
            ("Tab", "下一项"),
            ("←→", "切换"),
            ("Enter", "选择"),
            ("Ctrl+T", "管理标签"),
            ("Ctrl+S", "保存"),
            ("Esc", "取消"),
        ],
        Screen::Tags => match state.tags.mode {
            TagsMode::Browse => &[
                ("Enter", "选用"),
                ("Ctrl+N", "新建"),
                ("Ctrl+R", "重命名"),
                ("Ctrl+D", "删除"),
                ("Tab", "推荐"),
                ("Esc", "返回"),
            ],
            TagsMode::Create | TagsMode::Rename => &[("Enter", "确定"), ("Esc", "取消")],
        },
        Screen::History => &[("a", "记一笔"), ("←→", "切换月份"), ("t", "本月"), ("q", "退出")],
        Screen::Analytics | Screen::Settings => &[("a", "记一笔"), ("q", "退出")],
    }
}
