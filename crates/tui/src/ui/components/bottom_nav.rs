use engine::{Screen, Tab};
use ratatui::{
    style::{Modifier, Style},
    text::Span,
};

use crate::ui::theme::Theme;

fn tab_label(tab: Tab) -> &'static str {
    match tab {
        Tab::Home => "首页",
        Tab::History => "历史",
        Tab::Analytics => "分析",
        Tab::Settings => "设置",
    }
}

/// Bottom navigation: `1`-`4` with the active screen bracketed.
pub fn nav_spans(active: Screen, theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = vec![Span::raw(" ")];

    for (i, tab) in Tab::ALL.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(
            format!("{}", i + 1),
            Style::default().fg(theme.accent),
        ));
        let label = tab_label(tab);
        if tab.screen() == active {
            spans.push(Span::styled(
                format!("[{label}]"),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(
                format!(" {label} "),
                Style::default().fg(theme.text_muted),
            ));
        }
    }

    spans
}

pub fn hint_spans(hints: &[(&'static str, &'static str)], theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (i, (key, desc)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(*key, Style::default().fg(theme.accent)));
        spans.push(Span::raw(format!(" {desc}")));
    }
    spans
}
