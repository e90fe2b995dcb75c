use engine::{PAYMENT_METHODS, TransactionKind};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::{
    app::{AppState, EditField, EditState},
    ui::{components::money::kind_color, theme::Theme},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let edit = &state.edit;

    let mut lines = vec![
        field_line(edit, EditField::Kind, kind_spans(edit, &theme), &theme),
        field_line(edit, EditField::Amount, amount_spans(edit, &theme), &theme),
        field_line(
            edit,
            EditField::Note,
            text_spans(&edit.draft.note, edit.focus == EditField::Note, "写点什么…", &theme),
            &theme,
        ),
        Line::raw(""),
        field_line(edit, EditField::Tags, tag_spans(edit, &theme), &theme),
    ];
    if edit.tags_loading {
        lines.push(Line::from(Span::styled(
            "            AI 正在分析…",
            Style::default().fg(theme.text_muted),
        )));
    }
    lines.push(Line::raw(""));
    lines.push(field_line(
        edit,
        EditField::Location,
        text_spans(&edit.draft.location, edit.focus == EditField::Location, "添加地点", &theme),
        &theme,
    ));
    let places = edit.location_options(state.session.transactions());
    if !places.is_empty() {
        let mut spans = vec![Span::raw("            ")];
        spans.extend(chips(
            places.iter().map(String::as_str),
            edit.focus == EditField::Location,
            edit.place_cursor,
            |_| false,
            &theme,
        ));
        lines.push(Line::from(spans));
    }
    lines.push(field_line(edit, EditField::Payment, payment_spans(edit, &theme), &theme));

    if let Some(error) = &edit.error {
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(theme.error),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border_focused));
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn field_line(
    edit: &EditState,
    field: EditField,
    value: Vec<Span<'static>>,
    theme: &Theme,
) -> Line<'static> {
    let focused = edit.focus == field;
    let marker = if focused { "› " } else { "  " };
    let label_style = if focused {
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text_muted)
    };
    let mut spans = vec![
        Span::styled(marker, label_style),
        Span::styled(format!("{:<8}", field.label()), label_style),
    ];
    spans.extend(value);
    Line::from(spans)
}

fn kind_spans(edit: &EditState, theme: &Theme) -> Vec<Span<'static>> {
    [TransactionKind::Income, TransactionKind::Expense, TransactionKind::Note]
        .into_iter()
        .flat_map(|kind| {
            let style = if kind == edit.draft.kind {
                Style::default()
                    .fg(kind_color(kind, theme))
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default().fg(theme.text_muted)
            };
            [Span::styled(format!(" {} ", kind.label()), style), Span::raw(" ")]
        })
        .collect()
}

fn amount_spans(edit: &EditState, theme: &Theme) -> Vec<Span<'static>> {
    if edit.draft.kind == TransactionKind::Note {
        return vec![Span::styled("笔记不记金额", Style::default().fg(theme.text_muted))];
    }
    let mut spans = vec![Span::styled("¥ ", Style::default().fg(theme.text_muted))];
    spans.extend(text_spans(
        &edit.draft.amount,
        edit.focus == EditField::Amount,
        "0.00",
        theme,
    ));
    spans
}

fn text_spans(value: &str, focused: bool, placeholder: &str, theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = if value.is_empty() {
        vec![Span::styled(
            placeholder.to_string(),
            Style::default().fg(theme.text_muted),
        )]
    } else {
        vec![Span::styled(value.to_string(), Style::default().fg(theme.text))]
    };
    if focused {
        spans.push(Span::styled("▏", Style::default().fg(theme.accent)));
    }
    spans
}

fn tag_spans(edit: &EditState, theme: &Theme) -> Vec<Span<'static>> {
    let options = edit.tag_options();
    chips(
        options.iter().map(String::as_str),
        edit.focus == EditField::Tags,
        edit.tag_cursor,
        |tag| edit.draft.has_tag(tag),
        theme,
    )
}

fn payment_spans(edit: &EditState, theme: &Theme) -> Vec<Span<'static>> {
    let current = edit.draft.payment_method.as_str();
    let mut spans = Vec::new();
    if !current.is_empty() && !PAYMENT_METHODS.contains(&current) {
        spans.push(Span::styled(
            format!("[{current}] "),
            Style::default().fg(theme.accent),
        ));
    }
    for method in PAYMENT_METHODS {
        let style = if method == current {
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(theme.text_muted)
        };
        spans.push(Span::styled(format!(" {method} "), style));
        spans.push(Span::raw(" "));
    }
    spans
}

/// Row of selectable labels; the cursor is only drawn when the row has focus.
fn chips<'a>(
    labels: impl Iterator<Item = &'a str>,
    focused: bool,
    cursor: usize,
    selected: impl Fn(&str) -> bool,
    theme: &Theme,
) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for (i, label) in labels.enumerate() {
        let mut style = if selected(label) {
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text_muted)
        };
        if focused && i == cursor {
            style = style.bg(theme.highlight).add_modifier(Modifier::UNDERLINED);
        }
        let text = if selected(label) {
            format!("#{label}")
        } else {
            label.to_string()
        };
        spans.push(Span::styled(text, style));
        spans.push(Span::raw("  "));
    }
    spans
}
