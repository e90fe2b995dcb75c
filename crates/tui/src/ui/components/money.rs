use engine::{Money, TransactionKind};
use ratatui::{style::Style, text::Span};

use crate::ui::theme::Theme;

/// Amount of an entry: `+` for income, `-` for expense, a label for notes.
pub fn styled_amount(kind: TransactionKind, amount: Money, theme: &Theme) -> Span<'static> {
    match kind {
        TransactionKind::Income => {
            Span::styled(format!("+{amount}"), Style::default().fg(theme.income))
        }
        TransactionKind::Expense => {
            Span::styled(format!("-{amount}"), Style::default().fg(theme.expense))
        }
        TransactionKind::Note => Span::styled(kind.label(), Style::default().fg(theme.note)),
    }
}

/// Signed total, colored by sign.
pub fn styled_net(amount: Money, theme: &Theme) -> Span<'static> {
    let color = if amount.is_negative() {
        theme.expense
    } else {
        theme.income
    };
    Span::styled(amount.to_string(), Style::default().fg(color))
}

pub fn kind_color(kind: TransactionKind, theme: &Theme) -> ratatui::style::Color {
    match kind {
        TransactionKind::Income => theme.income,
        TransactionKind::Expense => theme.expense,
        TransactionKind::Note => theme.note,
    }
}
