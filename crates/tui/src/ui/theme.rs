use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub text: Color,
    pub text_muted: Color,
    pub accent: Color,
    pub border: Color,
    pub border_focused: Color,
    pub highlight: Color,
    pub income: Color,
    pub expense: Color,
    pub note: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text: Color::Rgb(220, 220, 220),
            text_muted: Color::Rgb(140, 140, 140),
            accent: Color::Rgb(80, 160, 160),
            border: Color::Rgb(70, 80, 90),
            border_focused: Color::Rgb(80, 160, 160),
            highlight: Color::Rgb(30, 44, 52),
            income: Color::Rgb(90, 180, 110),
            expense: Color::Rgb(220, 100, 90),
            note: Color::Rgb(150, 140, 200),
            error: Color::Rgb(200, 80, 80),
        }
    }
}
