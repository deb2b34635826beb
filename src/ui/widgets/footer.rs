// src/ui/widgets/footer.rs

use crate::app::{App, AppState};
use ratatui::{
    prelude::*,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Renders the footer widget, which displays available actions.
pub fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let key = |label: &'static str| Span::styled(label, Style::new().bold().fg(Color::Yellow));

    let spans = if app.show_disclaimer {
        Line::from(vec![key("Enter"), Span::raw(" to continue, "), key("Esc"), Span::raw(" to quit.")])
    } else {
        match app.state {
            AppState::Idle => Line::from(vec![
                Span::raw("Press "),
                key("Enter"),
                Span::raw(" to analyze, "),
                key("Esc"),
                Span::raw(" to quit."),
            ]),
            AppState::Finished | AppState::Failed(_) => Line::from(vec![
                key("[N]"),
                Span::raw("ew analysis, "),
                key("[↑↓]"),
                Span::raw(" Browse findings, "),
                key("[Q]"),
                Span::raw("uit"),
            ]),
            AppState::Analyzing => Line::from("Analyzing... Press Esc to quit."),
        }
    };

    let footer = Paragraph::new(spans).alignment(Alignment::Center);
    frame.render_widget(footer, area);
}
