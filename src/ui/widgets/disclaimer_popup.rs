// src/ui/widgets/disclaimer_popup.rs

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    text::Line,
};

/// Renders the disclaimer popup on top of the existing UI.
///
/// A modal window explaining what an analysis does on the network and how far the
/// score can be trusted. The area is cleared first so the UI underneath does not
/// bleed through.
///
/// # Arguments
/// * `frame` - A mutable reference to the `Frame` used for rendering the TUI.
/// * `area` - The `Rect` representing the total area available for rendering.
pub fn render_disclaimer_popup(frame: &mut Frame, area: Rect) {
    let disclaimer_text = Text::from(vec![
        Line::from("BEFORE YOU ANALYZE A URL".bold().yellow()),
        Line::from(""),
        Line::from("url-intel fetches the page you enter, probes its TLS endpoint and queries public WHOIS servers. The target sees these requests and may log them."),
        Line::from(""),
        Line::from("The safety score is a heuristic built from weak signals. A high score does not make a site trustworthy, and a low score does not prove it malicious."),
        Line::from(""),
        Line::from("By continuing you agree to the following:"),
        Line::from("1. You will only analyze URLs you are allowed to request."),
        Line::from("2. You will not rely on this report as the only basis for a security decision."),
        Line::from("3. The authors assume NO liability for any use of the results."),
        Line::from(""),
        Line::from("Press ".bold() + "Enter".bold().yellow() + " to Acknowledge and Continue, ".bold() + "Esc".bold().yellow() + " to quit".bold()),
    ]);

    let block = Block::default()
        .title("Disclaimer")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let popup_area = centered_rect(70, 80, area);

    let popup = Paragraph::new(disclaimer_text)
        .block(block)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center);

    frame.render_widget(Clear, popup_area);
    frame.render_widget(popup, popup_area);
}

/// Computes a `Rect` centered within `r`, sized as a percentage of it.
///
/// # Arguments
/// * `percent_x` - The desired width of the popup as a percentage of the parent area.
/// * `percent_y` - The desired height of the popup as a percentage of the parent area.
/// * `r` - The parent `Rect` to center the new area within.
///
/// # Returns
/// A new `Rect` that is centered within `r`.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
