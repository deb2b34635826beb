// src/ui/widgets/summary.rs

use crate::app::{App, AppState};
use crate::core::models::LoadSpeed;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Paragraph},
    text::Line,
};

/// Renders the summary widget: safety score with an animated gauge, the pass/fail
/// state of the main checks, finding counts and detected technologies. Content only
/// appears once an analysis has finished.
///
/// # Arguments
/// * `frame` - The `Frame` used for rendering the UI.
/// * `app` - The application state, containing the report and its summary.
/// * `area` - The `Rect` defining the drawable area for this widget.
pub fn render_summary(frame: &mut Frame, app: &App, area: Rect) {
    let summary_container = Block::default().borders(Borders::ALL).title("Summary");
    frame.render_widget(summary_container, area);

    let summary_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Score & Rating section
            Constraint::Length(1), // Gauge chart
            Constraint::Length(1), // Spacer
            Constraint::Length(5), // Checks section
            Constraint::Length(1), // Spacer
            Constraint::Length(4), // Findings section
            Constraint::Length(1), // Spacer
            Constraint::Min(0),    // Technologies section
        ])
        .split(area);

    let Some(report) = app.report.as_ref().filter(|_| app.state == AppState::Finished) else {
        return;
    };

    // --- Score & Rating Section ---
    let (rating_text, rating_style) = match app.summary.score {
        90..=100 => ("Looks Safe", Style::default().fg(Color::Green)),
        75..=89 => ("Minor Concerns", Style::default().fg(Color::Cyan)),
        50..=74 => ("Be Careful", Style::default().fg(Color::Yellow)),
        _ => ("High Risk", Style::default().fg(Color::Red)),
    };
    let score_line = Line::from(format!("{}/100 ({})", app.summary.score, rating_text)).style(rating_style);
    let score_text = Text::from(vec![Line::from("Safety Score".bold()), score_line]);
    frame.render_widget(Paragraph::new(score_text).alignment(Alignment::Center), summary_chunks[0]);

    // --- Gauge Chart (Animated) ---
    let score_gauge = Gauge::default()
        .percent(u16::from(app.displayed_score.min(100)))
        .label("")
        .style(Style::default().fg(
            if app.displayed_score >= 80 { Color::Green }
            else if app.displayed_score >= 50 { Color::Yellow }
            else { Color::Red }
        ));
    frame.render_widget(score_gauge, summary_chunks[1]);

    // --- Checks Section ---
    let security = &report.security;
    let checks_block = Block::default().title("CHECKS".bold());
    let checks_to_render = [
        ("Encrypted (HTTPS)", security.ssl_enabled),
        ("Valid TLS handshake", security.ssl_valid),
        ("Reachable", report.performance.load_speed != LoadSpeed::Unreachable),
        ("No suspicious patterns", security.suspicious_patterns.is_empty()),
    ];
    let checks_lines: Vec<Line> = checks_to_render
        .into_iter()
        .map(|(name, passed)| {
            let (icon, style) = if passed { ("✓", Style::default().fg(Color::Green)) } else { ("✗", Style::default().fg(Color::Red)) };
            Line::from(vec![Span::styled(format!("{} ", icon), style), Span::raw(name)])
        })
        .collect();
    frame.render_widget(Paragraph::new(checks_lines).block(checks_block), summary_chunks[3]);

    // --- Findings Section ---
    let issues_block = Block::default().title("FINDINGS".bold());
    let details_text = Text::from(vec![
        Line::from(vec![Span::raw("Critical: "), Span::styled(app.summary.critical_issues.to_string(), Style::default().fg(Color::Red))]),
        Line::from(vec![Span::raw("Warnings: "), Span::styled(app.summary.warning_issues.to_string(), Style::default().fg(Color::Yellow))]),
        Line::from(vec![Span::raw("Info:     "), Span::styled(app.summary.info_issues.to_string(), Style::default().fg(Color::Cyan))]),
    ]);
    frame.render_widget(Paragraph::new(details_text).block(issues_block), summary_chunks[5]);

    // --- Technologies Section ---
    let tech_block = Block::default().title("TECHNOLOGIES".bold());
    let technology = &report.technology;
    let detected: Vec<&String> = technology
        .frameworks
        .iter()
        .chain(technology.technologies.iter())
        .chain(technology.cms_detected.iter())
        .collect();
    let tech_lines: Vec<Line> = if detected.is_empty() {
        vec![Line::from("Not identified.")]
    } else {
        detected
            .into_iter()
            .map(|name| {
                Line::from(vec![
                    Span::raw("- "),
                    Span::styled(name.clone(), Style::default().fg(Color::Cyan)),
                ])
            })
            .collect()
    };
    frame.render_widget(Paragraph::new(tech_lines).block(tech_block), summary_chunks[7]);
}
