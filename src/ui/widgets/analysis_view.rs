// src/ui/widgets/analysis_view.rs

use crate::app::{App, AppState, SPINNER_CHARS};
use crate::core::knowledge_base::FindingDetail;
use crate::core::models::{AnalysisReport, LoadSpeed, Severity};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    text::Line,
};

pub fn render_analysis_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let main_block = Block::default()
        .borders(Borders::ALL)
        .title("Analysis Report (Navigate with ↑ ↓)");

    let report = match (&app.state, &app.report) {
        (AppState::Finished, Some(report)) => report.clone(),
        (AppState::Failed(message), _) => {
            let text = Text::from(vec![
                Line::from(""),
                Line::from("ANALYSIS FAILED".bold().fg(Color::Red)),
                Line::from(""),
                Line::from(message.as_str()),
            ]);
            let p = Paragraph::new(text)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(main_block);
            frame.render_widget(p, area);
            return;
        }
        (AppState::Analyzing, _) => {
            let spinner_char = SPINNER_CHARS[app.spinner_frame % SPINNER_CHARS.len()];
            let p = Paragraph::new(Line::from(vec![
                Span::styled(format!("{} ", spinner_char), Style::default().fg(Color::Cyan)),
                Span::raw("Analyzing... Please wait."),
            ]))
            .alignment(Alignment::Center)
            .block(main_block);
            frame.render_widget(p, area);
            return;
        }
        _ => {
            let p = Paragraph::new("Analysis results will appear here...")
                .alignment(Alignment::Center)
                .block(main_block);
            frame.render_widget(p, area);
            return;
        }
    };

    let inner_area = main_block.inner(area);
    frame.render_widget(main_block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(12),
            Constraint::Percentage(35),
            Constraint::Min(0),
        ])
        .split(inner_area);

    frame.render_widget(
        Paragraph::new(facet_lines(&report)).wrap(Wrap { trim: false }),
        chunks[0],
    );

    let items: Vec<ListItem> = app
        .findings
        .iter()
        .filter_map(|f| f.detail().map(|detail| (f, detail)))
        .map(|(f, detail)| {
            let mut spans = vec![
                Span::styled(format!("[{}] ", detail.category), Style::default().fg(Color::DarkGray)),
                Span::styled(detail.title, severity_style(detail.severity)),
            ];
            if let Some(evidence) = &f.evidence {
                spans.push(Span::styled(format!(" ({})", evidence), Style::default().fg(Color::Gray)));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let findings_list = List::new(items)
        .block(Block::default().borders(Borders::TOP).title("Findings"))
        .highlight_style(Style::new().bg(Color::DarkGray).add_modifier(Modifier::BOLD));
    frame.render_stateful_widget(findings_list, chunks[1], &mut app.finding_list_state);

    let detail_block = Block::default().borders(Borders::TOP).title("Details");
    let selected = app
        .finding_list_state
        .selected()
        .and_then(|i| app.findings.get(i))
        .and_then(|f| f.detail());
    match selected {
        Some(detail) => render_finding_detail(frame, detail, detail_block, chunks[2]),
        None => render_placeholder_details(frame, app, detail_block, chunks[2]),
    }
}

fn severity_style(severity: Severity) -> Style {
    match severity {
        Severity::Critical => Style::default().fg(Color::Red),
        Severity::Warning => Style::default().fg(Color::Yellow),
        Severity::Info => Style::default().fg(Color::Cyan),
    }
}

/// One line per facet of the report, label in gray.
fn facet_lines(report: &AnalysisReport) -> Vec<Line<'static>> {
    let field = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("{:<14}", label), Style::default().fg(Color::DarkGray)),
            Span::raw(value),
        ])
    };
    let opt = |value: &Option<String>| value.clone().filter(|v| !v.is_empty()).unwrap_or_else(|| "-".into());
    let list = |values: &[String]| if values.is_empty() { "-".to_string() } else { values.join(", ") };

    let p = &report.performance;
    let speed_style = match p.load_speed {
        LoadSpeed::Fast => Style::default().fg(Color::Green),
        LoadSpeed::Medium => Style::default().fg(Color::Yellow),
        LoadSpeed::Slow | LoadSpeed::Unreachable => Style::default().fg(Color::Red),
    };

    vec![
        field("URL", report.url.clone()),
        Line::from(vec![
            Span::styled(format!("{:<14}", "Performance"), Style::default().fg(Color::DarkGray)),
            Span::styled(p.load_speed.to_string(), speed_style),
            Span::raw(format!(
                "  {:.3}s, HTTP {}, {} bytes",
                p.response_time, p.status_code, p.page_size
            )),
        ]),
        field("Title", opt(&report.content.title)),
        field("Description", opt(&report.content.description)),
        field(
            "Content",
            format!(
                "{} words, {} external links, forms: {}",
                report.content.word_count,
                report.content.external_links,
                if report.content.has_forms { "yes" } else { "no" }
            ),
        ),
        field("Server", opt(&report.technology.server)),
        field("CMS", opt(&report.technology.cms_detected)),
        field("Domain", report.domain.domain.clone()),
        field("Registrar", report.domain.registrar.clone()),
        field(
            "Registered",
            format!("{} (expires {})", report.domain.creation_date, report.domain.expiration_date),
        ),
        field("Country", report.domain.country.clone()),
        field("Technologies", list(&report.technology.technologies)),
    ]
}

fn render_finding_detail(frame: &mut Frame, detail: &FindingDetail, block: Block, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from("WHAT IT MEANS:".yellow().bold()),
        Line::from(detail.description),
        Line::from(""),
        Line::from("WHAT TO DO:".yellow().bold()),
        Line::from(detail.remediation),
    ];
    let p = Paragraph::new(text).wrap(Wrap { trim: true }).block(block);
    frame.render_widget(p, area);
}

fn render_placeholder_details(frame: &mut Frame, app: &App, block: Block, area: Rect) {
    let total_issues = app.summary.critical_issues + app.summary.warning_issues;

    let placeholder_text = if total_issues == 0 {
        Text::from(vec![
            Line::from(""),
            Line::from("✓ NO WARNING SIGNS".bold().fg(Color::Green)),
            Line::from(""),
            Line::from("No critical or warning findings were raised for this URL."),
        ])
    } else {
        Text::from("Select an item above to see details.")
    };

    let p = Paragraph::new(placeholder_text).alignment(Alignment::Center).block(block);
    frame.render_widget(p, area);
}
