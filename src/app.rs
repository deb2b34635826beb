// src/app.rs

use crate::core::knowledge_base::{findings_for, Finding};
use crate::core::models::{AnalysisReport, Severity};
use crate::core::target::with_default_scheme;
use ratatui::widgets::ListState;

pub const SPINNER_CHARS: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

// Points the gauge moves per tick while catching up with the real score.
const SCORE_ANIMATION_STEP: u8 = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppState {
    Idle,
    Analyzing,
    Finished,
    /// The analysis was rejected or aborted; holds the message to show.
    Failed(String),
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReportSummary {
    pub score: u8,
    pub critical_issues: usize,
    pub warning_issues: usize,
    pub info_issues: usize,
}

pub struct App {
    pub should_quit: bool,
    pub show_disclaimer: bool,
    pub state: AppState,
    pub input: String,
    pub report: Option<AnalysisReport>,
    pub findings: Vec<Finding>,
    pub summary: ReportSummary,
    pub finding_list_state: ListState,
    pub spinner_frame: usize,
    /// Score currently drawn by the gauge; animates toward `summary.score`.
    pub displayed_score: u8,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            should_quit: false,
            show_disclaimer: true,
            state: AppState::Idle,
            input: String::new(),
            report: None,
            findings: Vec::new(),
            summary: ReportSummary::default(),
            finding_list_state: ListState::default(),
            spinner_frame: 0,
            displayed_score: 0,
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn acknowledge_disclaimer(&mut self) {
        self.show_disclaimer = false;
    }

    /// Clears the previous result and returns to the input box.
    pub fn reset(&mut self) {
        self.state = AppState::Idle;
        self.input.clear();
        self.report = None;
        self.findings.clear();
        self.summary = ReportSummary::default();
        self.finding_list_state = ListState::default();
        self.spinner_frame = 0;
        self.displayed_score = 0;
    }

    /// The URL to analyze, with `https://` assumed when no scheme was typed.
    pub fn target_url(&self) -> String {
        with_default_scheme(&self.input)
    }

    pub fn start_analysis(&mut self) {
        self.state = AppState::Analyzing;
        self.spinner_frame = 0;
    }

    /// Advances the animations; called once per UI loop iteration.
    pub fn tick(&mut self) {
        match self.state {
            AppState::Analyzing => {
                self.spinner_frame = (self.spinner_frame + 1) % SPINNER_CHARS.len();
            }
            AppState::Finished if self.displayed_score < self.summary.score => {
                self.displayed_score = self
                    .displayed_score
                    .saturating_add(SCORE_ANIMATION_STEP)
                    .min(self.summary.score);
            }
            _ => {}
        }
    }

    pub fn set_report(&mut self, report: AnalysisReport) {
        self.findings = findings_for(&report);
        self.summary = summarize(&report, &self.findings);
        self.displayed_score = 0;
        self.finding_list_state = ListState::default();
        if !self.findings.is_empty() {
            self.finding_list_state.select(Some(0));
        }
        self.report = Some(report);
        self.state = AppState::Finished;
    }

    pub fn set_failure(&mut self, message: String) {
        self.report = None;
        self.findings.clear();
        self.state = AppState::Failed(message);
    }

    pub fn select_next(&mut self) {
        if self.findings.is_empty() {
            return;
        }
        let next = match self.finding_list_state.selected() {
            Some(i) if i + 1 < self.findings.len() => i + 1,
            _ => 0,
        };
        self.finding_list_state.select(Some(next));
    }

    pub fn select_previous(&mut self) {
        if self.findings.is_empty() {
            return;
        }
        let previous = match self.finding_list_state.selected() {
            Some(0) | None => self.findings.len() - 1,
            Some(i) => i - 1,
        };
        self.finding_list_state.select(Some(previous));
    }
}

fn summarize(report: &AnalysisReport, findings: &[Finding]) -> ReportSummary {
    let count = |severity: Severity| {
        findings
            .iter()
            .filter(|f| f.detail().is_some_and(|d| d.severity == severity))
            .count()
    };
    ReportSummary {
        score: report.security.safety_score,
        critical_issues: count(Severity::Critical),
        warning_issues: count(Severity::Warning),
        info_issues: count(Severity::Info),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{
        ContentReport, DomainReport, LoadSpeed, PerformanceReport, SecurityReport,
        TechnologyReport,
    };

    fn plaintext_report() -> AnalysisReport {
        AnalysisReport {
            url: "http://example.com/".into(),
            analysis_time: 0.5,
            security: SecurityReport {
                ssl_enabled: false,
                ssl_valid: false,
                https_redirect: false,
                suspicious_patterns: vec![],
                safety_score: 75,
            },
            performance: PerformanceReport {
                response_time: 0.1,
                page_size: 10,
                status_code: 200,
                load_speed: LoadSpeed::Fast,
            },
            content: ContentReport::blocked(),
            technology: TechnologyReport::blocked(),
            domain: DomainReport::unavailable("example.com"),
        }
    }

    #[test]
    fn report_populates_summary_and_selection() {
        let mut app = App::new();
        app.start_analysis();
        app.set_report(plaintext_report());

        assert_eq!(app.state, AppState::Finished);
        assert_eq!(app.summary.score, 75);
        // plaintext, no https variant, whois unavailable
        assert_eq!(app.summary.critical_issues, 1);
        assert_eq!(app.summary.warning_issues, 1);
        assert_eq!(app.summary.info_issues, 1);
        assert_eq!(app.finding_list_state.selected(), Some(0));
    }

    #[test]
    fn selection_wraps_around() {
        let mut app = App::new();
        app.set_report(plaintext_report());
        app.select_previous();
        assert_eq!(app.finding_list_state.selected(), Some(2));
        app.select_next();
        assert_eq!(app.finding_list_state.selected(), Some(0));
    }

    #[test]
    fn gauge_animates_up_to_score() {
        let mut app = App::new();
        app.set_report(plaintext_report());
        for _ in 0..100 {
            app.tick();
        }
        assert_eq!(app.displayed_score, 75);
    }

    #[test]
    fn reset_returns_to_idle() {
        let mut app = App::new();
        app.input.push_str("example.com");
        assert_eq!(app.target_url(), "https://example.com");
        app.set_report(plaintext_report());
        app.reset();
        assert_eq!(app.state, AppState::Idle);
        assert!(app.report.is_none());
        assert!(app.input.is_empty());
        assert_eq!(app.displayed_score, 0);
    }
}
