// src/cli.rs

use crate::config::AnalyzerConfig;
use crate::core::error::AnalysisError;
use crate::core::knowledge_base::findings_for;
use crate::core::models::{AnalysisReport, ConnectivityReport};
use crate::core::scanner::connectivity::probe_connectivity;
use crate::core::scanner::Analyzer;
use crate::core::target::validate_target;
use clap::Parser;
use color_eyre::eyre::Result;
use serde_json::json;
use std::process::ExitCode;
use tracing::error;

#[derive(Parser, Debug)]
#[command(
    name = "url-intel",
    about = "Best-effort intelligence report for a single URL",
    version,
    long_about = None
)]
pub struct Args {
    /// URL to analyze; without it the interactive interface starts
    pub url: Option<String>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Only check whether the URL answers a HEAD request
    #[arg(long)]
    pub probe: bool,

    /// Timeout for the page fetch, in seconds
    #[arg(long, value_name = "SECS", default_value_t = 15)]
    pub timeout: u64,

    /// Timeout for the WHOIS lookup, in seconds
    #[arg(long, value_name = "SECS", default_value_t = 10)]
    pub whois_timeout: u64,

    /// Mirror log output to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn analyzer_config(&self) -> AnalyzerConfig {
        AnalyzerConfig::default()
            .with_fetch_timeout(self.timeout)
            .with_whois_timeout(self.whois_timeout)
    }
}

/// Runs one analysis (or connectivity probe) without the terminal interface and
/// prints the result to stdout.
pub async fn run_headless(args: &Args, target: &str) -> Result<ExitCode> {
    let config = args.analyzer_config();

    if args.probe {
        let url = match validate_target(target) {
            Ok(url) => url,
            Err(e) => return Ok(report_failure(args.json, &e)),
        };
        let report = probe_connectivity(&url, &config).await;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print!("{}", render_probe_text(&report));
        }
        return Ok(if report.reachable { ExitCode::SUCCESS } else { ExitCode::FAILURE });
    }

    let analyzer = Analyzer::new(config);
    match analyzer.analyze(target).await {
        Ok(report) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", render_report_text(&report));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => Ok(report_failure(args.json, &e)),
    }
}

fn report_failure(as_json: bool, e: &AnalysisError) -> ExitCode {
    error!(error = %e, "Headless run failed.");
    if as_json {
        println!("{}", json!({ "error": e.to_string() }));
    } else {
        eprintln!("error: {}", e);
    }
    if e.is_validation() {
        ExitCode::from(2)
    } else {
        ExitCode::FAILURE
    }
}

fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or("-")
}

fn join_or_dash(values: &[String]) -> String {
    if values.is_empty() {
        "-".to_string()
    } else {
        values.join(", ")
    }
}

fn field(label: &str, value: impl std::fmt::Display) -> String {
    format!("{:<17}{}", label, value)
}

/// Plain-text rendering of a report for terminals and pipes.
pub fn render_report_text(report: &AnalysisReport) -> String {
    let s = &report.security;
    let p = &report.performance;
    let c = &report.content;
    let t = &report.technology;
    let d = &report.domain;

    let mut lines = vec![
        field("URL:", &report.url),
        field("Analysis time:", format!("{:.2}s", report.analysis_time)),
        field("Safety score:", format!("{}/100", s.safety_score)),
        String::new(),
        "[Security]".to_string(),
        field("  HTTPS:", yes_no(s.ssl_enabled)),
        field("  Valid TLS:", yes_no(s.ssl_valid)),
        field("  HTTPS variant:", yes_no(s.https_redirect)),
        field("  Patterns:", join_or_dash(&s.suspicious_patterns)),
        "[Performance]".to_string(),
        field("  Response time:", format!("{:.3}s ({})", p.response_time, p.load_speed)),
        field("  Status code:", p.status_code),
        field("  Page size:", format!("{} bytes", p.page_size)),
        "[Content]".to_string(),
        field("  Title:", or_dash(c.title.as_deref())),
        field("  Description:", or_dash(c.description.as_deref())),
        field("  Keywords:", or_dash(c.keywords.as_deref())),
        field("  Words:", c.word_count),
        field("  Forms:", yes_no(c.has_forms)),
        field("  External links:", c.external_links),
        "[Technology]".to_string(),
        field("  Server:", or_dash(t.server.as_deref())),
        field("  Technologies:", join_or_dash(&t.technologies)),
        field("  Frameworks:", join_or_dash(&t.frameworks)),
        field("  CMS:", or_dash(t.cms_detected.as_deref())),
        "[Domain]".to_string(),
        field("  Domain:", &d.domain),
        field("  Registrar:", &d.registrar),
        field("  Created:", &d.creation_date),
        field("  Expires:", &d.expiration_date),
        field("  Country:", &d.country),
    ];

    let findings: Vec<String> = findings_for(report)
        .iter()
        .filter_map(|finding| {
            let detail = finding.detail()?;
            let evidence = finding
                .evidence
                .as_ref()
                .map(|e| format!(" ({})", e))
                .unwrap_or_default();
            Some(format!("  {:?}: {}{}", detail.severity, detail.title, evidence))
        })
        .collect();
    if !findings.is_empty() {
        lines.push("[Findings]".to_string());
        lines.extend(findings);
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

pub fn render_probe_text(report: &ConnectivityReport) -> String {
    let mut lines = vec![format!("{}: {}", report.url, report.message)];
    if let Some(status) = report.status_code {
        lines.push(format!("  Status code: {}", status));
    }
    if let Some(error) = report.error {
        lines.push(format!("  Error: {}", error));
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
