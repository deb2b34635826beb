// src/core/scanner/performance_scanner.rs

use crate::core::models::{FetchOutcome, LoadSpeed, PerformanceReport};
use std::time::Duration;
use tracing::debug;

const FAST_THRESHOLD_SECS: f64 = 1.0;
const MEDIUM_THRESHOLD_SECS: f64 = 3.0;

/// Classifies the fetch latency and reports payload size and status.
///
/// `elapsed` is the time since the analysis started, measured right after the
/// fetch attempt completed. A failed fetch yields the fixed unreachable record.
pub fn run_performance_scan(outcome: &FetchOutcome, elapsed: Duration) -> PerformanceReport {
    let response_time = round_millis(elapsed);

    let Some(page) = outcome.page() else {
        debug!(response_time, "No response, reporting target as unreachable.");
        return PerformanceReport {
            response_time,
            page_size: 0,
            status_code: 0,
            load_speed: LoadSpeed::Unreachable,
        };
    };

    let load_speed = classify(elapsed);
    debug!(response_time, %load_speed, bytes = page.body.len(), "Performance scan finished.");
    PerformanceReport {
        response_time,
        page_size: page.body.len(),
        status_code: page.status_code,
        load_speed,
    }
}

fn classify(elapsed: Duration) -> LoadSpeed {
    let secs = elapsed.as_secs_f64();
    if secs < FAST_THRESHOLD_SECS {
        LoadSpeed::Fast
    } else if secs < MEDIUM_THRESHOLD_SECS {
        LoadSpeed::Medium
    } else {
        LoadSpeed::Slow
    }
}

fn round_millis(elapsed: Duration) -> f64 {
    (elapsed.as_secs_f64() * 1000.0).round() / 1000.0
}
