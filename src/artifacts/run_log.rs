//! Extraction of labeled numeric fields from the plain-text run log, plus
//! detection of the completion marker the simulator prints when a run
//! reaches its configured end time.

use std::fs;
use std::path::Path;

/// Literal line fragment printed when the simulation ran to its end time.
pub const COMPLETION_MARKER: &str = "Simulation ended at time";

/// Fields scraped from the run log's statistics block. A field that never
/// appeared, or appeared with a non-numeric value, stays `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunLogSummary {
    pub inserted: Option<f64>,
    pub running: Option<f64>,
    pub waiting: Option<f64>,
    pub time_loss: Option<f64>,
    pub depart_delay: Option<f64>,
    pub depart_delay_waiting: Option<f64>,
    pub completed: bool,
}

/// Read and summarize a run log. An unreadable file reads as an empty,
/// incomplete log.
pub fn read_run_log(path: &Path) -> RunLogSummary {
    match fs::read_to_string(path) {
        Ok(raw) => parse_run_log(&raw),
        Err(err) => {
            log::debug!("cannot read {}: {err}", path.display());
            RunLogSummary::default()
        }
    }
}

pub fn parse_run_log(raw: &str) -> RunLogSummary {
    let mut summary = RunLogSummary::default();
    for line in raw.lines() {
        if line.contains(COMPLETION_MARKER) {
            summary.completed = true;
        }
        if let Some(value) = labeled_number(line, "Inserted:") {
            summary.inserted = Some(value);
        }
        if let Some(value) = labeled_number(line, "Running:") {
            summary.running = Some(value);
        }
        if let Some(value) = labeled_number(line, "Waiting:") {
            summary.waiting = Some(value);
        }
        if let Some(value) = labeled_number(line, "TimeLoss:") {
            summary.time_loss = Some(value);
        }
        if let Some(value) = labeled_number(line, "DepartDelay:") {
            summary.depart_delay = Some(value);
        }
        if let Some(value) = labeled_number(line, "DepartDelayWaiting:") {
            summary.depart_delay_waiting = Some(value);
        }
    }
    summary
}

/// First whitespace-separated token after `label`, parsed as a number. The
/// label must sit at the start of the line or after whitespace, so
/// `Waiting:` does not match inside `DepartDelayWaiting:`.
fn labeled_number(line: &str, label: &str) -> Option<f64> {
    let idx = line.find(label)?;
    if idx > 0 && !line[..idx].ends_with(char::is_whitespace) {
        return None;
    }
    line[idx + label.len()..]
        .split_whitespace()
        .next()?
        .parse::<f64>()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_LOG: &str = "Loading net-file from 'net.xml' ... done.
Simulation ended at time: 500.00
Reason: The final simulation step has been reached.
Statistics (avg of 120):
 Inserted: 120 (Loaded: 125)
 Running: 10
 Waiting: 5
 TimeLoss: 12.50
 DepartDelay: 1.25
 DepartDelayWaiting: 80.00
";

    #[test]
    fn parses_all_labeled_fields() {
        let summary = parse_run_log(SAMPLE_LOG);
        assert!(summary.completed);
        assert_eq!(summary.inserted, Some(120.0));
        assert_eq!(summary.running, Some(10.0));
        assert_eq!(summary.waiting, Some(5.0));
        assert_eq!(summary.time_loss, Some(12.5));
        assert_eq!(summary.depart_delay, Some(1.25));
        assert_eq!(summary.depart_delay_waiting, Some(80.0));
    }

    #[test]
    fn depart_delay_waiting_does_not_clobber_waiting() {
        let summary = parse_run_log(" Waiting: 5\n DepartDelayWaiting: 80\n");
        assert_eq!(summary.waiting, Some(5.0));
        assert_eq!(summary.depart_delay_waiting, Some(80.0));
        assert_eq!(summary.depart_delay, None);
    }

    #[test]
    fn missing_marker_reads_as_incomplete() {
        let summary = parse_run_log(" Inserted: 120\n TimeLoss: 12.5\n");
        assert!(!summary.completed);
        assert_eq!(summary.time_loss, Some(12.5));
    }

    #[test]
    fn non_numeric_field_stays_unset() {
        let summary = parse_run_log(" TimeLoss: n/a\n");
        assert_eq!(summary.time_loss, None);
    }

    #[test]
    fn unreadable_file_reads_as_empty() {
        let summary = read_run_log(Path::new("/nonexistent/run.log"));
        assert_eq!(summary, RunLogSummary::default());
    }
}
