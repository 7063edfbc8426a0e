//! Switch trace extraction from the traffic-light state-change log.
//!
//! The simulator logs one `tlsstate` record per step and controller; the
//! trace keeps only actual program changes, flattened as alternating
//! controller-id/timestamp pairs. It is stored with a highscore entry as
//! provenance and never used for ranking.

use std::collections::HashMap;
use std::path::Path;

use crate::artifacts::records::scan_records;

/// Parse `<path>` into a switch trace. A missing file (the scenario has no
/// traffic lights, or the run never started) yields an empty trace.
pub fn read_switch_trace(path: &Path) -> Vec<String> {
    let mut trace = Vec::new();
    let mut last_program: HashMap<String, String> = HashMap::new();
    for record in scan_records(path, &["tlsstate"]) {
        let (Some(time), Some(id), Some(program)) = (
            record.attr("time"),
            record.attr("id"),
            record.attr("programID"),
        ) else {
            continue;
        };
        if last_program.get(id).map(String::as_str) != Some(program) {
            last_program.insert(id.to_string(), program.to_string());
            trace.push(id.to_string());
            trace.push(time.to_string());
        }
    }
    trace
}
