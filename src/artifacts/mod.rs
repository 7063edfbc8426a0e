//! Readers for the output artifacts the simulator leaves behind after a run:
//! flat XML statistics/tripinfo files, the traffic-light state-change log and
//! the plain-text run log. All readers degrade to "no data" on missing or
//! malformed files; a bad artifact means an incomplete run, never a crash.

pub mod records;
pub mod run_log;
pub mod sim_config;
pub mod switches;

pub use records::{scan_records, XmlRecord};
pub use run_log::{read_run_log, RunLogSummary, COMPLETION_MARKER};
pub use sim_config::parse_end_time;
pub use switches::read_switch_trace;
