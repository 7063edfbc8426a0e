//! Default score: `10000 - waitingTime * count` from the statistics file.
//!
//! The run only counts when the `performance` record's end time matches the
//! end time configured in the scenario, otherwise the player closed the
//! simulator early and the run is incomplete.

use crate::artifacts::{parse_end_time, scan_records};
use crate::config::GameConfig;
use crate::scoring::ScoreRecord;

pub fn compute(config: &GameConfig, category: &str) -> ScoreRecord {
    let configured_end = parse_end_time(&config.scenario_config(category));
    let records = scan_records(
        &config.artifact(category, "stats.xml"),
        &["performance", "vehicleTripStatistics"],
    );
    if records.is_empty() {
        return ScoreRecord::incomplete();
    }

    let mut total_waiting = 0.0;
    let mut arrived = 0.0;
    for record in &records {
        if record.tag == "performance" {
            match (record.num("end"), configured_end) {
                (Some(end), Some(expected)) if end == expected => {}
                _ => return ScoreRecord::incomplete(),
            }
        } else {
            let (Some(waiting), Some(count)) = (record.num("waitingTime"), record.num("count"))
            else {
                return ScoreRecord::incomplete();
            };
            total_waiting = waiting * count;
            arrived = count;
        }
    }

    ScoreRecord {
        score: (10000.0 - total_waiting) as i64,
        participants: arrived.max(0.0) as u64,
        complete: true,
    }
}
