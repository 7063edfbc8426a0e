//! Demand-responsive-transport score: average ride waiting time plus average
//! ride duration, subtracted from a 5000-point ceiling.

use crate::artifacts::scan_records;
use crate::config::GameConfig;
use crate::scoring::ScoreRecord;

/// Waiting time substituted for rides reporting a negative one. Negative
/// values come from unserved requests in malformed output and must count as
/// very bad service, not as a bonus.
const NEGATIVE_WAITING_PENALTY: f64 = 10000.0;

pub fn compute(config: &GameConfig, category: &str) -> ScoreRecord {
    let mut total_waiting = 0.0;
    let mut total_duration = 0.0;
    let mut rides: u64 = 0;
    let mut started: u64 = 0;
    let mut finished: u64 = 0;

    for ride in scan_records(&config.artifact(category, "tripinfos.xml"), &["ride"]) {
        let Some(waiting) = ride.num("waitingTime") else {
            continue;
        };
        rides += 1;
        total_waiting += if waiting < 0.0 {
            NEGATIVE_WAITING_PENALTY
        } else {
            waiting
        };
        if ride.num("duration").unwrap_or(-1.0) >= 0.0 {
            total_duration += ride.num("duration").unwrap_or(0.0);
            started += 1;
        }
        if ride.num("arrival").unwrap_or(-1.0) >= 0.0 {
            finished += 1;
        }
    }

    if rides == 0 {
        return ScoreRecord::incomplete();
    }

    let avg_waiting = total_waiting / rides as f64;
    let avg_duration = if started == 0 {
        0.0
    } else {
        total_duration / started as f64
    };
    log::debug!(
        "rides={rides} started={started} finished={finished} \
         avgWaiting={avg_waiting} avgDuration={avg_duration}"
    );

    ScoreRecord {
        score: 5000 - (avg_waiting + avg_duration) as i64,
        participants: rides,
        complete: true,
    }
}
