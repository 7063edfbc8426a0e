//! Four-junction square score: accumulated time loss with a penalty for runs
//! ended before the expected demand was served.

use crate::artifacts::scan_records;
use crate::config::GameConfig;
use crate::scoring::ScoreRecord;

const MAX_SCORE: f64 = 1000.0;
/// Vehicles the scenario inserts over a full run.
const EXPECTED_VEHICLE_COUNT: f64 = 142.0;

pub fn compute(config: &GameConfig, category: &str) -> ScoreRecord {
    let mut total_time_loss = 0.0;
    let mut trips: u64 = 0;
    let mut arrived: u64 = 0;

    for trip in scan_records(&config.artifact(category, "tripinfos.xml"), &["tripinfo"]) {
        let (Some(time_loss), Some(depart_delay)) =
            (trip.num("timeLoss"), trip.num("departDelay"))
        else {
            continue;
        };
        total_time_loss += time_loss + depart_delay;
        trips += 1;
        if trip.num("arrival").unwrap_or(0.0) > 0.0 {
            arrived += 1;
        }
    }

    if trips == 0 {
        return ScoreRecord::incomplete();
    }

    // An aborted run should land near 0, a full do-nothing run loses roughly
    // 8000 time units of travel time.
    let early_end_penalty =
        (EXPECTED_VEHICLE_COUNT - trips as f64) * (MAX_SCORE / EXPECTED_VEHICLE_COUNT);
    log::debug!(
        "trips={trips} arrived={arrived} timeLoss={total_time_loss} \
         earlyEndPenalty={early_end_penalty}"
    );

    ScoreRecord {
        score: (MAX_SCORE - early_end_penalty - total_time_loss / 10.0) as i64,
        participants: arrived,
        complete: true,
    }
}
