//! Highway score from the run log: penalizes time loss and depart delay of
//! inserted vehicles plus the delay of vehicles still waiting to depart.

use crate::artifacts::read_run_log;
use crate::config::GameConfig;
use crate::scoring::ScoreRecord;

pub fn compute(config: &GameConfig, category: &str) -> ScoreRecord {
    let summary = read_run_log(&config.artifact(category, "log"));
    if !summary.completed {
        return ScoreRecord::incomplete();
    }
    let (Some(time_loss), Some(inserted), Some(running)) =
        (summary.time_loss, summary.inserted, summary.running)
    else {
        return ScoreRecord::incomplete();
    };
    let waiting = summary.waiting.unwrap_or(0.0);
    let depart_delay = summary.depart_delay.unwrap_or(0.0);
    let depart_delay_waiting = summary.depart_delay_waiting.unwrap_or(0.0);
    if inserted + waiting <= 0.0 {
        return ScoreRecord::incomplete();
    }

    log::debug!(
        "timeLoss={time_loss} departDelay={depart_delay} \
         departDelayWaiting={depart_delay_waiting} inserted={inserted} \
         running={running} waiting={waiting}"
    );

    let weighted = (time_loss + depart_delay) * inserted + depart_delay_waiting * waiting;
    ScoreRecord {
        score: 10000 - (100.0 * weighted / (inserted + waiting)) as i64,
        participants: (inserted - running).max(0.0) as u64,
        complete: true,
    }
}
