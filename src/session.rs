//! Game session control: scenario discovery, launching the external
//! simulator, and folding a finished run into the highscore table.

use std::env;
use std::path::Path;
use std::process::Command;

use serde::Serialize;
use thiserror::Error;

use crate::artifacts::read_switch_trace;
use crate::config::GameConfig;
use crate::highscore::store::HighscoreStore;
use crate::highscore::{HighscoreEntry, HighscoreTable};
use crate::scoring::{score_category, ScoreRecord};

/// Environment variable overriding the simulator binary.
pub const SIMULATOR_BIN_ENV: &str = "GREENWAVE_SUMO_BIN";
const DEFAULT_SIMULATOR_BIN: &str = "sumo-gui";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("unknown scenario '{0}'")]
    UnknownScenario(String),
    #[error("failed to launch simulator '{binary}': {source}")]
    Launch {
        binary: String,
        source: std::io::Error,
    },
}

/// Everything a finished run leaves behind for the highscore flow.
#[derive(Debug, Clone, Serialize)]
pub struct SessionOutcome {
    pub category: String,
    pub record: ScoreRecord,
    pub switch_trace: Vec<String>,
}

/// Scenario categories available in the base directory, sorted: one per
/// `*.sumocfg` file, named by its stem.
pub fn scenarios(config: &GameConfig) -> Vec<String> {
    let mut categories = Vec::new();
    let Ok(dir) = std::fs::read_dir(&config.base_dir) else {
        return categories;
    };
    for entry in dir.flatten() {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) == Some("sumocfg") {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                categories.push(stem.to_string());
            }
        }
    }
    categories.sort();
    categories
}

/// Launch the simulator for a scenario and block until it exits, then score
/// whatever artifacts it left behind. No timeout is enforced on the
/// subprocess; the player ends the run by closing the simulator.
pub fn run(config: &GameConfig, category: &str) -> Result<SessionOutcome, SessionError> {
    let cfg_path = config.scenario_config(category);
    if !cfg_path.exists() {
        return Err(SessionError::UnknownScenario(category.to_string()));
    }
    let binary = env::var(SIMULATOR_BIN_ENV).unwrap_or_else(|_| DEFAULT_SIMULATOR_BIN.to_string());
    log::info!("starting {binary} for scenario '{category}'");
    let status = Command::new(&binary)
        .current_dir(&config.base_dir)
        .args(["-S", "-G", "-Q"])
        .arg("-c")
        .arg(cfg_name(&cfg_path))
        .args(["-l", "log"])
        .arg("--output-prefix")
        .arg(format!("{category}."))
        .arg("--duration-log.statistics")
        .args(["--statistic-output", "stats.xml"])
        .arg("--tripinfo-output.write-unfinished")
        .status()
        .map_err(|source| SessionError::Launch {
            binary: binary.clone(),
            source,
        })?;
    if !status.success() {
        // An aborted run still leaves artifacts; scoring decides completeness.
        log::warn!("simulator exited with {status}");
    }
    Ok(score_artifacts(config, category))
}

/// Score the artifacts of an already-finished run and collect its switch
/// trace. Usable without launching anything, e.g. for re-scoring.
pub fn score_artifacts(config: &GameConfig, category: &str) -> SessionOutcome {
    let record = score_category(config, category);
    let switch_trace = read_switch_trace(&config.artifact(category, "tlsstate.xml"));
    SessionOutcome {
        category: category.to_string(),
        record,
        switch_trace,
    }
}

/// Rank a completed run into the table under the player's name, persist the
/// table locally and mirror the entry to the server. Local persistence is
/// never gated by the upload; both failures only log. Returns the 0-based
/// rank, or `None` when the run was incomplete or did not make the table.
pub fn record_result(
    store: &HighscoreStore,
    table: &mut HighscoreTable,
    name: &str,
    outcome: &SessionOutcome,
) -> Option<usize> {
    if !outcome.record.complete {
        return None;
    }
    let entry = HighscoreEntry::new(name, outcome.switch_trace.clone(), outcome.record.score);
    let rank = table.insert(&outcome.category, entry.clone())?;
    if let Err(err) = store.persist(table) {
        log::warn!("failed to persist highscores: {err}");
    }
    store.upload_entry(&outcome.category, &entry);
    Some(rank)
}

fn cfg_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_config(name: &str) -> GameConfig {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("greenwave-{name}-{stamp}"));
        fs::create_dir_all(&dir).expect("create temp dir");
        let mut config = GameConfig::default();
        config.base_dir = dir;
        config.upload_enabled = false;
        config
    }

    #[test]
    fn scenarios_lists_sumocfg_stems_sorted() {
        let config = temp_config("scenarios");
        fs::write(config.base_dir.join("square.sumocfg"), "<configuration/>").unwrap();
        fs::write(config.base_dir.join("cross.sumocfg"), "<configuration/>").unwrap();
        fs::write(config.base_dir.join("notes.txt"), "ignored").unwrap();
        assert_eq!(scenarios(&config), vec!["cross", "square"]);
        fs::remove_dir_all(&config.base_dir).ok();
    }

    #[test]
    fn run_rejects_unknown_scenario() {
        let config = temp_config("unknown");
        let err = run(&config, "nope").unwrap_err();
        assert!(matches!(err, SessionError::UnknownScenario(_)));
        fs::remove_dir_all(&config.base_dir).ok();
    }

    #[test]
    fn incomplete_run_is_never_recorded() {
        let config = temp_config("incomplete");
        let store = HighscoreStore::new(&config);
        let mut table = HighscoreTable::new(config.table_size);
        let outcome = SessionOutcome {
            category: "cross".to_string(),
            record: ScoreRecord::incomplete(),
            switch_trace: Vec::new(),
        };
        assert_eq!(record_result(&store, &mut table, "ada", &outcome), None);
        assert!(table.is_empty());
        assert!(!config.score_file().exists());
        fs::remove_dir_all(&config.base_dir).ok();
    }

    #[test]
    fn completed_run_is_ranked_and_persisted() {
        let config = temp_config("record");
        let store = HighscoreStore::new(&config);
        let mut table = HighscoreTable::new(config.table_size);
        let outcome = SessionOutcome {
            category: "cross".to_string(),
            record: ScoreRecord {
                score: 9900,
                participants: 50,
                complete: true,
            },
            switch_trace: vec!["junction0".to_string(), "30.00".to_string()],
        };
        assert_eq!(record_result(&store, &mut table, "ada", &outcome), Some(0));
        assert!(config.score_file().exists());
        let reloaded = store.load();
        assert_eq!(reloaded.entries("cross").unwrap()[0].name, "ada");
        fs::remove_dir_all(&config.base_dir).ok();
    }
}
