//! Local persistence of the highscore table, plus the load order: remote
//! server first, then the local file, then the bundled reference file, then
//! an empty table. Every fallback is silent; persistence failures carry a
//! typed reason that best-effort callers log and drop.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::GameConfig;
use crate::highscore::remote::RemoteStore;
use crate::highscore::{HighscoreEntry, HighscoreTable};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("cannot encode score table: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// On-disk shape of `scores.json` and `refscores.json`.
#[derive(Debug, Serialize, Deserialize)]
struct ScoreFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    saved_at: Option<String>,
    categories: BTreeMap<String, Vec<HighscoreEntry>>,
}

pub struct HighscoreStore {
    score_file: PathBuf,
    ref_score_file: PathBuf,
    table_size: usize,
    remote: Option<RemoteStore>,
}

impl HighscoreStore {
    pub fn new(config: &GameConfig) -> Self {
        let remote = config.upload_enabled.then(|| RemoteStore::new(config));
        HighscoreStore {
            score_file: config.score_file(),
            ref_score_file: config.ref_score_file(),
            table_size: config.table_size,
            remote,
        }
    }

    /// Load the table, trying each source in order. Never fails; the last
    /// resort is an empty table.
    pub fn load(&self) -> HighscoreTable {
        if let Some(remote) = &self.remote {
            match remote.fetch_top(self.table_size) {
                Ok(rows) => {
                    log::debug!("highscores loaded from server");
                    return HighscoreTable::from_rows(self.table_size, rows);
                }
                Err(err) => log::debug!("server highscore fetch failed: {err}"),
            }
        }
        self.load_local()
    }

    /// Load from the local file, falling back to the reference file, then to
    /// an empty table. Skips the server even when upload is enabled.
    pub fn load_local(&self) -> HighscoreTable {
        match self.load_file(&self.score_file) {
            Ok(rows) => return HighscoreTable::from_rows(self.table_size, rows),
            Err(err) => log::debug!("local highscore load failed: {err}"),
        }
        match self.load_file(&self.ref_score_file) {
            Ok(rows) => HighscoreTable::from_rows(self.table_size, rows),
            Err(err) => {
                log::debug!("reference highscore load failed: {err}");
                HighscoreTable::new(self.table_size)
            }
        }
    }

    /// Clear all scores and reseed from the reference file when it is
    /// readable, else leave the table empty.
    pub fn reset(&self, table: &mut HighscoreTable) {
        table.clear();
        match self.load_file(&self.ref_score_file) {
            Ok(rows) => table.merge_rows(rows),
            Err(err) => log::debug!("no reference highscores to reseed from: {err}"),
        }
    }

    /// Write the table to the local file, via a temporary file and rename so
    /// an interrupted write never leaves a corrupt score file behind.
    pub fn persist(&self, table: &HighscoreTable) -> Result<(), StoreError> {
        let payload = ScoreFile {
            saved_at: Some(chrono::Utc::now().to_rfc3339()),
            categories: table.categories().clone(),
        };
        let serialized = serde_json::to_string_pretty(&payload).map_err(StoreError::Encode)?;
        let tmp = self.score_file.with_extension("json.tmp");
        fs::write(&tmp, serialized).map_err(|source| StoreError::Write {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.score_file).map_err(|source| StoreError::Write {
            path: self.score_file.clone(),
            source,
        })
    }

    /// Best-effort mirror of one placed entry to the server. Does nothing
    /// when upload is disabled; failures are logged and dropped.
    pub fn upload_entry(&self, category: &str, entry: &HighscoreEntry) {
        let Some(remote) = &self.remote else { return };
        match remote.upload(category, &entry.name, &entry.switch_trace, entry.score) {
            Ok(()) => log::debug!("uploaded score for '{category}'"),
            Err(err) => log::warn!("highscore upload failed: {err}"),
        }
    }

    fn load_file(
        &self,
        path: &Path,
    ) -> Result<BTreeMap<String, Vec<HighscoreEntry>>, StoreError> {
        let raw = fs::read_to_string(path).map_err(|source| StoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file: ScoreFile = serde_json::from_str(&raw).map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(file.categories)
    }
}
