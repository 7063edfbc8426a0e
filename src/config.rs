//! Runtime configuration for the launcher. Built once at startup from the
//! process arguments and environment, read-only afterwards.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Host of the central highscore server.
pub const DEFAULT_SCORE_SERVER: &str = "sumo.dlr.de";
/// Path (with fixed query prefix) of the highscore script on the server.
pub const DEFAULT_SCORE_PATH: &str = "/scores.php?game=TLS&";
/// Slots per category in the highscore table.
pub const DEFAULT_TABLE_SIZE: usize = 30;
/// Timeout for highscore fetch and upload, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;
/// Local highscore file, relative to the scenario directory.
pub const SCORE_FILE: &str = "scores.json";
/// Reference highscore file used to seed resets and as a load fallback.
pub const REF_SCORE_FILE: &str = "refscores.json";

/// Environment variable overriding the scenario/artifact directory.
pub const BASE_DIR_ENV: &str = "GREENWAVE_BASE";
/// Environment variable overriding the highscore server host.
pub const SCORE_SERVER_ENV: &str = "GREENWAVE_SCORE_SERVER";

#[derive(Debug, Clone)]
pub struct GameConfig {
    pub upload_enabled: bool,
    pub server_addr: String,
    pub server_path: String,
    pub timeout: Duration,
    pub table_size: usize,
    pub base_dir: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            upload_enabled: true,
            server_addr: DEFAULT_SCORE_SERVER.to_string(),
            server_path: DEFAULT_SCORE_PATH.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            table_size: DEFAULT_TABLE_SIZE,
            base_dir: PathBuf::from("."),
        }
    }
}

impl GameConfig {
    /// Build the configuration from process arguments. `noupload` anywhere in
    /// the argument list disables the best-effort server mirror; the scenario
    /// directory and server host come from the environment when set.
    pub fn from_args(args: &[String]) -> Self {
        let mut config = GameConfig::default();
        if args.iter().any(|arg| arg == "noupload") {
            config.upload_enabled = false;
        }
        if let Ok(dir) = env::var(BASE_DIR_ENV) {
            config.base_dir = PathBuf::from(dir);
        }
        if let Ok(host) = env::var(SCORE_SERVER_ENV) {
            config.server_addr = host;
        }
        config
    }

    /// Path of a scenario's `.sumocfg` file.
    pub fn scenario_config(&self, category: &str) -> PathBuf {
        self.base_dir.join(format!("{category}.sumocfg"))
    }

    /// Path of a run artifact for a category. The simulator is launched with
    /// `--output-prefix <category>.`, so artifacts land next to the scenario
    /// under names like `cross.stats.xml` or `A10KW.log`.
    pub fn artifact(&self, category: &str, suffix: &str) -> PathBuf {
        self.base_dir.join(format!("{category}.{suffix}"))
    }

    /// Path of the local highscore file.
    pub fn score_file(&self) -> PathBuf {
        self.base_dir.join(SCORE_FILE)
    }

    /// Path of the reference highscore file.
    pub fn ref_score_file(&self) -> PathBuf {
        self.base_dir.join(REF_SCORE_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noupload_argument_disables_upload() {
        let args = vec!["greenwave".to_string(), "play".to_string(), "noupload".to_string()];
        let config = GameConfig::from_args(&args);
        assert!(!config.upload_enabled);
    }

    #[test]
    fn default_upload_is_enabled() {
        let config = GameConfig::from_args(&["greenwave".to_string()]);
        assert!(config.upload_enabled);
        assert_eq!(config.table_size, 30);
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn artifact_paths_derive_from_category() {
        let mut config = GameConfig::default();
        config.base_dir = PathBuf::from("/tmp/scenarios");
        assert_eq!(
            config.artifact("cross", "stats.xml"),
            PathBuf::from("/tmp/scenarios/cross.stats.xml")
        );
        assert_eq!(
            config.scenario_config("cross"),
            PathBuf::from("/tmp/scenarios/cross.sumocfg")
        );
    }
}
