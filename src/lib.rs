//! Launcher core for a traffic-light simulation game: discovers scenarios,
//! runs the external simulator, scores its output artifacts and maintains a
//! locally persisted (and best-effort server-mirrored) highscore table.

pub mod artifacts;
pub mod cli;
pub mod config;
pub mod highscore;
pub mod scoring;
pub mod session;
