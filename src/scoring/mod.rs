//! Per-scenario score formulas and the category-to-formula mapping.
//!
//! Every formula tolerates an aborted run or missing artifacts by returning
//! an incomplete zero record instead of failing; the worst outcome of a bad
//! run is a score of 0.

pub mod drt;
pub mod square;
pub mod time_loss;
pub mod waiting_time;

use serde::Serialize;

use crate::config::GameConfig;

/// Result of scoring one finished simulation run. Immutable once produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreRecord {
    pub score: i64,
    pub participants: u64,
    pub complete: bool,
}

impl ScoreRecord {
    /// The degrade result for aborted runs and unreadable artifacts.
    pub fn incomplete() -> Self {
        ScoreRecord {
            score: 0,
            participants: 0,
            complete: false,
        }
    }
}

/// The scoring formula applied to a scenario category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringVariant {
    /// Default: waiting time times vehicle count from the statistics file.
    WaitingTime,
    /// Highway scenarios: time loss and depart delay from the run log.
    TimeLoss,
    /// Demand-responsive transport: average ride waiting time and duration.
    Drt,
    /// Four-junction square: time loss with an early-termination penalty.
    SquareJunction,
}

impl ScoringVariant {
    /// Total mapping from category name to formula. Unknown categories score
    /// by waiting time.
    pub fn for_category(category: &str) -> Self {
        match category {
            "A10KW" => ScoringVariant::TimeLoss,
            "DRT" | "DRT2" | "DRT_demo" => ScoringVariant::Drt,
            "square" => ScoringVariant::SquareJunction,
            _ => ScoringVariant::WaitingTime,
        }
    }

    pub fn compute(self, config: &GameConfig, category: &str) -> ScoreRecord {
        match self {
            ScoringVariant::WaitingTime => waiting_time::compute(config, category),
            ScoringVariant::TimeLoss => time_loss::compute(config, category),
            ScoringVariant::Drt => drt::compute(config, category),
            ScoringVariant::SquareJunction => square::compute(config, category),
        }
    }
}

/// Score a category's run artifacts with the formula mapped to it.
pub fn score_category(config: &GameConfig, category: &str) -> ScoreRecord {
    let variant = ScoringVariant::for_category(category);
    log::debug!("scoring '{category}' with {variant:?}");
    variant.compute(config, category)
}
