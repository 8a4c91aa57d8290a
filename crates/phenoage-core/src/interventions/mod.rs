//! Intervention catalog and the ranking/simulation engine built on it.

mod catalog;
mod engine;
mod rules;

pub use catalog::Intervention;
pub use engine::{
    rank_interventions, simulate_combined, RankingEntry, SimulationResult, SYNERGY_FACTOR,
};
