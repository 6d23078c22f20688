use crate::models::metric::BundleMap;
use crate::models::score::{CompositeScores, ScoreExplanation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub generation: u64,
    /// False when a newer fetch cycle finished first and this result was discarded
    pub installed: bool,
    pub fetched_at: i64,
    pub projects: Vec<String>,
    pub empty_projects: Vec<String>,
    pub scores: CompositeScores,
    pub explanations: Vec<ScoreExplanation>,
}

/// Selection and bundles of the last installed fetch cycle
#[derive(Debug, Default)]
pub struct DashboardCache {
    pub selection: Vec<String>,
    pub bundles: BundleMap,
    pub fetched_at: Option<i64>,
    pub installed_generation: u64,
    next_generation: u64,
}

impl DashboardCache {
    /// Reserve a generation for a fetch cycle that is about to start.
    pub fn begin_cycle(&mut self) -> u64 {
        self.next_generation += 1;
        self.next_generation
    }

    /// Install a finished cycle unless a newer one already landed.
    pub fn install(
        &mut self,
        generation: u64,
        selection: Vec<String>,
        bundles: BundleMap,
        fetched_at: i64,
    ) -> bool {
        if generation <= self.installed_generation {
            log::debug!(
                "discarding stale fetch cycle {generation} (installed: {})",
                self.installed_generation
            );
            return false;
        }
        self.installed_generation = generation;
        self.selection = selection;
        self.bundles = bundles;
        self.fetched_at = Some(fetched_at);
        true
    }
}
