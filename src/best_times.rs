//! Best completion time per difficulty
//!
//! Lower is better. Only wins are recorded. Persisted to LocalStorage on the
//! web and to a JSON file on native.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::difficulty::Difficulty;
use crate::error::{GameError, Result};
use crate::session::SessionReport;

/// Best winning time (seconds) for each difficulty played
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BestTimes {
    pub entries: BTreeMap<Difficulty, f32>,
}

impl BestTimes {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "gravitrip_best_times";

    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub fn best(&self, difficulty: Difficulty) -> Option<f32> {
        self.entries.get(&difficulty).copied()
    }

    /// Check if a time would beat the stored best
    pub fn qualifies(&self, difficulty: Difficulty, secs: f32) -> bool {
        if !secs.is_finite() || secs < 0.0 {
            return false;
        }
        self.best(difficulty).is_none_or(|best| secs < best)
    }

    /// Store `secs` if it beats the current best. Returns true if it did.
    pub fn record(&mut self, difficulty: Difficulty, secs: f32) -> bool {
        if !self.qualifies(difficulty, secs) {
            return false;
        }
        self.entries.insert(difficulty, secs);
        log::info!("New best time on {}: {:.2}s", difficulty, secs);
        true
    }

    /// Record the time of a finished session; only wins qualify
    pub fn record_report(&mut self, report: &SessionReport) -> Result<bool> {
        let secs = report.winning_time().ok_or(GameError::NotAWin {
            difficulty: report.difficulty,
        })?;
        Ok(self.record(report.difficulty, secs))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Display string for a difficulty's best, `--` when none
    pub fn display(&self, difficulty: Difficulty) -> String {
        format_time(self.best(difficulty))
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            log::info!("No best times found, starting fresh");
            return Ok(Self::new());
        }
        let times: Self = serde_json::from_str(&std::fs::read_to_string(path)?)?;
        log::info!("Loaded {} best times", times.entries.len());
        Ok(times)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        log::info!("Best times saved ({} entries)", self.entries.len());
        Ok(())
    }

    /// Load best times from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        if let Some(json) = crate::platform::web::storage_get(Self::STORAGE_KEY) {
            if let Ok(times) = serde_json::from_str::<BestTimes>(&json) {
                log::info!("Loaded {} best times", times.entries.len());
                return times;
            }
        }

        log::info!("No best times found, starting fresh");
        Self::new()
    }

    /// Save best times to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        if let Ok(json) = serde_json::to_string(self) {
            crate::platform::web::storage_set(Self::STORAGE_KEY, &json);
            log::info!("Best times saved ({} entries)", self.entries.len());
        }
    }
}

/// `12.34s`, or `--` for no time
pub fn format_time(secs: Option<f32>) -> String {
    match secs {
        Some(s) => format!("{:.2}s", s),
        None => "--".to_string(),
    }
}
