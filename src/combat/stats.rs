//! Running statistics over simulated rounds and their reduction to the
//! summary record reported to every output layer.

use serde::{Deserialize, Serialize};

/// One combat round lasts six seconds; DPS figures divide per-round damage
/// by this.
pub const ROUND_SECONDS: f64 = 6.0;

/// Accumulates per-round damage samples and hit counts while a simulation
/// runs. Mean and deviation come from running sums, so memory stays flat no
/// matter how many rounds are simulated.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoundStats {
    pub hits: u64,
    pub crits: u64,
    rounds: u64,
    damage_sum: f64,
    damage_sq_sum: f64,
}

impl RoundStats {
    pub fn record_hit(&mut self, critical: bool) {
        self.hits += 1;
        if critical {
            self.crits += 1;
        }
    }

    pub fn record_round(&mut self, round_damage: f64) {
        self.rounds += 1;
        self.damage_sum += round_damage;
        self.damage_sq_sum += round_damage * round_damage;
    }

    pub fn rounds(&self) -> u64 {
        self.rounds
    }

    pub fn total_damage(&self) -> f64 {
        self.damage_sum
    }

    /// Reduce to the summary record. With no rounds recorded every figure is
    /// exactly zero; downstream reporting never sees a NaN.
    pub fn summarize(&self) -> DamageSummary {
        if self.rounds == 0 {
            return DamageSummary::ZERO;
        }
        let n = self.rounds as f64;
        let mean_round = self.damage_sum / n;
        // Population variance from running sums; clamp the tiny negative
        // residue floating point can leave behind.
        let variance_round = (self.damage_sq_sum / n - mean_round * mean_round).max(0.0);
        DamageSummary {
            dps_mean: mean_round / ROUND_SECONDS,
            dps_stdev: variance_round.sqrt() / ROUND_SECONDS,
            dpr: mean_round,
        }
    }
}

/// The sole numeric contract to reporting layers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamageSummary {
    /// Mean damage per second.
    pub dps_mean: f64,
    /// Standard deviation of damage per second.
    pub dps_stdev: f64,
    /// Mean damage per round.
    pub dpr: f64,
}

impl DamageSummary {
    pub const ZERO: DamageSummary = DamageSummary {
        dps_mean: 0.0,
        dps_stdev: 0.0,
        dpr: 0.0,
    };
}
