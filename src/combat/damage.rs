//! Stochastic damage simulation: rolls every scheduled attack slot for a
//! configurable number of rounds and reduces the outcomes to summary
//! statistics.
//!
//! The simulator owns its own RNG and its own adjusted weapon copy, so
//! independent runs share nothing and parallel batches need no coordination.

use std::fmt;

use crate::combat::attack::AttackSimulator;
use crate::combat::progression::AttackSlot;
use crate::combat::rng::Rng;
use crate::combat::stats::{DamageSummary, RoundStats};
use crate::data::build::BuildConfig;
use crate::data::loader::{resolve_weapon, WeaponLookupError};

/// Which per-round slots are off-hand attacks, and where the off-hand
/// strength rule starts. Index fields are `None` exactly when the build does
/// not dual-wield.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DualWieldTracking {
    pub is_dual_wield: bool,
    pub offhand_attack_1: Option<usize>,
    pub offhand_attack_2: Option<usize>,
    /// First slot whose damage adds half strength instead of full.
    pub str_slot: Option<usize>,
}

#[derive(Debug)]
pub enum SimulatorError {
    UnknownWeapon(WeaponLookupError),
}

impl fmt::Display for SimulatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownWeapon(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for SimulatorError {}

impl From<WeaponLookupError> for SimulatorError {
    fn from(err: WeaponLookupError) -> Self {
        Self::UnknownWeapon(err)
    }
}

#[derive(Debug, Clone)]
pub struct DamageSimulator {
    attack: AttackSimulator,
    slots: Vec<AttackSlot>,
    tracking: DualWieldTracking,
    stats: RoundStats,
    rng: Rng,
}

impl DamageSimulator {
    /// Looks up the weapon by name and derives the static attack facts.
    /// Unknown weapon names are fatal; illegal dual-wield pairings are not —
    /// they run and report zeros.
    pub fn new(weapon_name: &str, config: &BuildConfig, seed: u64) -> Result<Self, SimulatorError> {
        let weapon = resolve_weapon(weapon_name)?;
        let attack = AttackSimulator::new(weapon, config);
        let slots = config.progression.attack_slots();
        let tracking = dual_wield_tracking(&slots);
        Ok(Self {
            attack,
            slots,
            tracking,
            stats: RoundStats::default(),
            rng: Rng::new(seed),
        })
    }

    pub fn attack(&self) -> &AttackSimulator {
        &self.attack
    }

    pub fn tracking(&self) -> &DualWieldTracking {
        &self.tracking
    }

    pub fn stats(&self) -> &RoundStats {
        &self.stats
    }

    /// Simulate `rounds` further combat rounds. Illegal dual-wield builds
    /// record zero-damage rounds so their summary stays exactly zero.
    pub fn run(&mut self, rounds: u32) {
        for _ in 0..rounds {
            let damage = if self.attack.illegal_dual_wield() {
                0.0
            } else {
                self.simulate_round()
            };
            self.stats.record_round(damage);
        }
    }

    /// Current summary. Before any round has run this is the zero record, as
    /// is every summary of an illegal dual-wield build.
    pub fn summary(&self) -> DamageSummary {
        if self.attack.illegal_dual_wield() {
            return DamageSummary::ZERO;
        }
        self.stats.summarize()
    }

    /// Convenience: construct, run, summarize.
    pub fn simulate(
        weapon_name: &str,
        config: &BuildConfig,
        rounds: u32,
        seed: u64,
    ) -> Result<DamageSummary, SimulatorError> {
        let mut simulator = Self::new(weapon_name, config, seed)?;
        simulator.run(rounds);
        Ok(simulator.summary())
    }

    fn simulate_round(&mut self) -> f64 {
        let mut round_damage = 0.0;
        for index in 0..self.slots.len() {
            let slot = self.slots[index];
            round_damage += self.resolve_slot(slot);
        }
        round_damage
    }

    /// One attack roll: d20 + slot bonus vs target AC with the natural-1 /
    /// natural-20 rule, threat check on the unmodified face, confirmation
    /// roll at the same bonus, damage on hit (rolled twice when confirmed).
    fn resolve_slot(&mut self, slot: AttackSlot) -> f64 {
        let bonus = self.attack.attack_bonus() + slot.offset;
        let face = self.rng.d20();
        if !self.attack_lands(face, bonus) {
            return 0.0;
        }

        let threatens = face >= u32::from(self.attack.crit_threat());
        let confirmed = threatens && {
            let confirm_face = self.rng.d20();
            self.attack_lands(confirm_face, bonus)
        };

        let mut damage = self.roll_damage(slot.offhand);
        if confirmed {
            damage += self.roll_damage(slot.offhand);
        }
        self.stats.record_hit(confirmed);
        f64::from(damage)
    }

    fn attack_lands(&self, face: u32, bonus: i32) -> bool {
        if face == 1 {
            return false;
        }
        if face == 20 {
            return true;
        }
        face as i32 + bonus >= self.attack.config().target_ac
    }

    /// Weapon dice plus strength and enhancement bonuses, floored at 1.
    /// Off-hand attacks add half strength.
    fn roll_damage(&mut self, offhand: bool) -> i32 {
        let weapon = self.attack.weapon();
        let strength = self.attack.config().strength_modifier;
        let strength = if offhand { strength / 2 } else { strength };
        let total = weapon.damage_dice.roll(&mut self.rng) + strength + weapon.enhancement_bonus;
        total.max(1)
    }
}

/// Build the off-hand tracking record from a slot schedule. Off-hand slots
/// are appended after the main-hand schedule, so the first off-hand index is
/// also where the off-hand strength rule starts.
fn dual_wield_tracking(slots: &[AttackSlot]) -> DualWieldTracking {
    let mut offhand = slots
        .iter()
        .enumerate()
        .filter(|(_, slot)| slot.offhand)
        .map(|(index, _)| index);
    let first = offhand.next();
    let second = offhand.next();
    DualWieldTracking {
        is_dual_wield: first.is_some(),
        offhand_attack_1: first,
        offhand_attack_2: second,
        str_slot: first,
    }
}
