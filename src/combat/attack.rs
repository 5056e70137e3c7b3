//! Static per-attack facts for one (weapon, build) pair: effective attack
//! bonus after every modifier, dual-wield legality and penalty, feat-adjusted
//! critical threat range, and the chance for a single swing to hit.
//!
//! Everything here is derived once at construction and never depends on the
//! outcome of any particular die roll.

use serde::{Deserialize, Serialize};

use crate::data::build::BuildConfig;
use crate::data::weapon::WeaponRecord;

/// Enhancement above this baseline contributes to the attack bonus;
/// everything at or below it is already priced into the baseline AB.
pub const ENHANCEMENT_AB_BASELINE: i32 = 7;

/// Highest face of the attack die.
pub const ATTACK_DIE_FACES: i32 = 20;

/// Character and weapon size categories, ordered smallest to largest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeCategory {
    Small,
    Medium,
    Large,
}

impl SizeCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

/// Attack-bonus penalty for wielding `weapon` in the off-hand of a `toon`-sized
/// character. `None` means the pairing is illegal: an off-hand weapon may be
/// at most the wielder's own size. A weapon one category smaller is a light
/// weapon and costs less.
pub fn dual_wield_penalty(toon: SizeCategory, weapon: SizeCategory) -> Option<i32> {
    if weapon > toon {
        None
    } else if weapon < toon {
        Some(2)
    } else {
        Some(4)
    }
}

/// Threat lower bound after feat widening. Keen and Improved Critical each
/// add one extra copy of the weapon's base threat width; the bounds stack
/// additively rather than doubling twice. Floors at 1 (every roll threatens).
pub fn adjusted_crit_threat(base_threat: u8, keen: bool, improved_crit: bool) -> u8 {
    let base_width = (ATTACK_DIE_FACES + 1 - i32::from(base_threat)).max(1);
    let copies = 1 + i32::from(keen) + i32::from(improved_crit);
    (ATTACK_DIE_FACES + 1 - base_width * copies).max(1) as u8
}

#[derive(Debug, Clone)]
pub struct AttackSimulator {
    weapon: WeaponRecord,
    config: BuildConfig,
    attack_bonus: i32,
    dual_wield: bool,
    illegal_dual_wield: bool,
    crit_threat: u8,
}

impl AttackSimulator {
    /// Derives the static attack facts. `weapon` is this simulation's private
    /// copy; the feat-adjusted threat range is stored on it so the shared
    /// weapon table is never touched.
    pub fn new(mut weapon: WeaponRecord, config: &BuildConfig) -> Self {
        if let Some(enhancement) = config.enhancement_bonus {
            weapon.enhancement_bonus = enhancement;
        }

        let excess = (weapon.enhancement_bonus - ENHANCEMENT_AB_BASELINE).max(0);
        let mut attack_bonus = config.attack_bonus + excess;
        if let Some(cap) = config.attack_bonus_cap {
            attack_bonus = attack_bonus.min(cap);
        }

        let dual_wield = config.progression.is_dual_wield();
        let mut illegal_dual_wield = false;
        if dual_wield {
            match dual_wield_penalty(config.toon_size, weapon.size) {
                Some(penalty) => attack_bonus -= penalty,
                None => {
                    illegal_dual_wield = true;
                    attack_bonus = 0;
                }
            }
        }
        let attack_bonus = attack_bonus.max(0);

        let crit_threat =
            adjusted_crit_threat(weapon.crit_threat, config.keen, config.improved_crit);
        weapon.crit_threat = crit_threat;

        Self {
            weapon,
            config: config.clone(),
            attack_bonus,
            dual_wield,
            illegal_dual_wield,
            crit_threat,
        }
    }

    /// Effective attack bonus for the first main-hand attack. Zero when the
    /// configuration cannot legally attack.
    pub fn attack_bonus(&self) -> i32 {
        self.attack_bonus
    }

    pub fn dual_wield(&self) -> bool {
        self.dual_wield
    }

    /// True when a dual-wield progression was requested with a weapon too
    /// large for the character. Recorded state, not an error: the simulation
    /// still runs and reports zero damage.
    pub fn illegal_dual_wield(&self) -> bool {
        self.illegal_dual_wield
    }

    /// Feat-adjusted threat lower bound (inclusive, up to 20).
    pub fn crit_threat(&self) -> u8 {
        self.crit_threat
    }

    /// This simulation's adjusted weapon copy.
    pub fn weapon(&self) -> &WeaponRecord {
        &self.weapon
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Probability that a single swing at the full attack bonus hits the
    /// target AC. A natural 1 always misses and a natural 20 always hits, so
    /// the result is in `[1/20, 19/20]` and never saturates to 0 or 1.
    pub fn hit_chance(&self) -> f64 {
        self.hit_chance_at(self.attack_bonus)
    }

    /// Hit probability at an arbitrary per-slot bonus (iterative attacks roll
    /// at offsets below the full bonus).
    pub fn hit_chance_at(&self, bonus: i32) -> f64 {
        let mut hitting_faces = 1; // natural 20
        for face in 2..ATTACK_DIE_FACES {
            if face + bonus >= self.config.target_ac {
                hitting_faces += 1;
            }
        }
        f64::from(hitting_faces) / f64::from(ATTACK_DIE_FACES)
    }
}
