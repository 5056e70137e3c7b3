pub mod attack;
pub mod damage;
pub mod dice;
pub mod progression;
pub mod rng;
pub mod stats;

pub use attack::{
    adjusted_crit_threat, dual_wield_penalty, AttackSimulator, SizeCategory,
    ATTACK_DIE_FACES, ENHANCEMENT_AB_BASELINE,
};
pub use damage::{DamageSimulator, DualWieldTracking, SimulatorError};
pub use dice::{DamageDice, DiceParseError};
pub use progression::{AttackProgression, AttackSlot, ProgressionParseError};
pub use rng::Rng;
pub use stats::{DamageSummary, RoundStats, ROUND_SECONDS};
