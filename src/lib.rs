//! d20 melee damage simulator: attack resolution, per-round damage Monte
//! Carlo, and build comparison for D&D-style rulesets.

pub mod cli;
pub mod combat;
pub mod compare;
pub mod data;
pub mod parallel;
