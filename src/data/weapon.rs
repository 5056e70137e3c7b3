//! Melee weapon records: name, size, threat range, enhancement, damage dice.
//! A built-in table covers the standard martial arsenal; `data/weapons.json`
//! may add or replace entries (custom and magic weapons).

use std::fs;

use serde::{Deserialize, Serialize};

use crate::combat::attack::SizeCategory;
use crate::combat::dice::DamageDice;

/// Normalized weapon record. Lookups hand out fresh clones so a simulation's
/// feat adjustments can never leak back into the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponRecord {
    pub name: String,
    pub size: SizeCategory,
    /// Lowest d20 face (inclusive) that threatens a critical before feats.
    pub crit_threat: u8,
    #[serde(default)]
    pub enhancement_bonus: i32,
    pub damage_dice: DamageDice,
}

/// Overlay file schema: a flat list of records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponFile {
    pub weapons: Vec<WeaponRecord>,
}

pub const DEFAULT_WEAPONS_PATH: &str = "data/weapons.json";

/// (name, size, threat lower bound, damage dice) for the standard arsenal.
/// Enhancement starts at 0; builds override it per item.
const BUILTIN_WEAPONS: &[(&str, SizeCategory, u8, u32, u32)] = &[
    ("dagger", SizeCategory::Small, 19, 1, 4),
    ("kukri", SizeCategory::Small, 18, 1, 4),
    ("handaxe", SizeCategory::Small, 20, 1, 6),
    ("kama", SizeCategory::Small, 20, 1, 6),
    ("mace", SizeCategory::Small, 20, 1, 6),
    ("shortsword", SizeCategory::Small, 19, 1, 6),
    ("longsword", SizeCategory::Medium, 19, 1, 8),
    ("scimitar", SizeCategory::Medium, 18, 1, 6),
    ("rapier", SizeCategory::Medium, 18, 1, 6),
    ("katana", SizeCategory::Medium, 19, 1, 10),
    ("bastard sword", SizeCategory::Medium, 19, 1, 10),
    ("battleaxe", SizeCategory::Medium, 20, 1, 8),
    ("warhammer", SizeCategory::Medium, 20, 1, 8),
    ("morningstar", SizeCategory::Medium, 20, 1, 8),
    ("greatsword", SizeCategory::Large, 19, 2, 6),
    ("greataxe", SizeCategory::Large, 20, 1, 12),
    ("falchion", SizeCategory::Large, 18, 2, 4),
    ("scythe", SizeCategory::Large, 20, 2, 4),
    ("halberd", SizeCategory::Large, 20, 1, 10),
    ("spear", SizeCategory::Large, 20, 1, 8),
    ("quarterstaff", SizeCategory::Large, 20, 1, 6),
];

/// Materialize the built-in table. Fresh records every call.
pub fn builtin_weapons() -> Vec<WeaponRecord> {
    BUILTIN_WEAPONS
        .iter()
        .map(|&(name, size, crit_threat, count, sides)| WeaponRecord {
            name: name.to_string(),
            size,
            crit_threat,
            enhancement_bonus: 0,
            damage_dice: DamageDice::new(count, sides),
        })
        .collect()
}

/// Exact-name lookup against the built-in table only (no overlay). Used by
/// the resolver after overlay entries miss, and directly by tests.
pub fn resolve_builtin_weapon(name: &str) -> Option<WeaponRecord> {
    BUILTIN_WEAPONS
        .iter()
        .find(|(builtin, ..)| builtin.eq_ignore_ascii_case(name.trim()))
        .map(|&(name, size, crit_threat, count, sides)| WeaponRecord {
            name: name.to_string(),
            size,
            crit_threat,
            enhancement_bonus: 0,
            damage_dice: DamageDice::new(count, sides),
        })
}

/// Load the overlay file. Returns None when the file is missing or unreadable;
/// the overlay is an optional dataset, not a requirement.
pub fn load_weapon_file(path: &str) -> Option<Vec<WeaponRecord>> {
    let data = fs::read_to_string(path).ok()?;
    let file: WeaponFile = serde_json::from_str(&data).ok()?;
    Some(file.weapons)
}
