//! Resolve weapons by name. Overlay entries from `data/weapons.json` win over
//! the built-in table; an unknown name is a hard error that callers propagate.

use std::fmt;

use crate::data::weapon::{
    builtin_weapons, load_weapon_file, resolve_builtin_weapon, WeaponRecord, DEFAULT_WEAPONS_PATH,
};

/// Normalize a string for lookup: lowercase, collapse spaces/underscores.
fn normalize_lookup(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() || c == '_' { ' ' } else { c })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeaponLookupError {
    pub name: String,
}

impl fmt::Display for WeaponLookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown weapon '{}'", self.name)
    }
}

impl std::error::Error for WeaponLookupError {}

/// Resolve against explicit overlay records, then the built-in table. The
/// returned record is a fresh clone; adjusting it never touches the source.
pub fn resolve_weapon_with_overlay(
    overlay: &[WeaponRecord],
    name: &str,
) -> Result<WeaponRecord, WeaponLookupError> {
    let normalized = normalize_lookup(name);
    if let Some(record) = overlay
        .iter()
        .find(|record| normalize_lookup(&record.name) == normalized)
    {
        return Ok(record.clone());
    }
    if let Some(record) = resolve_builtin_weapon(&normalized) {
        return Ok(record);
    }
    Err(WeaponLookupError {
        name: name.to_string(),
    })
}

/// Resolve using the default overlay path. Missing overlay file means
/// built-ins only.
pub fn resolve_weapon(name: &str) -> Result<WeaponRecord, WeaponLookupError> {
    let overlay = load_weapon_file(DEFAULT_WEAPONS_PATH).unwrap_or_default();
    resolve_weapon_with_overlay(&overlay, name)
}

/// Every known weapon, overlay entries first, built-ins after (overlay
/// shadows built-ins of the same normalized name). Used by the CLI listing.
pub fn all_weapons() -> Vec<WeaponRecord> {
    let overlay = load_weapon_file(DEFAULT_WEAPONS_PATH).unwrap_or_default();
    let mut records = overlay.clone();
    for builtin in builtin_weapons() {
        let shadowed = overlay
            .iter()
            .any(|record| normalize_lookup(&record.name) == normalize_lookup(&builtin.name));
        if !shadowed {
            records.push(builtin);
        }
    }
    records
}
