//! Character build configuration: the tunable ruleset options one simulation
//! reads, plus YAML build files listing candidates for comparison runs.
//!
//! Options are a typed struct with defaulted optionals so "unset" and "zero"
//! can never be confused.

use std::fmt;
use std::fs;

use serde::{Deserialize, Serialize};

use crate::combat::attack::SizeCategory;
use crate::combat::progression::AttackProgression;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Baseline attack bonus for the first main-hand attack.
    pub attack_bonus: i32,
    /// Upper clamp applied after the enhancement adjustment. `None` means
    /// no clamp at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attack_bonus_cap: Option<i32>,
    /// Armor class of the simulated opponent.
    pub target_ac: i32,
    #[serde(default)]
    pub keen: bool,
    #[serde(default)]
    pub improved_crit: bool,
    pub progression: AttackProgression,
    pub toon_size: SizeCategory,
    /// Added to each hit's damage; off-hand attacks apply half.
    #[serde(default)]
    pub strength_modifier: i32,
    /// Overrides the looked-up weapon's enhancement bonus, so one table entry
    /// can be simulated at different item qualities.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enhancement_bonus: Option<i32>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            attack_bonus: 40,
            attack_bonus_cap: None,
            target_ac: 40,
            keen: false,
            improved_crit: false,
            progression: AttackProgression::FiveAprClassic,
            toon_size: SizeCategory::Medium,
            strength_modifier: 0,
            enhancement_bonus: None,
        }
    }
}

/// One candidate in a comparison run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub weapon: String,
    #[serde(flatten)]
    pub config: BuildConfig,
}

impl BuildEntry {
    /// Display label: the explicit one, or the weapon name.
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.weapon)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildFile {
    pub builds: Vec<BuildEntry>,
}

#[derive(Debug)]
pub enum BuildFileError {
    Read(std::io::Error),
    Parse(serde_yaml::Error),
}

impl fmt::Display for BuildFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read(err) => write!(f, "failed to read build file: {err}"),
            Self::Parse(err) => write!(f, "failed to parse build YAML: {err}"),
        }
    }
}

impl std::error::Error for BuildFileError {}

/// Load a YAML build file. Read and parse failures are fatal configuration
/// errors; a malformed progression label or size fails here, not mid-run.
pub fn load_build_file(path: &str) -> Result<BuildFile, BuildFileError> {
    let data = fs::read_to_string(path).map_err(BuildFileError::Read)?;
    serde_yaml::from_str(&data).map_err(BuildFileError::Parse)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
builds:
  - label: keen scythe
    weapon: scythe
    attack_bonus: 48
    attack_bonus_cap: 50
    target_ac: 52
    keen: true
    progression: 5APR Classic
    toon_size: medium
    strength_modifier: 11
    enhancement_bonus: 8
  - weapon: kukri
    attack_bonus: 44
    target_ac: 52
    improved_crit: true
    progression: 5APR & Dual-Wield
    toon_size: medium
";

    #[test]
    fn sample_file_parses_with_defaults() {
        let file: BuildFile = serde_yaml::from_str(SAMPLE).unwrap();
        assert_eq!(file.builds.len(), 2);

        let scythe = &file.builds[0];
        assert_eq!(scythe.display_label(), "keen scythe");
        assert_eq!(scythe.config.attack_bonus_cap, Some(50));
        assert_eq!(scythe.config.enhancement_bonus, Some(8));
        assert!(scythe.config.keen);

        let kukri = &file.builds[1];
        assert_eq!(kukri.display_label(), "kukri");
        assert_eq!(kukri.config.attack_bonus_cap, None);
        assert_eq!(kukri.config.strength_modifier, 0);
        assert_eq!(
            kukri.config.progression,
            AttackProgression::FiveAprDualWield
        );
    }

    #[test]
    fn unknown_progression_label_fails_to_parse() {
        let bad = SAMPLE.replace("5APR Classic", "9APR Turbo");
        let err = serde_yaml::from_str::<BuildFile>(&bad).unwrap_err();
        assert!(err.to_string().contains("9APR Turbo"));
    }

    #[test]
    fn missing_cap_stays_unset_not_zero() {
        let file: BuildFile = serde_yaml::from_str(SAMPLE).unwrap();
        assert_ne!(file.builds[1].config.attack_bonus_cap, Some(0));
        assert_eq!(file.builds[1].config.attack_bonus_cap, None);
    }

    #[test]
    fn config_round_trips_through_yaml() {
        let config = BuildConfig {
            attack_bonus: 38,
            attack_bonus_cap: Some(45),
            keen: true,
            ..BuildConfig::default()
        };
        let yaml = serde_yaml::to_string(&config).unwrap();
        let back: BuildConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, config);
    }
}
