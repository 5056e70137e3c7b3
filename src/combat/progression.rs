//! Attacks-per-round progressions. Each progression fixes the number of
//! main-hand attack slots, their attack-bonus offsets, and whether two extra
//! off-hand slots are scheduled (dual-wield).
//!
//! Labels are a closed set; anything else is a configuration error, not a
//! default.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Iterative attacks step down by 5 from the full attack bonus.
const ITERATIVE_STEP: i32 = -5;

/// Off-hand slots: first at full (penalized) bonus, second one step down.
const OFFHAND_OFFSETS: [i32; 2] = [0, ITERATIVE_STEP];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AttackProgression {
    /// "4APR Classic": 4 main-hand attacks at +0/-5/-10/-15.
    FourAprClassic,
    /// "5APR Classic": hasted schedule, extra attack at full bonus.
    FiveAprClassic,
    /// "4APR & Dual-Wield": 4 main-hand slots plus 2 off-hand slots.
    FourAprDualWield,
    /// "5APR & Dual-Wield": hasted schedule plus 2 off-hand slots.
    FiveAprDualWield,
}

/// One scheduled attack in a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackSlot {
    /// Offset applied to the effective attack bonus for this slot.
    pub offset: i32,
    pub offhand: bool,
}

impl AttackProgression {
    pub const ALL: [AttackProgression; 4] = [
        Self::FourAprClassic,
        Self::FiveAprClassic,
        Self::FourAprDualWield,
        Self::FiveAprDualWield,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::FourAprClassic => "4APR Classic",
            Self::FiveAprClassic => "5APR Classic",
            Self::FourAprDualWield => "4APR & Dual-Wield",
            Self::FiveAprDualWield => "5APR & Dual-Wield",
        }
    }

    pub fn is_dual_wield(self) -> bool {
        matches!(self, Self::FourAprDualWield | Self::FiveAprDualWield)
    }

    fn main_hand_offsets(self) -> &'static [i32] {
        match self {
            Self::FourAprClassic | Self::FourAprDualWield => &[0, -5, -10, -15],
            Self::FiveAprClassic | Self::FiveAprDualWield => &[0, 0, -5, -10, -15],
        }
    }

    /// Full per-round schedule: main-hand iterative slots, then off-hand
    /// slots when dual-wielding.
    pub fn attack_slots(self) -> Vec<AttackSlot> {
        let mut slots: Vec<AttackSlot> = self
            .main_hand_offsets()
            .iter()
            .map(|&offset| AttackSlot {
                offset,
                offhand: false,
            })
            .collect();
        if self.is_dual_wield() {
            slots.extend(OFFHAND_OFFSETS.iter().map(|&offset| AttackSlot {
                offset,
                offhand: true,
            }));
        }
        slots
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressionParseError {
    pub input: String,
}

impl fmt::Display for ProgressionParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown attack progression '{}', expected one of: {}",
            self.input,
            AttackProgression::ALL.map(AttackProgression::label).join(", ")
        )
    }
}

impl FromStr for AttackProgression {
    type Err = ProgressionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        AttackProgression::ALL
            .into_iter()
            .find(|p| p.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ProgressionParseError {
                input: s.to_string(),
            })
    }
}

impl fmt::Display for AttackProgression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<String> for AttackProgression {
    type Error = ProgressionParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AttackProgression> for String {
    fn from(progression: AttackProgression) -> Self {
        progression.label().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip() {
        for progression in AttackProgression::ALL {
            assert_eq!(
                progression.label().parse::<AttackProgression>().unwrap(),
                progression
            );
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(
            "5apr classic".parse::<AttackProgression>().unwrap(),
            AttackProgression::FiveAprClassic
        );
    }

    #[test]
    fn unknown_label_is_an_error() {
        let err = "6APR Whirlwind".parse::<AttackProgression>().unwrap_err();
        assert!(err.to_string().contains("6APR Whirlwind"));
    }

    #[test]
    fn classic_schedules_have_no_offhand_slots() {
        for progression in [
            AttackProgression::FourAprClassic,
            AttackProgression::FiveAprClassic,
        ] {
            assert!(!progression.is_dual_wield());
            assert!(progression.attack_slots().iter().all(|s| !s.offhand));
        }
    }

    #[test]
    fn dual_wield_appends_two_offhand_slots() {
        let slots = AttackProgression::FiveAprDualWield.attack_slots();
        assert_eq!(slots.len(), 7);
        assert_eq!(slots[5], AttackSlot { offset: 0, offhand: true });
        assert_eq!(slots[6], AttackSlot { offset: -5, offhand: true });
        assert!(slots[..5].iter().all(|s| !s.offhand));
    }

    #[test]
    fn hasted_schedule_doubles_the_full_bonus_slot() {
        let offsets: Vec<i32> = AttackProgression::FiveAprClassic
            .attack_slots()
            .iter()
            .map(|s| s.offset)
            .collect();
        assert_eq!(offsets, vec![0, 0, -5, -10, -15]);
    }
}
