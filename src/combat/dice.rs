//! Damage dice in `NdS` notation (e.g. `2d4`). Parsed once at weapon load,
//! rolled per hit.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::combat::rng::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DamageDice {
    pub count: u32,
    pub sides: u32,
}

impl DamageDice {
    pub fn new(count: u32, sides: u32) -> Self {
        Self { count, sides }
    }

    /// Sum of `count` independent rolls of a `sides`-sided die.
    pub fn roll(&self, rng: &mut Rng) -> i32 {
        (0..self.count).map(|_| rng.roll_die(self.sides) as i32).sum()
    }

    pub fn min_total(&self) -> i32 {
        self.count as i32
    }

    pub fn max_total(&self) -> i32 {
        (self.count * self.sides) as i32
    }

    /// Expected value of one damage roll.
    pub fn mean(&self) -> f64 {
        f64::from(self.count) * (f64::from(self.sides) + 1.0) / 2.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiceParseError {
    pub input: String,
}

impl fmt::Display for DiceParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid damage dice '{}', expected NdS like 2d4", self.input)
    }
}

impl FromStr for DamageDice {
    type Err = DiceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        fn err(input: &str) -> DiceParseError {
            DiceParseError {
                input: input.to_string(),
            }
        }
        let (count, sides) = s.trim().split_once(['d', 'D']).ok_or_else(|| err(s))?;
        let count = count.trim().parse::<u32>().map_err(|_| err(s))?;
        let sides = sides.trim().parse::<u32>().map_err(|_| err(s))?;
        if count == 0 || sides == 0 {
            return Err(err(s));
        }
        Ok(Self { count, sides })
    }
}

impl fmt::Display for DamageDice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)
    }
}

impl TryFrom<String> for DamageDice {
    type Error = DiceParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DamageDice> for String {
    fn from(dice: DamageDice) -> Self {
        dice.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_standard_notation() {
        assert_eq!("2d4".parse::<DamageDice>().unwrap(), DamageDice::new(2, 4));
        assert_eq!("1D12".parse::<DamageDice>().unwrap(), DamageDice::new(1, 12));
    }

    #[test]
    fn rejects_garbage() {
        for bad in ["", "d6", "2d", "2x4", "0d6", "2d0", "two d four"] {
            assert!(bad.parse::<DamageDice>().is_err(), "accepted '{bad}'");
        }
    }

    #[test]
    fn display_round_trips() {
        let dice = DamageDice::new(2, 6);
        assert_eq!(dice.to_string().parse::<DamageDice>().unwrap(), dice);
    }

    #[test]
    fn rolls_stay_within_bounds() {
        let dice = DamageDice::new(2, 4);
        let mut rng = Rng::new(11);
        for _ in 0..1_000 {
            let total = dice.roll(&mut rng);
            assert!(total >= dice.min_total() && total <= dice.max_total());
        }
    }

    #[test]
    fn mean_matches_closed_form() {
        assert!((DamageDice::new(2, 4).mean() - 5.0).abs() < 1e-12);
        assert!((DamageDice::new(1, 8).mean() - 4.5).abs() < 1e-12);
    }
}
