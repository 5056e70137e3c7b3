//! Fast PRNG for combat simulation. Uses SplitMix64 for throughput and good statistical quality.
//! Deterministic: same seed produces the same sequence. Not cryptographically secure.

const SPLITMIX64_GOLDEN: u64 = 0x9e3779b97f4a7c15;
const SPLITMIX64_M1: u64 = 0xbf58476d1ce4e5b9;
const SPLITMIX64_M2: u64 = 0x94d049bb133111eb;

#[derive(Debug, Clone, Copy)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(SPLITMIX64_GOLDEN);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(SPLITMIX64_M1);
        z = (z ^ (z >> 27)).wrapping_mul(SPLITMIX64_M2);
        z ^ (z >> 31)
    }

    /// Uniform die roll in `1..=sides`. The modulo bias is far below anything
    /// a damage distribution can resolve for die sizes up to d20.
    #[inline]
    pub fn roll_die(&mut self, sides: u32) -> u32 {
        debug_assert!(sides > 0);
        (self.next_u64() % u64::from(sides)) as u32 + 1
    }

    /// One attack-roll die.
    #[inline]
    pub fn d20(&mut self) -> u32 {
        self.roll_die(20)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splitmix64_deterministic() {
        let mut a = Rng::new(7);
        let mut b = Rng::new(7);
        for _ in 0..100 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn splitmix64_different_seeds_differ() {
        let mut a = Rng::new(1);
        let mut b = Rng::new(2);
        assert_ne!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn d20_stays_on_the_die() {
        let mut rng = Rng::new(42);
        for _ in 0..10_000 {
            let roll = rng.d20();
            assert!((1..=20).contains(&roll), "rolled {roll}");
        }
    }

    #[test]
    fn roll_die_covers_every_face() {
        let mut rng = Rng::new(3);
        let mut seen = [false; 6];
        for _ in 0..1_000 {
            seen[rng.roll_die(6) as usize - 1] = true;
        }
        assert!(seen.iter().all(|&s| s), "faces seen: {seen:?}");
    }
}
