use super::formula::DiceFormula;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Formulas rolled independently and summed.
///
/// `2 x 1d6+1` is kept as two members so each roll carries its own modifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DicePool {
    members: Vec<DiceFormula>,
}

impl DicePool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, formula: DiceFormula) {
        self.members.push(formula);
    }

    pub fn push_repeated(&mut self, formula: DiceFormula, times: u32) {
        for _ in 0..times {
            self.members.push(formula);
        }
    }

    pub fn members(&self) -> &[DiceFormula] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn min(&self) -> i32 {
        self.members
            .iter()
            .fold(0, |total, f| total.saturating_add(f.min()))
    }

    pub fn max(&self) -> i32 {
        self.members
            .iter()
            .fold(0, |total, f| total.saturating_add(f.max()))
    }

    pub fn average(&self) -> f64 {
        (self.min() as f64 + self.max() as f64) / 2.0
    }

    pub fn roll(&self, rng: &mut impl Rng) -> i32 {
        self.members
            .iter()
            .fold(0, |total, f| total.saturating_add(f.roll(rng)))
    }
}

impl FromIterator<DiceFormula> for DicePool {
    fn from_iter<I: IntoIterator<Item = DiceFormula>>(iter: I) -> Self {
        Self {
            members: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for DicePool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.members.iter().map(|m| m.to_string()).collect();
        write!(f, "{}", parts.join(" + "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn d(count: u32, sides: u32, modifier: i32) -> DiceFormula {
        DiceFormula::new(count, sides, modifier).unwrap()
    }

    #[test]
    fn test_empty_pool() {
        let pool = DicePool::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(pool.is_empty());
        assert_eq!(pool.min(), 0);
        assert_eq!(pool.max(), 0);
        assert_eq!(pool.roll(&mut rng), 0);
    }

    #[test]
    fn test_repeated_members_keep_their_modifiers() {
        let mut pool = DicePool::new();
        pool.push_repeated(d(1, 4, 1), 3);
        assert_eq!(pool.len(), 3);
        // Three darts: 3 x (1..=4 + 1)
        assert_eq!(pool.min(), 6);
        assert_eq!(pool.max(), 15);
    }

    #[test]
    fn test_roll_stays_within_bounds() {
        let pool: DicePool = [d(8, 6, 0), d(1, 6, 0), d(1, 6, 0)].into_iter().collect();
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        for _ in 0..500 {
            let r = pool.roll(&mut rng);
            assert!(r >= pool.min() && r <= pool.max());
        }
    }

    #[test]
    fn test_large_pool_sums_saturate() {
        let biggest = d(100, 20, 1000);
        let mut pool = DicePool::new();
        pool.push_repeated(biggest, 1_000_000);
        assert_eq!(pool.max(), i32::MAX);
        assert_eq!(pool.min(), 1100 * 1_000_000);
    }

    #[test]
    fn test_display() {
        let pool: DicePool = [d(8, 6, 0), d(1, 6, 0)].into_iter().collect();
        assert_eq!(pool.to_string(), "8d6 + 1d6");
    }
}
