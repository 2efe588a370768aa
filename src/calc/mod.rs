//! Stake and potential-prize calculation
//!
//! Both calculators walk the same per-line formula inputs (station count,
//! number/pair/permutation multiplicand and regional combination count) and
//! differ only in the final factor: the stake applies the configurable house
//! multiplier, the prize applies the bet type's payout rate.

mod combinatorics;
mod prize;
mod stake;

pub use combinatorics::{distinct_permutations, pair_count, permutations_of};
pub use prize::calculate_prize;
pub use stake::calculate_stake;

use crate::catalog::{BetKind, Region};
use crate::models::{BetLine, Money};

/// Shared formula inputs for one (line, bet type, amount) triple
pub(crate) struct LineFactors {
    /// Numbers for ordinary bets, pairs for bridge, permutation sum for đảo
    pub multiplicand: f64,
    /// Station factor: station count, or the fixed 2 for bridge bets
    pub station_factor: f64,
    pub combination_count: u32,
}

impl LineFactors {
    /// Derive the factors, or `None` when the bet type cannot take these
    /// numbers in this region
    pub(crate) fn derive(
        line: &BetLine,
        kind: BetKind,
        region: Region,
        station_count: usize,
    ) -> Option<LineFactors> {
        let digits = line.digit_len();
        if !kind.applicable_to(region) {
            return None;
        }
        let combination_count = kind.combination_count(region, digits)?;

        let (multiplicand, station_factor) = if kind.is_bridge() {
            if line.numbers.len() < 2 {
                return None;
            }
            (pair_count(line.numbers.len()) as f64, 2.0)
        } else if kind.is_permutation() {
            let perm_sum: u64 = line
                .numbers
                .iter()
                .map(|n| distinct_permutations(n))
                .sum();
            (perm_sum as f64, station_count as f64)
        } else {
            (line.numbers.len() as f64, station_count as f64)
        };

        Some(LineFactors {
            multiplicand,
            station_factor,
            combination_count,
        })
    }

    /// `station_factor × multiplicand × combinations × amount × rate`
    pub(crate) fn subtotal(&self, amount: Money, rate: f64) -> Money {
        (self.station_factor
            * self.multiplicand
            * self.combination_count as f64
            * amount as f64
            * rate)
            .round() as Money
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_line;

    #[test]
    fn test_bridge_factors() {
        let line = parse_line("93.97.85da1", None);
        let factors =
            LineFactors::derive(&line, BetKind::Da, Region::South, 1).expect("factors");
        assert_eq!(factors.multiplicand, 3.0);
        assert_eq!(factors.station_factor, 2.0);
        assert_eq!(factors.combination_count, 1);
    }

    #[test]
    fn test_permutation_factors() {
        let line = parse_line("112.123dao1", None);
        let factors =
            LineFactors::derive(&line, BetKind::Dao, Region::South, 1).expect("factors");
        // 3 distinct permutations of 112 plus 6 of 123
        assert_eq!(factors.multiplicand, 9.0);
    }

    #[test]
    fn test_incompatible_kind_yields_none() {
        let line = parse_line("123.456dd1", None);
        assert!(LineFactors::derive(&line, BetKind::DauDuoi, Region::South, 1).is_none());
    }
}
