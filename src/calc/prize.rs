//! Potential-prize calculation
//!
//! Mirrors the stake formula but applies the bet type's payout rate instead
//! of the house multiplier: the stated potential win is the undiscounted
//! maximum, reached when every staked combination hits.

use super::stake::{invalid_breakdown, line_bets};
use super::LineFactors;
use crate::models::{BetSettings, LineBreakdown, Money, ParsedBetCode, PrizeResult};

/// Compute the maximum potential payout for a parsed bet code
pub fn calculate_prize(parsed: &ParsedBetCode, _settings: &BetSettings) -> PrizeResult {
    let Some(station) = &parsed.station else {
        return PrizeResult {
            success: false,
            total: 0,
            details: Vec::new(),
            error: Some("Cannot compute a prize without a resolved station".to_string()),
        };
    };

    let mut details = Vec::new();
    let mut total: Money = 0;

    for (index, line) in parsed.lines.iter().enumerate() {
        for (kind, amount) in line_bets(line) {
            let station_count = station.station_count();
            let factors = if amount > 0 && line.error.is_none() {
                LineFactors::derive(line, kind, station.region(), station_count)
            } else {
                None
            };

            let breakdown = match factors {
                Some(factors) => {
                    let rate = kind.payout_rate(station.region(), line.digit_len(), station_count);
                    LineBreakdown {
                        line_index: index,
                        bet_type: Some(kind),
                        station_count,
                        number_count: line.numbers.len(),
                        multiplicand: factors.multiplicand,
                        combination_count: factors.combination_count,
                        amount,
                        multiplier: None,
                        payout_rate: Some(rate),
                        subtotal: factors.subtotal(amount, rate),
                        valid: true,
                    }
                }
                None => LineBreakdown {
                    line_index: index,
                    bet_type: Some(kind),
                    station_count,
                    number_count: line.numbers.len(),
                    multiplicand: 0.0,
                    combination_count: 0,
                    amount,
                    multiplier: None,
                    payout_rate: None,
                    subtotal: 0,
                    valid: false,
                },
            };
            total += breakdown.subtotal;
            details.push(breakdown);
        }
        if line.bet_type.is_none() {
            details.push(invalid_breakdown(line, index, station));
        }
    }

    PrizeResult {
        success: true,
        total,
        details,
        error: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::calculate_stake;
    use crate::parser::parse_bet_code;

    #[test]
    fn test_ordinary_prize() {
        // 1 station × 1 number × 2 combos × 10_000 × 75
        let parsed = parse_bet_code("vl\n25dd10");
        let result = calculate_prize(&parsed, &BetSettings::default());
        assert!(result.success);
        assert_eq!(result.total, 1_500_000);
        assert_eq!(result.details[0].payout_rate, Some(75.0));
    }

    #[test]
    fn test_prize_omits_stake_multiplier() {
        let parsed = parse_bet_code("vl\n25dd10");
        let result = calculate_prize(&parsed, &BetSettings::default());
        assert!(result.details[0].multiplier.is_none());
    }

    #[test]
    fn test_bridge_prize_rate_depends_on_station_count() {
        let one = parse_bet_code("vl\n93.97da1");
        let two = parse_bet_code("2dmn\n93.97da1");
        let settings = BetSettings::default();
        let one = calculate_prize(&one, &settings);
        let two = calculate_prize(&two, &settings);
        assert_eq!(one.details[0].payout_rate, Some(750.0));
        assert_eq!(two.details[0].payout_rate, Some(550.0));
    }

    #[test]
    fn test_stake_prize_combination_symmetry() {
        let settings = BetSettings::default();
        let codes = [
            "mb\n25.36.47dd10",
            "vl.ct\n25.36b10",
            "vl\n93.97.85da1",
            "vl\n112dao1",
            "mb\n123.456xc5",
            "vl\n1234b2",
        ];
        for code in codes {
            let parsed = parse_bet_code(code);
            let stake = calculate_stake(&parsed, &settings);
            let prize = calculate_prize(&parsed, &settings);
            assert_eq!(stake.details.len(), prize.details.len(), "{}", code);
            for (s, p) in stake.details.iter().zip(prize.details.iter()) {
                assert_eq!(
                    s.combination_count, p.combination_count,
                    "combination counts diverge for {}",
                    code
                );
                assert_eq!(s.multiplicand, p.multiplicand, "{}", code);
            }
        }
    }

    #[test]
    fn test_four_digit_bao_lo_prize() {
        // 1 × 1 × 16 combos × 2_000 × 5_500
        let parsed = parse_bet_code("vl\n1234b2");
        let result = calculate_prize(&parsed, &BetSettings::default());
        assert_eq!(result.total, 176_000_000);
    }

    #[test]
    fn test_missing_station_fails() {
        let parsed = parse_bet_code("zzz\n25dd10");
        let result = calculate_prize(&parsed, &BetSettings::default());
        assert!(!result.success);
    }
}
