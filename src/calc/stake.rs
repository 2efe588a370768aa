//! Stake calculation
//!
//! `stake = stations × numbers × combinations × amount × multiplier` for
//! ordinary lines; bridge lines swap in `2 × C(n,2)` and đảo lines swap the
//! number count for the distinct-permutation sum. Lines that failed parsing
//! contribute zero and show up as invalid breakdown entries rather than
//! aborting the whole calculation.

use super::LineFactors;
use crate::models::{
    BetLine, BetSettings, LineBreakdown, Money, ParsedBetCode, StakeResult, Station,
};

/// Compute the total amount owed for a parsed bet code
pub fn calculate_stake(parsed: &ParsedBetCode, settings: &BetSettings) -> StakeResult {
    let Some(station) = &parsed.station else {
        return StakeResult {
            success: false,
            total: 0,
            details: Vec::new(),
            error: Some("Cannot compute a stake without a resolved station".to_string()),
        };
    };

    let mut details = Vec::new();
    let mut total: Money = 0;

    for (index, line) in parsed.lines.iter().enumerate() {
        for (kind, amount) in line_bets(line) {
            let breakdown = line_stake(line, kind, amount, station, index, settings);
            total += breakdown.subtotal;
            details.push(breakdown);
        }
        if line.bet_type.is_none() {
            details.push(invalid_breakdown(line, index, station));
        }
    }

    StakeResult {
        success: true,
        total,
        details,
        error: None,
    }
}

/// Primary bet plus additional bets sharing the line's numbers
pub(crate) fn line_bets(
    line: &BetLine,
) -> impl Iterator<Item = (crate::catalog::BetKind, Money)> + '_ {
    line.bet_type
        .into_iter()
        .map(move |k| (k, line.amount))
        .chain(
            line.additional_bets
                .iter()
                .map(|extra| (extra.bet_type, extra.amount)),
        )
}

pub(crate) fn invalid_breakdown(line: &BetLine, index: usize, station: &Station) -> LineBreakdown {
    LineBreakdown {
        line_index: index,
        bet_type: line.bet_type,
        station_count: station.station_count(),
        number_count: line.numbers.len(),
        multiplicand: 0.0,
        combination_count: 0,
        amount: line.amount,
        multiplier: None,
        payout_rate: None,
        subtotal: 0,
        valid: false,
    }
}

fn line_stake(
    line: &BetLine,
    kind: crate::catalog::BetKind,
    amount: Money,
    station: &Station,
    index: usize,
    settings: &BetSettings,
) -> LineBreakdown {
    let station_count = station.station_count();
    let usable = line.valid || line.bet_type.is_some();

    let factors = if usable && amount > 0 && line.error.is_none() {
        LineFactors::derive(line, kind, station.region(), station_count)
    } else {
        None
    };

    match factors {
        Some(factors) => LineBreakdown {
            line_index: index,
            bet_type: Some(kind),
            station_count,
            number_count: line.numbers.len(),
            multiplicand: factors.multiplicand,
            combination_count: factors.combination_count,
            amount,
            multiplier: Some(settings.stake_multiplier),
            payout_rate: None,
            subtotal: factors.subtotal(amount, settings.stake_multiplier),
            valid: true,
        },
        None => LineBreakdown {
            line_index: index,
            bet_type: Some(kind),
            station_count,
            number_count: line.numbers.len(),
            multiplicand: 0.0,
            combination_count: 0,
            amount,
            multiplier: Some(settings.stake_multiplier),
            payout_rate: None,
            subtotal: 0,
            valid: false,
        },
    }
}
