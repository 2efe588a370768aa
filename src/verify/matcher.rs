//! Draw-result matching
//!
//! Scores one parsed bet line against the draws it covers. Ordinary bet
//! types pay per matched bet number; repeats of one number in the tier
//! pool do not stack. Bridge bets pay `(matched − 1)` base wins plus a
//! nháy bonus of `0.5` per extra occurrence of the most repeated matched
//! number; permutation bets accept any digit rearrangement of a bet number.

use super::tiers::relevant_pool;
use crate::catalog::BetKind;
use crate::calc::{pair_count, permutations_of};
use crate::models::{BetLine, DrawResult, MatchResult, Money, ParsedBetCode, Station};

/// Match one bet line against the given draws
pub fn match_line(line: &BetLine, station: &Station, draws: &[DrawResult]) -> MatchResult {
    let Some(kind) = line.bet_type else {
        return MatchResult::miss(0.0);
    };
    if line.error.is_some() || line.numbers.is_empty() {
        return MatchResult::miss(0.0);
    }

    let digits = line.digit_len();
    let rate = kind.payout_rate(station.region(), digits, station.station_count());

    let mut pool = Vec::new();
    for draw in draws.iter().filter(|d| covers(station, d)) {
        pool.extend(relevant_pool(kind, station.region(), digits, draw));
    }
    if pool.is_empty() {
        return MatchResult::miss(rate);
    }

    if kind.is_bridge() {
        score_bridge(line, &pool, rate)
    } else {
        score_ordinary(line, kind, &pool, rate)
    }
}

/// Match every line of a parsed bet code; misses for invalid lines
pub fn match_bet_code(parsed: &ParsedBetCode, draws: &[DrawResult]) -> Vec<MatchResult> {
    let Some(station) = &parsed.station else {
        return parsed.lines.iter().map(|_| MatchResult::miss(0.0)).collect();
    };
    parsed
        .lines
        .iter()
        .map(|line| match_line(line, station, draws))
        .collect()
}

/// Does the bet's station spec cover this draw?
fn covers(station: &Station, draw: &DrawResult) -> bool {
    if station.region() != draw.region {
        return false;
    }
    match station {
        Station::Single { name, .. } => name == &draw.station,
        Station::List { stations } => stations.iter().any(|s| s.name == draw.station),
        Station::MultiRegion { .. } => true,
    }
}

fn occurrences(pool: &[String], candidates: &[String]) -> u64 {
    pool.iter()
        .filter(|drawn| candidates.iter().any(|c| c == *drawn))
        .count() as u64
}

fn score_ordinary(line: &BetLine, kind: BetKind, pool: &[String], rate: f64) -> MatchResult {
    let mut matched_numbers = Vec::new();
    for number in &line.numbers {
        let candidates = if kind.is_permutation() {
            permutations_of(number)
        } else {
            vec![number.clone()]
        };
        if occurrences(pool, &candidates) > 0 {
            matched_numbers.push(number.clone());
        }
    }
    if matched_numbers.is_empty() {
        return MatchResult::miss(rate);
    }
    let win_factor = matched_numbers.len() as f64;
    let win_amount = (win_factor * line.amount as f64 * rate).round() as Money;
    MatchResult {
        matched: true,
        matched_numbers,
        win_amount,
        payout_rate: rate,
        matched_pairs: Vec::new(),
        win_factor,
        bonus_factor: 0.0,
    }
}

fn score_bridge(line: &BetLine, pool: &[String], rate: f64) -> MatchResult {
    let mut matched_numbers = Vec::new();
    let mut max_occurrences = 0u64;
    for number in &line.numbers {
        let count = pool.iter().filter(|drawn| *drawn == number).count() as u64;
        if count > 0 {
            matched_numbers.push(number.clone());
            max_occurrences = max_occurrences.max(count);
        }
    }
    // A bridge needs at least one full pair
    if matched_numbers.len() < 2 {
        let mut result = MatchResult::miss(rate);
        result.matched_numbers = matched_numbers;
        return result;
    }

    let mut matched_pairs = Vec::new();
    for (i, a) in matched_numbers.iter().enumerate() {
        for b in &matched_numbers[i + 1..] {
            matched_pairs.push((a.clone(), b.clone()));
        }
    }
    debug_assert_eq!(matched_pairs.len() as u64, pair_count(matched_numbers.len()));

    let win_factor = (matched_numbers.len() - 1) as f64;
    // Nháy: the most repeated matched number adds half a base win per repeat
    let bonus_factor = (max_occurrences.saturating_sub(1)) as f64 * 0.5;
    let base_win = line.amount as f64 * rate;
    let win_amount = ((win_factor + bonus_factor) * base_win).round() as Money;

    MatchResult {
        matched: true,
        matched_numbers,
        win_amount,
        payout_rate: rate,
        matched_pairs,
        win_factor,
        bonus_factor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Region;
    use crate::parser::parse_bet_code;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    fn draw(tiers: &[(&str, &[&str])]) -> DrawResult {
        let prize_tiers = tiers
            .iter()
            .map(|(k, v)| (k.to_string(), v.iter().map(|n| n.to_string()).collect()))
            .collect::<BTreeMap<_, _>>();
        DrawResult {
            region: Region::South,
            station: "Vĩnh Long".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 8, 28).unwrap(),
            prize_tiers,
        }
    }

    fn single_line(code: &str) -> (crate::models::ParsedBetCode, usize) {
        let parsed = parse_bet_code(code);
        assert!(parsed.success, "{}", code);
        (parsed, 0)
    }

    #[test]
    fn test_dau_duoi_special_prize_tail_wins() {
        let (parsed, i) = single_line("vl\n25dd10");
        let draws = [draw(&[("db", &["123425"]), ("g8", &["47"])])];
        let station = parsed.station.as_ref().unwrap();
        let result = match_line(&parsed.lines[i], station, &draws);
        assert!(result.matched);
        assert_eq!(result.matched_numbers, vec!["25"]);
        // 1 × 10_000 × 75
        assert_eq!(result.win_amount, 750_000);
    }

    #[test]
    fn test_miss_returns_zero() {
        let (parsed, i) = single_line("vl\n99dd10");
        let draws = [draw(&[("db", &["123425"]), ("g8", &["47"])])];
        let station = parsed.station.as_ref().unwrap();
        let result = match_line(&parsed.lines[i], station, &draws);
        assert!(!result.matched);
        assert_eq!(result.win_amount, 0);
    }

    #[test]
    fn test_bao_lo_counts_each_number_once() {
        let (parsed, i) = single_line("vl\n25b10");
        // 25 appears as the tail of two different tiers but is one match
        let draws = [draw(&[("db", &["123425"]), ("g1", &["38525"]), ("g8", &["47"])])];
        let station = parsed.station.as_ref().unwrap();
        let result = match_line(&parsed.lines[i], station, &draws);
        assert!(result.matched);
        assert_eq!(result.win_factor, 1.0);
        // 1 × 10_000 × 75
        assert_eq!(result.win_amount, 750_000);
    }

    #[test]
    fn test_repeated_drawn_number_does_not_stack_for_ordinary_bets() {
        let (parsed, i) = single_line("vl\n25dd10");
        // 25 is both the g8 number and the special-prize tail
        let draws = [draw(&[("db", &["123425"]), ("g8", &["25"])])];
        let station = parsed.station.as_ref().unwrap();
        let result = match_line(&parsed.lines[i], station, &draws);
        assert_eq!(result.matched_numbers, vec!["25"]);
        assert_eq!(result.win_factor, 1.0);
        assert_eq!(result.win_amount, 750_000);
    }

    #[test]
    fn test_bridge_win_factor_and_pairs() {
        let (parsed, i) = single_line("vl\n93.97.85da1");
        let draws = [draw(&[
            ("db", &["123493"]),
            ("g1", &["38597"]),
            ("g2", &["10085"]),
        ])];
        let station = parsed.station.as_ref().unwrap();
        let result = match_line(&parsed.lines[i], station, &draws);
        assert!(result.matched);
        assert_eq!(result.matched_numbers.len(), 3);
        assert_eq!(result.matched_pairs.len(), 3);
        assert_eq!(result.win_factor, 2.0);
        assert_eq!(result.bonus_factor, 0.0);
        // 2 × 1_000 × 750
        assert_eq!(result.win_amount, 1_500_000);
    }

    #[test]
    fn test_bridge_nhay_bonus() {
        let (parsed, i) = single_line("vl\n93.97da1");
        // 93 drawn twice, 97 once: bonus (2−1) × 0.5
        let draws = [draw(&[
            ("db", &["123493"]),
            ("g1", &["38593"]),
            ("g2", &["10097"]),
        ])];
        let station = parsed.station.as_ref().unwrap();
        let result = match_line(&parsed.lines[i], station, &draws);
        assert_eq!(result.win_factor, 1.0);
        assert_eq!(result.bonus_factor, 0.5);
        // (1 + 0.5) × 1_000 × 750
        assert_eq!(result.win_amount, 1_125_000);
    }

    #[test]
    fn test_bridge_single_match_is_a_miss() {
        let (parsed, i) = single_line("vl\n93.97da1");
        let draws = [draw(&[("db", &["123493"])])];
        let station = parsed.station.as_ref().unwrap();
        let result = match_line(&parsed.lines[i], station, &draws);
        assert!(!result.matched);
        assert_eq!(result.win_amount, 0);
        assert_eq!(result.matched_numbers, vec!["93"]);
    }

    #[test]
    fn test_permutation_matches_any_rearrangement() {
        let (parsed, i) = single_line("vl\n112dao1");
        // drawn 211 is a permutation of 112
        let draws = [draw(&[("db", &["123211"]), ("g7", &["936"])])];
        let station = parsed.station.as_ref().unwrap();
        let result = match_line(&parsed.lines[i], station, &draws);
        assert!(result.matched);
        assert_eq!(result.matched_numbers, vec!["112"]);
        // 1 × 1_000 × 650
        assert_eq!(result.win_amount, 650_000);
    }

    #[test]
    fn test_draws_for_other_stations_are_ignored() {
        let (parsed, i) = single_line("vl\n25dd10");
        let mut other = draw(&[("db", &["123425"])]);
        other.station = "Cần Thơ".to_string();
        let station = parsed.station.as_ref().unwrap();
        let result = match_line(&parsed.lines[i], station, &[other]);
        assert!(!result.matched);
    }

    #[test]
    fn test_match_bet_code_covers_every_line() {
        let parsed = parse_bet_code("vl\n25dd10\n36b5");
        let draws = [draw(&[("db", &["123425"]), ("g8", &["47"])])];
        let results = match_bet_code(&parsed, &draws);
        assert_eq!(results.len(), 2);
        assert!(results[0].matched);
        assert!(!results[1].matched);
    }
}
