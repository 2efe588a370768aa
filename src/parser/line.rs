//! Bet line parsing
//!
//! Converts one normalized line into a [`BetLine`]. Structured patterns
//! (the `A/BkeoC` sequence generator and the special number-set keywords)
//! are tried first; everything else goes through a single forward character
//! scan that classifies runs into numbers, bet-type aliases and amounts.
//! A line may carry several `{alias}{amount}` segments; the first becomes the
//! primary bet type and the rest share the same numbers as additional bets.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::catalog::{expand_keyword, BetKind};
use crate::error::LineError;
use crate::models::{BetLine, ExtraBet, Money, Station, AMOUNT_UNIT, DEFAULT_AMOUNT};

/// Sequence generator shorthand: `10/20keo90` or `10/20k90`
static SEQUENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)/(\d+)(?:keo|k)(\d+)$").unwrap());
static AMOUNT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+(,\d+)?$").unwrap());

/// Parse one normalized line into a bet line
pub fn parse_line(text: &str, station: Option<&Station>) -> BetLine {
    let mut numbers: Vec<String> = Vec::new();
    let mut raw_numbers: Vec<String> = Vec::new();
    let mut bets: Vec<(BetKind, Option<Money>)> = Vec::new();
    let mut unknown: Vec<String> = Vec::new();

    for token in text.split('.').filter(|t| !t.is_empty()) {
        if let Some(set) = expand_keyword(token) {
            numbers.extend(set);
            continue;
        }
        if let Some(caps) = SEQUENCE.captures(token) {
            if let Some(seq) = expand_sequence(&caps[1], &caps[2], &caps[3]) {
                numbers.extend(seq);
                continue;
            }
            // non-positive step falls through to the generic scan
        }
        scan_token(token, &mut raw_numbers, &mut bets, &mut unknown);
    }

    let primary = bets.first().map(|(k, _)| *k);

    // Grouped-digit expansion on plain number tokens
    let width = expected_width(primary, &raw_numbers);
    for tok in raw_numbers {
        if tok.len() > width && tok.len() >= 4 && tok.len() % width == 0 {
            numbers.extend(
                tok.as_bytes()
                    .chunks(width)
                    .map(|c| String::from_utf8_lossy(c).into_owned()),
            );
        } else {
            numbers.push(tok);
        }
    }

    let amount = bets
        .first()
        .and_then(|(_, a)| *a)
        .unwrap_or(DEFAULT_AMOUNT);
    let additional_bets: Vec<ExtraBet> = bets
        .iter()
        .skip(1)
        .map(|(kind, amt)| ExtraBet {
            bet_type: *kind,
            amount: amt.unwrap_or(DEFAULT_AMOUNT),
        })
        .collect();

    let error = validate(primary, &numbers, amount, &bets, &unknown, station);

    BetLine {
        numbers,
        bet_type: primary,
        amount,
        additional_bets,
        original_text: text.to_string(),
        valid: error.is_none(),
        error,
    }
}

/// Generic character scan over one token
///
/// Digit runs before the first alias are numbers; each alias opens a bet
/// segment whose following digit run (comma allowed as decimal separator)
/// is its amount.
fn scan_token(
    token: &str,
    numbers: &mut Vec<String>,
    bets: &mut Vec<(BetKind, Option<Money>)>,
    unknown: &mut Vec<String>,
) {
    #[derive(PartialEq)]
    enum State {
        Number,
        BetType,
        Amount,
    }

    let mut state = State::Number;
    let mut buf = String::new();
    let mut pending_kind: Option<BetKind> = None;

    let flush = |state: &State,
                 buf: &mut String,
                 pending: &mut Option<BetKind>,
                 numbers: &mut Vec<String>,
                 bets: &mut Vec<(BetKind, Option<Money>)>,
                 unknown: &mut Vec<String>| {
        if buf.is_empty() {
            return;
        }
        match state {
            State::Number => numbers.push(std::mem::take(buf)),
            State::BetType => match BetKind::from_alias(buf) {
                Some(kind) => {
                    *pending = Some(kind);
                    buf.clear();
                }
                None => unknown.push(std::mem::take(buf)),
            },
            State::Amount => {
                let amount = parse_amount(buf);
                if let Some(kind) = pending.take() {
                    // unparseable amount stays attached as zero so the
                    // validator reports it instead of dropping the bet
                    bets.push((kind, Some(amount.unwrap_or(0))));
                } else {
                    unknown.push(std::mem::take(buf));
                }
                buf.clear();
            }
        }
    };

    for c in token.chars() {
        match c {
            '0'..='9' => {
                if state == State::BetType {
                    flush(&state, &mut buf, &mut pending_kind, numbers, bets, unknown);
                    state = if pending_kind.is_some() {
                        State::Amount
                    } else {
                        State::Number
                    };
                }
                buf.push(c);
            }
            'a'..='z' => {
                if state != State::BetType {
                    flush(&state, &mut buf, &mut pending_kind, numbers, bets, unknown);
                    // an alias with no amount still opens a bet
                    if let Some(kind) = pending_kind.take() {
                        bets.push((kind, None));
                    }
                    state = State::BetType;
                }
                buf.push(c);
            }
            ',' if state == State::Amount => buf.push(c),
            _ => {
                // stray character: the whole token is unrecoverable here
                unknown.push(token.to_string());
                return;
            }
        }
    }

    flush(&state, &mut buf, &mut pending_kind, numbers, bets, unknown);
    if let Some(kind) = pending_kind.take() {
        bets.push((kind, None));
    }
}

/// Expand `A/B keo C` into the arithmetic progression `[A, A+step, ..C]`
///
/// Returns `None` for a non-positive step or for operands wider than the
/// four digits any bet type accepts, which caps the expansion before it is
/// materialized; values are zero-padded to the wider of `A` and `C`.
fn expand_sequence(a: &str, b: &str, c: &str) -> Option<Vec<String>> {
    if a.len() > 4 || b.len() > 4 || c.len() > 4 {
        return None;
    }
    let start: i64 = a.parse().ok()?;
    let next: i64 = b.parse().ok()?;
    let end: i64 = c.parse().ok()?;
    let step = next - start;
    if step <= 0 {
        return None;
    }
    let width = a.len().max(c.len());
    let mut out = Vec::new();
    let mut v = start;
    while v <= end {
        out.push(format!("{:0width$}", v, width = width));
        v += step;
    }
    if out.is_empty() {
        None
    } else {
        Some(out)
    }
}

/// Parse a shorthand amount: thousand-đồng units, comma as decimal separator
fn parse_amount(s: &str) -> Option<Money> {
    if !AMOUNT.is_match(s) {
        return None;
    }
    let value: f64 = s.replace(',', ".").parse().ok()?;
    Some((value * AMOUNT_UNIT).round() as Money)
}

/// Digit width used to break up grouped number runs
fn expected_width(kind: Option<BetKind>, raw_numbers: &[String]) -> usize {
    if let Some(kind) = kind {
        let allowed = kind.allowed_digits();
        if allowed.len() == 1 {
            return allowed[0];
        }
    }
    let mut counts = [0usize; 5];
    for tok in raw_numbers {
        if (2..=4).contains(&tok.len()) {
            counts[tok.len()] += 1;
        }
    }
    (2..=4usize)
        .max_by_key(|&l| counts[l])
        .filter(|&l| counts[l] > 0)
        .unwrap_or(2)
}

fn validate(
    primary: Option<BetKind>,
    numbers: &[String],
    amount: Money,
    bets: &[(BetKind, Option<Money>)],
    unknown: &[String],
    station: Option<&Station>,
) -> Option<LineError> {
    let kind = match primary {
        Some(kind) => kind,
        None => return Some(LineError::MissingBetType),
    };
    if let Some(tok) = unknown.first() {
        return Some(LineError::UnknownToken(tok.clone()));
    }
    if numbers.is_empty() {
        return Some(LineError::MissingNumbers);
    }

    let digits = numbers[0].len();
    if numbers.iter().any(|n| n.len() != digits) {
        return Some(LineError::InconsistentNumberLength);
    }
    if !kind.allowed_digits().contains(&digits) {
        return Some(LineError::InvalidDigitCount { kind, digits });
    }
    if let Some(station) = station {
        let region = station.region();
        if !kind.applicable_to(region) {
            return Some(LineError::IncompatibleRegion { kind, region });
        }
    }
    if kind.is_bridge() && numbers.len() < 2 {
        return Some(LineError::TooFewNumbers(numbers.len()));
    }
    if amount <= 0 || bets.iter().any(|(_, a)| matches!(a, Some(v) if *v <= 0)) {
        return Some(LineError::InvalidAmount);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Region;

    fn south() -> Station {
        Station::Single {
            name: "Tiền Giang".to_string(),
            region: Region::South,
        }
    }

    fn north() -> Station {
        Station::Single {
            name: "Miền Bắc".to_string(),
            region: Region::North,
        }
    }

    #[test]
    fn test_basic_line() {
        let line = parse_line("25.36.47dd10", Some(&north()));
        assert!(line.valid, "error: {:?}", line.error);
        assert_eq!(line.numbers, vec!["25", "36", "47"]);
        assert_eq!(line.bet_type, Some(BetKind::DauDuoi));
        assert_eq!(line.amount, 10_000);
        assert!(line.additional_bets.is_empty());
    }

    #[test]
    fn test_sequence_keo() {
        let line = parse_line("10/20keo90.dd15", Some(&south()));
        assert!(line.valid);
        assert_eq!(
            line.numbers,
            vec!["10", "20", "30", "40", "50", "60", "70", "80", "90"]
        );
        assert_eq!(line.amount, 15_000);
    }

    #[test]
    fn test_sequence_step_one() {
        let line = parse_line("10/11keo19.b5", Some(&south()));
        assert!(line.valid);
        assert_eq!(line.numbers.len(), 10);
        assert_eq!(line.numbers[0], "10");
        assert_eq!(line.numbers[9], "19");
    }

    #[test]
    fn test_sequence_short_form_and_padding() {
        let line = parse_line("05/10k25.dd10", Some(&south()));
        assert!(line.valid);
        assert_eq!(line.numbers, vec!["05", "10", "15", "20", "25"]);
    }

    #[test]
    fn test_sequence_operands_capped_at_four_digits() {
        let line = parse_line("0/1keo2000000.dd1", None);
        assert!(!line.valid);
        assert!(line.numbers.is_empty());
        assert!(matches!(line.error, Some(LineError::UnknownToken(_))));
    }

    #[test]
    fn test_sequence_non_positive_step_falls_through() {
        let line = parse_line("20/10keo90.dd10", Some(&south()));
        assert!(!line.valid);
        assert!(matches!(line.error, Some(LineError::UnknownToken(_))));
    }

    #[test]
    fn test_keyword_expansion() {
        let line = parse_line("chanchan.dd20", Some(&south()));
        assert!(line.valid);
        assert_eq!(line.numbers.len(), 25);
        assert_eq!(line.amount, 20_000);

        let line = parse_line("tai.b10", Some(&south()));
        assert_eq!(line.numbers.len(), 50);
    }

    #[test]
    fn test_multi_bet_type_line() {
        let line = parse_line("93.97.da0,5.dd5", Some(&south()));
        assert!(line.valid, "error: {:?}", line.error);
        assert_eq!(line.numbers, vec!["93", "97"]);
        assert_eq!(line.bet_type, Some(BetKind::Da));
        assert_eq!(line.amount, 500);
        assert_eq!(
            line.additional_bets,
            vec![ExtraBet {
                bet_type: BetKind::DauDuoi,
                amount: 5_000
            }]
        );
    }

    #[test]
    fn test_grouped_digit_expansion() {
        let line = parse_line("2536dd10", Some(&south()));
        assert!(line.valid);
        assert_eq!(line.numbers, vec!["25", "36"]);

        // three-digit bet types split by threes
        let line = parse_line("123456xc10", Some(&south()));
        assert!(line.valid);
        assert_eq!(line.numbers, vec!["123", "456"]);
    }

    #[test]
    fn test_default_amount() {
        let line = parse_line("25.36dd", Some(&south()));
        assert!(line.valid);
        assert_eq!(line.amount, DEFAULT_AMOUNT);
    }

    #[test]
    fn test_missing_bet_type() {
        let line = parse_line("25.36", Some(&south()));
        assert!(!line.valid);
        assert_eq!(line.error, Some(LineError::MissingBetType));
    }

    #[test]
    fn test_missing_numbers() {
        let line = parse_line("dd10", Some(&south()));
        assert!(!line.valid);
        assert_eq!(line.error, Some(LineError::MissingNumbers));
    }

    #[test]
    fn test_inconsistent_digit_length() {
        let line = parse_line("25.368.47dd10", Some(&south()));
        assert!(!line.valid);
        assert_eq!(line.error, Some(LineError::InconsistentNumberLength));
    }

    #[test]
    fn test_invalid_digit_count() {
        let line = parse_line("123.456dd10", Some(&south()));
        assert!(!line.valid);
        assert_eq!(
            line.error,
            Some(LineError::InvalidDigitCount {
                kind: BetKind::DauDuoi,
                digits: 3
            })
        );
    }

    #[test]
    fn test_region_compatibility() {
        let line = parse_line("25.36da1", Some(&north()));
        assert!(!line.valid);
        assert!(matches!(
            line.error,
            Some(LineError::IncompatibleRegion { .. })
        ));

        let line = parse_line("25.36da1", Some(&south()));
        assert!(line.valid);
    }

    #[test]
    fn test_bridge_needs_two_numbers() {
        let line = parse_line("25da1", Some(&south()));
        assert!(!line.valid);
        assert_eq!(line.error, Some(LineError::TooFewNumbers(1)));
    }

    #[test]
    fn test_zero_amount_rejected() {
        let line = parse_line("25.36dd0", Some(&south()));
        assert!(!line.valid);
        assert_eq!(line.error, Some(LineError::InvalidAmount));
    }

    #[test]
    fn test_amount_decimal_comma() {
        assert_eq!(parse_amount("10"), Some(10_000));
        assert_eq!(parse_amount("0,5"), Some(500));
        assert_eq!(parse_amount("1,5"), Some(1_500));
        assert_eq!(parse_amount("1,2,3"), None);
        assert_eq!(parse_amount("abc"), None);
    }

    #[test]
    fn test_unknown_alias() {
        let line = parse_line("25.36zz10", Some(&south()));
        assert!(!line.valid);
    }
}
