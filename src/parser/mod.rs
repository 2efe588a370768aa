//! Bet-code parsing
//!
//! A bet code is a multi-line text blob: the first non-empty line names the
//! station (single alias, `{count}{region}` pattern, or a station list) and
//! every following line is a bet line. The single-line form `tg 10/20keo90
//! dd15` is also accepted: the longest resolvable prefix of the first line
//! becomes the station and the remainder is parsed as a bet line.
//!
//! # Example
//!
//! ```
//! use betcode::parse_bet_code;
//!
//! let parsed = parse_bet_code("mb\n25.36.47dd10");
//! assert!(parsed.success);
//! assert_eq!(parsed.lines[0].numbers, vec!["25", "36", "47"]);
//! ```

mod line;
mod normalizer;
mod station;

pub use line::parse_line;
pub use normalizer::{normalize, normalize_line};
pub(crate) use normalizer::{split_joined_stations, MISSPELLINGS};
pub use station::resolve_station;

use tracing::debug;

use crate::error::StationError;
use crate::models::{BetLine, ParsedBetCode, Station};

/// Parse a raw bet code into a structured, validated result
pub fn parse_bet_code(text: &str) -> ParsedBetCode {
    let normalized = normalize(text);
    let mut lines = normalized.lines();

    let Some(first) = lines.next() else {
        return ParsedBetCode {
            station: None,
            lines: Vec::new(),
            success: false,
            station_error: Some(StationError::Unresolved(String::new())),
        };
    };

    let (station, station_error, leftover) = split_station_line(first);
    debug!(?station, ?station_error, "station line resolved");

    let mut bet_lines: Vec<BetLine> = Vec::new();
    if let Some(rest) = leftover {
        bet_lines.push(parse_line(&rest, station.as_ref()));
    }
    for raw in lines {
        bet_lines.push(parse_line(raw, station.as_ref()));
    }

    let success =
        station.is_some() && !bet_lines.is_empty() && bet_lines.iter().all(|l| l.valid);

    ParsedBetCode {
        station,
        lines: bet_lines,
        success,
        station_error,
    }
}

/// Resolve the longest station prefix of the first line
///
/// Returns the station (if any), the resolution error for the full line when
/// nothing matched, and the unconsumed remainder to be parsed as a bet line.
fn split_station_line(
    first: &str,
) -> (Option<Station>, Option<StationError>, Option<String>) {
    match resolve_station(first) {
        Ok(station) => return (Some(station), None, None),
        // A mixed-region list is a definite station line with a definite
        // error; retrying prefixes would misread part of it as a bet line.
        Err(e @ StationError::MixedRegions(..)) | Err(e @ StationError::ZeroCount) => {
            return (None, Some(e), None)
        }
        Err(_) => {}
    }

    let tokens: Vec<&str> = first.split('.').filter(|t| !t.is_empty()).collect();
    for take in (1..tokens.len()).rev() {
        let prefix = tokens[..take].join(".");
        if let Ok(station) = resolve_station(&prefix) {
            let rest = tokens[take..].join(".");
            return (Some(station), None, Some(rest));
        }
    }

    (
        None,
        Some(StationError::Unresolved(first.to_string())),
        None,
    )
}
