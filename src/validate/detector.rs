//! Error detection over a parse result
//!
//! Runs structural and semantic checks independent of parsing success:
//! station existence and schedule compatibility for the given date, per-line
//! bet-type/number/amount validity, and the non-fatal stylistic warnings the
//! fixer knows how to rewrite.

use chrono::{Datelike, NaiveDate};

use crate::catalog::{self, BetKind};
use crate::error::{DetectKind, StationError};
use crate::models::{
    BetLine, DetectedError, ErrorReport, ErrorScope, ParsedBetCode, Severity, Station,
};

/// Validate a parsed bet code against the catalog and the draw date
pub fn detect(parsed: &ParsedBetCode, date: NaiveDate) -> ErrorReport {
    let mut errors: Vec<DetectedError> = Vec::new();

    check_station(parsed, date, &mut errors);

    for (index, line) in parsed.lines.iter().enumerate() {
        check_line(line, parsed.station.as_ref(), index, &mut errors);
    }

    if !parsed.lines.is_empty() && parsed.lines.iter().all(|l| !l.valid) {
        errors.push(DetectedError {
            kind: DetectKind::NoValidLine,
            message: "No valid bet line in the code".to_string(),
            scope: ErrorScope::Global,
            line_index: None,
            severity: Severity::Error,
        });
    }

    let has_errors = errors.iter().any(|e| e.severity == Severity::Error);
    ErrorReport { has_errors, errors }
}

fn check_station(parsed: &ParsedBetCode, date: NaiveDate, errors: &mut Vec<DetectedError>) {
    let weekday = date.weekday();

    let Some(station) = &parsed.station else {
        let (kind, message) = match &parsed.station_error {
            Some(e @ StationError::MixedRegions(..)) => (DetectKind::MixedRegions, e.to_string()),
            Some(e) => (DetectKind::StationUnresolved, e.to_string()),
            None => (
                DetectKind::StationUnresolved,
                "Missing station line".to_string(),
            ),
        };
        errors.push(DetectedError {
            kind,
            message,
            scope: ErrorScope::Station,
            line_index: None,
            severity: Severity::Error,
        });
        return;
    };

    match station {
        Station::Single { name, region } => {
            if !catalog::is_scheduled(name, *region, weekday) {
                errors.push(schedule_violation(format!(
                    "{} does not draw on {}",
                    name, weekday
                )));
            }
        }
        Station::MultiRegion { region, count } => {
            let max = catalog::stations_per_day(*region, weekday);
            if *count > max {
                errors.push(schedule_violation(format!(
                    "Requested {} stations but only {} draw in the {} region on {}",
                    count, max, region, weekday
                )));
            }
        }
        Station::List { stations } => {
            for member in stations {
                if !catalog::is_scheduled(&member.name, member.region, weekday) {
                    errors.push(schedule_violation(format!(
                        "{} does not draw on {}",
                        member.name, weekday
                    )));
                }
            }
        }
    }
}

fn schedule_violation(message: String) -> DetectedError {
    DetectedError {
        kind: DetectKind::StationScheduleViolation,
        message,
        scope: ErrorScope::Station,
        line_index: None,
        severity: Severity::Error,
    }
}

fn check_line(
    line: &BetLine,
    station: Option<&Station>,
    index: usize,
    errors: &mut Vec<DetectedError>,
) {
    if let Some(err) = &line.error {
        errors.push(DetectedError {
            kind: err.detect_kind(),
            message: err.to_string(),
            scope: ErrorScope::Line,
            line_index: Some(index),
            severity: Severity::Error,
        });
    }

    // Additional bet types must fit the numbers and region too
    let digits = line.digit_len();
    for extra in &line.additional_bets {
        check_extra_bet(extra.bet_type, digits, station, index, errors);
    }

    if !line.additional_bets.is_empty() {
        errors.push(DetectedError {
            kind: DetectKind::MultipleBetTypesInLine,
            message: "Line carries multiple bet types; consider one line per bet type"
                .to_string(),
            scope: ErrorScope::Line,
            line_index: Some(index),
            severity: Severity::Warning,
        });
    }

    if has_grouped_run(&line.original_text, line.digit_len()) {
        errors.push(DetectedError {
            kind: DetectKind::GroupedNumbers,
            message: "Numbers are written as one digit run; separate them with dots".to_string(),
            scope: ErrorScope::Number,
            line_index: Some(index),
            severity: Severity::Warning,
        });
    }
}

fn check_extra_bet(
    kind: BetKind,
    digits: usize,
    station: Option<&Station>,
    index: usize,
    errors: &mut Vec<DetectedError>,
) {
    if digits > 0 && !kind.allowed_digits().contains(&digits) {
        errors.push(DetectedError {
            kind: DetectKind::InvalidDigitCount,
            message: format!("Bet type {} does not accept {}-digit numbers", kind, digits),
            scope: ErrorScope::Line,
            line_index: Some(index),
            severity: Severity::Error,
        });
    }
    if let Some(station) = station {
        if !kind.applicable_to(station.region()) {
            errors.push(DetectedError {
                kind: DetectKind::IncompatibleBetTypeRegion,
                message: format!(
                    "Bet type {} is not played in the {} region",
                    kind,
                    station.region()
                ),
                scope: ErrorScope::Line,
                line_index: Some(index),
                severity: Severity::Error,
            });
        }
    }
}

/// A token whose leading digit run is longer than the parsed digit length
/// was grouped by the bettor
fn has_grouped_run(text: &str, digit_len: usize) -> bool {
    if digit_len == 0 {
        return false;
    }
    text.split('.').any(|tok| {
        let run = tok.chars().take_while(|c| c.is_ascii_digit()).count();
        run >= 4 && run > digit_len
    })
}
