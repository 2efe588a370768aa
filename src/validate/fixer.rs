//! Best-effort bet-code repair
//!
//! `suggest_fixes` renders a detector report as human-readable advice;
//! `fix` rewrites the original text through a fixed pipeline of line-local
//! transforms, recording every change for display. Fixing is best-effort:
//! an empty change list means "could not auto-fix", never "input is valid".

use tracing::debug;

use crate::catalog::BetKind;
use crate::error::DetectKind;
use crate::models::{ErrorReport, FixChange, FixResult, Money, Suggestion, AMOUNT_UNIT};
use crate::parser::{
    normalize_line, parse_line, resolve_station, split_joined_stations, MISSPELLINGS,
};

/// Render a detector report as human-readable suggestions
pub fn suggest_fixes(_text: &str, report: &ErrorReport) -> Vec<Suggestion> {
    report
        .errors
        .iter()
        .map(|err| {
            let advice = match err.kind {
                DetectKind::StationUnresolved => {
                    "Check the station line; it should be a station alias like 'mb' or 'vl.ct'"
                }
                DetectKind::StationScheduleViolation => {
                    "Pick a station that draws on the bet date"
                }
                DetectKind::MixedRegions => "Keep all stations of a list in one region",
                DetectKind::MissingBetType => "Add a bet type alias after the numbers, e.g. 'dd10'",
                DetectKind::MissingNumbers => "Add the numbers to play before the bet type",
                DetectKind::InvalidAmount => "Write the amount after the bet type, e.g. 'dd10'",
                DetectKind::GroupedNumbers => "Separate grouped digits with dots, e.g. '25.36'",
                DetectKind::MultipleBetTypesInLine => {
                    "Split the line so each bet type gets its own line"
                }
                _ => "Rewrite the line following the 'numbers + bet type + amount' shape",
            };
            Suggestion {
                line_index: err.line_index,
                message: format!("{}: {}", err.message, advice),
            }
        })
        .collect()
}

/// Apply the automatic fix pipeline to the original text
///
/// The pipeline is fixed and line-local; the report is advisory only (the
/// transforms re-derive what they need from the text itself).
pub fn fix(text: &str, _report: &ErrorReport) -> FixResult {
    let mut changes: Vec<FixChange> = Vec::new();
    let lines: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect();

    // Line-content transforms, in fixed order
    let mut fixed: Vec<String> = Vec::with_capacity(lines.len());
    for (index, line) in lines.iter().enumerate() {
        let mut current = line.clone();
        current = apply(&mut changes, index, current, DetectKind::Formatting, trim_dots);
        current = apply(&mut changes, index, current, DetectKind::Formatting, |l| {
            l.replace('-', ".")
        });
        current = apply(
            &mut changes,
            index,
            current,
            DetectKind::Formatting,
            fix_misspellings,
        );
        current = apply(
            &mut changes,
            index,
            current,
            DetectKind::InvalidAmount,
            add_default_amount,
        );
        current = apply(
            &mut changes,
            index,
            current,
            DetectKind::GroupedNumbers,
            split_grouped_runs,
        );
        if index == 0 {
            current = apply(
                &mut changes,
                index,
                current,
                DetectKind::StationUnresolved,
                |l| split_joined_stations(l.to_lowercase()),
            );
        }
        fixed.push(current);
    }

    // The one line-count-changing transform: expand multi-bet-type lines
    let fixed = expand_multi_bet_lines(fixed, &mut changes);

    debug!(changes = changes.len(), "fix pipeline finished");
    FixResult {
        success: !changes.is_empty(),
        fixed_text: fixed.join("\n"),
        changes,
    }
}

fn apply<F>(
    changes: &mut Vec<FixChange>,
    index: usize,
    line: String,
    kind: DetectKind,
    transform: F,
) -> String
where
    F: Fn(&str) -> String,
{
    let next = transform(&line);
    if next != line {
        changes.push(FixChange {
            line_index: index,
            old_line: line,
            new_line: next.clone(),
            kind,
        });
    }
    next
}

fn trim_dots(line: &str) -> String {
    line.trim().trim_matches('.').to_string()
}

fn fix_misspellings(line: &str) -> String {
    let mut out = line.to_string();
    for (wrong, right) in MISSPELLINGS {
        out = out.replace(wrong, right);
    }
    out
}

/// Append the default amount after a bare trailing bet-type alias
fn add_default_amount(line: &str) -> String {
    let trailing: String = line
        .chars()
        .rev()
        .take_while(|c| c.is_ascii_alphabetic())
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    if !trailing.is_empty()
        && trailing.len() < line.len()
        && BetKind::from_alias(&trailing.to_lowercase()).is_some()
    {
        format!("{}10", line)
    } else {
        line.to_string()
    }
}

/// Split grouped digit runs using the digit width the line's bet type expects
fn split_grouped_runs(line: &str) -> String {
    let normalized = normalize_line(line);
    let parsed = parse_line(&normalized, None);
    let width = match parsed.bet_type.map(|k| k.allowed_digits()) {
        Some([only]) => *only,
        _ => 2,
    };

    let mut split_any = false;
    let tokens: Vec<String> = normalized
        .split('.')
        .map(|tok| {
            let run = tok.chars().take_while(|c| c.is_ascii_digit()).count();
            if run >= 4 && run > width && run % width == 0 {
                split_any = true;
                let mut parts: Vec<String> = tok[..run]
                    .as_bytes()
                    .chunks(width)
                    .map(|c| String::from_utf8_lossy(c).into_owned())
                    .collect();
                if run < tok.len() {
                    let tail = tok[run..].to_string();
                    let last = parts.pop().unwrap_or_default();
                    parts.push(format!("{}{}", last, tail));
                }
                parts.join(".")
            } else {
                tok.to_string()
            }
        })
        .collect();
    if split_any {
        tokens.join(".")
    } else {
        line.to_string()
    }
}

/// Expand every line carrying several bet types into one line per bet type
///
/// The first line may be the single-line form (station prefix plus one bet
/// line); the prefix is split off onto its own line so the remainder can be
/// expanded like any other bet line.
fn expand_multi_bet_lines(lines: Vec<String>, changes: &mut Vec<FixChange>) -> Vec<String> {
    let mut out = Vec::with_capacity(lines.len());
    for (index, line) in lines.into_iter().enumerate() {
        let normalized = normalize_line(&line);
        let (station, bet_part) = if index == 0 {
            match split_station_text(&normalized) {
                Some((prefix, rest)) if !rest.is_empty() => (Some(prefix), rest),
                _ => {
                    out.push(line);
                    continue;
                }
            }
        } else {
            (None, normalized)
        };

        let parsed = parse_line(&bet_part, None);
        if parsed.additional_bets.is_empty() || parsed.numbers.is_empty() {
            out.push(line);
            continue;
        }

        let numbers = parsed.numbers.join(".");
        let mut expanded = Vec::new();
        if let Some(prefix) = station {
            expanded.push(prefix);
        }
        if let Some(kind) = parsed.bet_type {
            expanded.push(format!(
                "{}{}{}",
                numbers,
                kind.canonical_alias(),
                format_amount(parsed.amount)
            ));
        }
        for extra in &parsed.additional_bets {
            expanded.push(format!(
                "{}{}{}",
                numbers,
                extra.bet_type.canonical_alias(),
                format_amount(extra.amount)
            ));
        }
        changes.push(FixChange {
            line_index: index,
            old_line: line,
            new_line: expanded.join("\n"),
            kind: DetectKind::MultipleBetTypesInLine,
        });
        out.extend(expanded);
    }
    out
}

/// Longest resolvable station prefix of a normalized first line, with the
/// unconsumed remainder
fn split_station_text(line: &str) -> Option<(String, String)> {
    if resolve_station(line).is_ok() {
        return Some((line.to_string(), String::new()));
    }
    let tokens: Vec<&str> = line.split('.').filter(|t| !t.is_empty()).collect();
    for take in (1..tokens.len()).rev() {
        let prefix = tokens[..take].join(".");
        if resolve_station(&prefix).is_ok() {
            return Some((prefix, tokens[take..].join(".")));
        }
    }
    None
}

/// Render a đồng amount back into thousand-đồng shorthand
fn format_amount(amount: Money) -> String {
    let units = amount as f64 / AMOUNT_UNIT;
    if units.fract() == 0.0 {
        format!("{}", units as i64)
    } else {
        format!("{}", units).replace('.', ",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_bet_code;
    use crate::validate::detect;
    use chrono::NaiveDate;

    fn friday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 28).unwrap()
    }

    fn report_for(text: &str) -> ErrorReport {
        detect(&parse_bet_code(text), friday())
    }

    #[test]
    fn test_no_findings_means_no_fix() {
        let text = "mb\n25.36dd10";
        let result = fix(text, &report_for(text));
        assert!(!result.success);
        assert_eq!(result.fixed_text, text);
    }

    #[test]
    fn test_trim_and_hyphen_fixes() {
        let text = "mb\n.25-36dd10.";
        let result = fix(text, &report_for(text));
        assert!(result.success);
        assert_eq!(result.fixed_text, "mb\n25.36dd10");
        assert!(result
            .changes
            .iter()
            .all(|c| c.kind == DetectKind::Formatting));
    }

    #[test]
    fn test_misspelling_fix() {
        let text = "mb\n123.456xcdui10";
        let result = fix(text, &report_for(text));
        assert!(result.fixed_text.contains("xcduoi10"));
    }

    #[test]
    fn test_misspelling_table_covers_dao_and_bao_variants() {
        let text = "vl\n112daoxcu1";
        let result = fix(text, &report_for(text));
        assert!(result.fixed_text.contains("112daoxc1"));

        let text = "vl\n25baodo1";
        let result = fix(text, &report_for(text));
        assert!(result.fixed_text.contains("25baodao1"));
    }

    #[test]
    fn test_default_amount_inserted() {
        let text = "mb\n25.36dd";
        let result = fix(text, &report_for(text));
        assert!(result.success);
        assert_eq!(result.fixed_text, "mb\n25.36dd10");
        assert!(result
            .changes
            .iter()
            .any(|c| c.kind == DetectKind::InvalidAmount));
    }

    #[test]
    fn test_grouped_run_split() {
        let text = "mb\n2536dd10";
        let result = fix(text, &report_for(text));
        assert_eq!(result.fixed_text, "mb\n25.36dd10");

        // three-digit bet types split by threes, not pairs
        let text = "mb\n123456xc10";
        let result = fix(text, &report_for(text));
        assert_eq!(result.fixed_text, "mb\n123.456xc10");
    }

    #[test]
    fn test_joined_station_split() {
        let text = "vlct\n25.36b10";
        let result = fix(text, &report_for(text));
        assert_eq!(result.fixed_text, "vl.ct\n25.36b10");
        assert!(result
            .changes
            .iter()
            .any(|c| c.kind == DetectKind::StationUnresolved));
    }

    #[test]
    fn test_multi_bet_line_expansion() {
        let text = "vl\n93.97da0,5.dd5";
        let result = fix(text, &report_for(text));
        assert!(result.success);
        assert_eq!(result.fixed_text, "vl\n93.97da0,5\n93.97dd5");
        let change = result
            .changes
            .iter()
            .find(|c| c.kind == DetectKind::MultipleBetTypesInLine)
            .unwrap();
        assert_eq!(change.line_index, 1);
    }

    #[test]
    fn test_single_line_form_multi_bet_expansion() {
        let text = "tg 93.97da1.dd5";
        let result = fix(text, &report_for(text));
        assert!(result.success);
        assert_eq!(result.fixed_text, "tg\n93.97da1\n93.97dd5");
        let change = result
            .changes
            .iter()
            .find(|c| c.kind == DetectKind::MultipleBetTypesInLine)
            .unwrap();
        assert_eq!(change.line_index, 0);
    }

    #[test]
    fn test_fix_round_trip_stability() {
        // After a successful fix, the triggering finding must be gone
        let cases = ["mb\n2536dd10", "mb\n25.36dd", "vl\n93.97da0,5.dd5"];
        for text in cases {
            let before = report_for(text);
            let result = fix(text, &before);
            assert!(result.success, "no fix applied for {:?}", text);
            let after = report_for(&result.fixed_text);
            for change in &result.changes {
                assert!(
                    !after.errors.iter().any(|e| e.kind == change.kind),
                    "{:?} still reported after fixing {:?}",
                    change.kind,
                    text
                );
            }
        }
    }

    #[test]
    fn test_suggestions_mention_line() {
        let text = "mb\n25.36";
        let suggestions = suggest_fixes(text, &report_for(text));
        assert!(!suggestions.is_empty());
        assert!(suggestions.iter().any(|s| s.line_index == Some(0)));
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(10_000), "10");
        assert_eq!(format_amount(500), "0,5");
        assert_eq!(format_amount(1_500), "1,5");
    }
}
