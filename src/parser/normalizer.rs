//! Bet-code text normalization
//!
//! Cleans raw shorthand before parsing: lowercases, collapses the various
//! separators bettors use (comma, hyphen, runs of spaces) into the canonical
//! dot, trims stray dots, corrects known misspellings, splits unseparated
//! digit runs by the dominant digit length of the line, and inserts the
//! missing dot between two station aliases written back-to-back.
//!
//! `normalize` is pure and idempotent: running it twice gives the same text.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::catalog::{self, BetKind};

/// Known shorthand misspellings and their corrections, shared with the fixer
pub(crate) const MISSPELLINGS: &[(&str, &str)] = &[
    ("xcdui", "xcduoi"),
    ("xdui", "xduoi"),
    ("daoxcu", "daoxc"),
    ("baodo", "baodao"),
];

static SEPARATOR_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,\s\-]+").unwrap());
static MULTI_DOT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.{2,}").unwrap());
// A comma between digits directly attached to a bet alias is a decimal
// separator ("da0,5"), not a list separator.
static DECIMAL_COMMA: Lazy<Regex> = Lazy::new(|| Regex::new(r"([a-z]\d+),(\d)").unwrap());

/// Normalize a whole bet code (multi-line text)
pub fn normalize(raw: &str) -> String {
    raw.lines()
        .map(normalize_line)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Normalize one line of shorthand
pub fn normalize_line(raw: &str) -> String {
    let mut line = raw.trim().to_lowercase();

    for (wrong, right) in MISSPELLINGS {
        line = line.replace(wrong, right);
    }

    // Protect decimal commas, collapse every other separator to a dot,
    // then restore them.
    line = DECIMAL_COMMA.replace_all(&line, "$1\u{1}$2").into_owned();
    line = SEPARATOR_RUN.replace_all(&line, ".").into_owned();
    line = MULTI_DOT.replace_all(&line, ".").into_owned();
    line = line.trim_matches('.').to_string();
    line = line.replace('\u{1}', ",");

    let tokens: Vec<String> = line.split('.').map(str::to_string).collect();
    let tokens = split_grouped_digits(tokens);
    let tokens: Vec<String> = tokens.into_iter().map(split_joined_stations).collect();

    tokens.join(".")
}

/// Split unseparated digit runs by the dominant digit length of the line
///
/// `2536.47` stays as is, but `253647` in a line whose other numbers are
/// two digits long becomes `25.36.47`. Without any separated number to vote
/// on a length, the run is left alone for the line parser to resolve against
/// the bet type.
fn split_grouped_digits(tokens: Vec<String>) -> Vec<String> {
    let dominant = dominant_digit_len(&tokens);
    let Some(width) = dominant else {
        return tokens;
    };

    tokens
        .into_iter()
        .flat_map(|tok| {
            // Only the leading digit run is number material; digits after a
            // letter run belong to an amount.
            let prefix = tok.chars().take_while(|c| c.is_ascii_digit()).count();
            if prefix >= 4 && prefix > width && prefix % width == 0 {
                let mut out: Vec<String> = tok[..prefix]
                    .as_bytes()
                    .chunks(width)
                    .map(|c| String::from_utf8_lossy(c).into_owned())
                    .collect();
                if prefix < tok.len() {
                    let rest = tok[prefix..].to_string();
                    let last = out.pop().unwrap_or_default();
                    out.push(format!("{}{}", last, rest));
                }
                out
            } else {
                vec![tok]
            }
        })
        .collect()
}

/// Most common digit length (2, 3 or 4) among separated pure-digit tokens
fn dominant_digit_len(tokens: &[String]) -> Option<usize> {
    let mut counts = [0usize; 5];
    for tok in tokens {
        let len = tok.len();
        if (2..=4).contains(&len) && tok.chars().all(|c| c.is_ascii_digit()) {
            counts[len] += 1;
        }
    }
    (2..=4).max_by_key(|&l| counts[l]).filter(|&l| counts[l] > 0)
}

/// Insert the missing dot between two station aliases written back-to-back
///
/// Applies only to letter-only tokens that resolve to nothing on their own;
/// `vlct` becomes `vl.ct` while real aliases and keywords pass through.
pub(crate) fn split_joined_stations(token: String) -> String {
    if token.is_empty() || !token.chars().all(|c| c.is_ascii_lowercase()) {
        return token;
    }
    if catalog::find_station(&token).is_some()
        || catalog::region_from_alias(&token).is_some()
        || catalog::is_keyword(&token)
        || BetKind::from_alias(&token).is_some()
    {
        return token;
    }

    // Greedy: prefer the longest first alias
    for split in (1..token.len()).rev() {
        let (head, tail) = token.split_at(split);
        if let (Some(a), Some(b)) = (catalog::find_station(head), catalog::find_station(tail)) {
            if a.region == b.region {
                return format!("{}.{}", head, tail);
            }
        }
    }
    token
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separator_collapse() {
        assert_eq!(normalize_line("25, 36 - 47dd10"), "25.36.47dd10");
        assert_eq!(normalize_line("25  36  47 dd10"), "25.36.47.dd10");
        assert_eq!(normalize_line("..25.36..47dd10."), "25.36.47dd10");
    }

    #[test]
    fn test_decimal_comma_preserved() {
        assert_eq!(normalize_line("93.97da0,5.dd5"), "93.97.da0,5.dd5");
        // but list commas still collapse
        assert_eq!(normalize_line("93,97da0,5"), "93.97da0,5");
    }

    #[test]
    fn test_misspelling_fix() {
        assert_eq!(normalize_line("123xcdui10"), "123xcduoi10");
    }

    #[test]
    fn test_grouped_digit_split_by_dominant_length() {
        assert_eq!(normalize_line("25.36.4755dd10"), "25.36.47.55dd10");
        assert_eq!(normalize_line("123.456789xc10"), "123.456.789xc10");
        // no separated number to vote: leave the run alone
        assert_eq!(normalize_line("2536dd10"), "2536dd10");
    }

    #[test]
    fn test_joined_station_split() {
        assert_eq!(normalize_line("vlct"), "vl.ct");
        // real aliases pass through untouched
        assert_eq!(normalize_line("vl"), "vl");
        assert_eq!(normalize_line("tai"), "tai");
        // mixed-region pairs are not joined silently
        assert_eq!(normalize_line("vlhue"), "vlhue");
    }

    #[test]
    fn test_multiline() {
        assert_eq!(normalize("mb\n\n25.36dd10\n"), "mb\n25.36dd10");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "25, 36 - 47dd10",
            "93.97da0,5.dd5",
            "vlct\n25.36b10",
            "..25..36..  47 dd",
            "25.36.4755dd10",
            "tg 10/20keo90 dd15",
        ];
        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", input);
        }
    }
}
