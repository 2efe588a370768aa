//! Shared data model
//!
//! Boundary types exchanged with callers: parse output, detector reports,
//! fixer results, stake/prize breakdowns, draw results and match results.
//! Everything is serde-serializable; downstream code depends on the field
//! names `station`, `lines` and `success` of [`ParsedBetCode`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::catalog::{BetKind, Region};
use crate::error::{DetectKind, LineError, StationError};

/// Money in đồng
pub type Money = i64;

/// Amounts are entered in thousand-đồng shorthand; `10` means 10 000₫
pub const AMOUNT_UNIT: f64 = 1000.0;

/// Default shorthand amount when a bet type carries no explicit amount
pub const DEFAULT_AMOUNT: Money = 10_000;

/// Resolved station specification from the first input line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Station {
    /// One named station
    Single { name: String, region: Region },
    /// First `count` stations drawing in a region (e.g. `2dmn`)
    MultiRegion { region: Region, count: usize },
    /// Explicit station list, all in one region
    List { stations: Vec<StationRef> },
}

/// Reference to one catalog station
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationRef {
    pub name: String,
    pub region: Region,
}

impl Station {
    /// Region this station spec draws in
    pub fn region(&self) -> Region {
        match self {
            Station::Single { region, .. } => *region,
            Station::MultiRegion { region, .. } => *region,
            Station::List { stations } => stations
                .first()
                .map(|s| s.region)
                .unwrap_or(Region::South),
        }
    }

    /// Number of stations the bet covers
    pub fn station_count(&self) -> usize {
        match self {
            Station::Single { .. } => 1,
            Station::MultiRegion { count, .. } => *count,
            Station::List { stations } => stations.len(),
        }
    }

    /// Display name for reports
    pub fn describe(&self) -> String {
        match self {
            Station::Single { name, .. } => name.clone(),
            Station::MultiRegion { region, count } => format!("{} đài {}", count, region),
            Station::List { stations } => stations
                .iter()
                .map(|s| s.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// One additional bet type sharing the line's numbers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraBet {
    pub bet_type: BetKind,
    pub amount: Money,
}

/// One parsed bet line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BetLine {
    /// All numbers share one digit length when the line is valid
    pub numbers: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bet_type: Option<BetKind>,
    pub amount: Money,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_bets: Vec<ExtraBet>,
    pub original_text: String,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<LineError>,
}

impl BetLine {
    /// Empty invalid line for the given source text
    pub fn invalid(original: &str, error: LineError) -> Self {
        Self {
            numbers: Vec::new(),
            bet_type: None,
            amount: 0,
            additional_bets: Vec::new(),
            original_text: original.to_string(),
            valid: false,
            error: Some(error),
        }
    }

    /// Digit length of the line's numbers (0 when empty)
    pub fn digit_len(&self) -> usize {
        self.numbers.first().map(|n| n.len()).unwrap_or(0)
    }
}

/// Full parse output for one bet code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedBetCode {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub station: Option<Station>,
    pub lines: Vec<BetLine>,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub station_error: Option<StationError>,
}

/// Scope of a detected error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorScope {
    Global,
    Station,
    Line,
    Number,
}

/// Severity of a detected error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// One detector finding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedError {
    #[serde(rename = "type")]
    pub kind: DetectKind,
    pub message: String,
    pub scope: ErrorScope,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_index: Option<usize>,
    pub severity: Severity,
}

/// Validation report over a parse result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub has_errors: bool,
    pub errors: Vec<DetectedError>,
}

impl ErrorReport {
    /// Findings with error severity only
    pub fn hard_errors(&self) -> impl Iterator<Item = &DetectedError> {
        self.errors
            .iter()
            .filter(|e| e.severity == Severity::Error)
    }

    /// Findings touching a given line
    pub fn for_line(&self, index: usize) -> impl Iterator<Item = &DetectedError> {
        self.errors
            .iter()
            .filter(move |e| e.line_index == Some(index))
    }
}

/// One rewrite applied by the fixer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixChange {
    pub line_index: usize,
    pub old_line: String,
    pub new_line: String,
    #[serde(rename = "error_type")]
    pub kind: DetectKind,
}

/// Best-effort rewrite result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixResult {
    pub success: bool,
    pub fixed_text: String,
    pub changes: Vec<FixChange>,
}

/// Human-readable fix suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_index: Option<usize>,
    pub message: String,
}

/// Per-line stake/prize breakdown, recording every formula input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineBreakdown {
    pub line_index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bet_type: Option<BetKind>,
    pub station_count: usize,
    pub number_count: usize,
    /// Pairs for bridge lines, permutation sum for đảo lines
    pub multiplicand: f64,
    pub combination_count: u32,
    pub amount: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiplier: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payout_rate: Option<f64>,
    pub subtotal: Money,
    pub valid: bool,
}

/// Stake calculation output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StakeResult {
    pub success: bool,
    pub total: Money,
    pub details: Vec<LineBreakdown>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Potential-prize calculation output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrizeResult {
    pub success: bool,
    pub total: Money,
    pub details: Vec<LineBreakdown>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// User-configurable calculation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BetSettings {
    /// House discount factor applied to stakes
    pub stake_multiplier: f64,
}

impl Default for BetSettings {
    fn default() -> Self {
        Self {
            stake_multiplier: 0.8,
        }
    }
}

/// Published draw result for one station on one date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawResult {
    pub region: Region,
    pub station: String,
    pub date: NaiveDate,
    /// Tier name (`db`, `g1`..`g8`) to drawn numbers
    pub prize_tiers: BTreeMap<String, Vec<String>>,
}

/// Verification output for one bet line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub matched: bool,
    pub matched_numbers: Vec<String>,
    pub win_amount: Money,
    pub payout_rate: f64,
    /// Matched pairs, bridge bets only
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub matched_pairs: Vec<(String, String)>,
    /// `matched − 1` for bridge bets, matched count otherwise
    pub win_factor: f64,
    /// Nháy bonus: 0.5 per extra occurrence of the most repeated number
    pub bonus_factor: f64,
}

impl MatchResult {
    /// A no-win result
    pub fn miss(payout_rate: f64) -> Self {
        Self {
            matched: false,
            matched_numbers: Vec::new(),
            win_amount: 0,
            payout_rate,
            matched_pairs: Vec::new(),
            win_factor: 0.0,
            bonus_factor: 0.0,
        }
    }
}
