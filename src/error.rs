//! Error taxonomy for bet-code parsing and validation
//!
//! Every failure in the library surfaces as a value: parse results carry
//! `Option<LineError>`, station resolution returns `Result<_, StationError>`,
//! and the detector accumulates `DetectKind`-tagged entries. Nothing panics
//! on malformed input.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{BetKind, Region};

/// Station resolution errors
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum StationError {
    #[error("Could not resolve station from '{0}'")]
    Unresolved(String),

    #[error("Station list mixes regions: {0} and {1}")]
    MixedRegions(Region, Region),

    #[error("Station count must be at least 1")]
    ZeroCount,
}

/// Per-line parse/validation errors
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum LineError {
    #[error("Line has no recognizable bet type")]
    MissingBetType,

    #[error("Line has no bet numbers")]
    MissingNumbers,

    #[error("Bet type {kind} is not played in the {region} region")]
    IncompatibleRegion { kind: BetKind, region: Region },

    #[error("Bet type {kind} does not accept {digits}-digit numbers")]
    InvalidDigitCount { kind: BetKind, digits: usize },

    #[error("Numbers in one line must share a digit length")]
    InconsistentNumberLength,

    #[error("Bet amount must be greater than zero")]
    InvalidAmount,

    #[error("Bridge bets need at least two numbers, got {0}")]
    TooFewNumbers(usize),

    #[error("Unknown token '{0}'")]
    UnknownToken(String),
}

/// Classification tags for detector findings and fixer changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DetectKind {
    StationUnresolved,
    StationScheduleViolation,
    MixedRegions,
    MissingBetType,
    MissingNumbers,
    IncompatibleBetTypeRegion,
    InvalidDigitCount,
    InconsistentNumberLength,
    InvalidAmount,
    MultipleBetTypesInLine,
    GroupedNumbers,
    NoValidLine,
    Formatting,
}

impl LineError {
    /// Map a line error onto its detector classification
    pub fn detect_kind(&self) -> DetectKind {
        match self {
            LineError::MissingBetType | LineError::UnknownToken(_) => DetectKind::MissingBetType,
            LineError::MissingNumbers => DetectKind::MissingNumbers,
            LineError::IncompatibleRegion { .. } => DetectKind::IncompatibleBetTypeRegion,
            LineError::InvalidDigitCount { .. } | LineError::TooFewNumbers(_) => {
                DetectKind::InvalidDigitCount
            }
            LineError::InconsistentNumberLength => DetectKind::InconsistentNumberLength,
            LineError::InvalidAmount => DetectKind::InvalidAmount,
        }
    }
}
