//! Betcode - Vietnamese lottery bet-code interpreter
//!
//! This library provides:
//! - Shorthand bet-code parsing (station line + bet lines)
//! - Error detection and best-effort fixing of malformed codes
//! - Stake and potential-prize calculation
//! - Verification of parsed bets against published draw results
//!
//! # Example
//!
//! ```
//! use betcode::models::BetSettings;
//! use betcode::{calculate_stake, parse_bet_code};
//!
//! // "Vĩnh Long, numbers 25 and 36, đầu đuôi, 10 000₫ each"
//! let parsed = parse_bet_code("vl\n25.36dd10");
//! assert!(parsed.success);
//!
//! let stake = calculate_stake(&parsed, &BetSettings::default());
//! assert_eq!(stake.total, 32_000);
//! ```

pub mod calc;
pub mod catalog;
pub mod error;
pub mod models;
pub mod parser;
pub mod validate;
pub mod verify;

// Re-export commonly used items
pub use calc::{calculate_prize, calculate_stake};
pub use catalog::{BetKind, Region};
pub use models::{
    BetLine, BetSettings, DrawResult, ErrorReport, FixResult, MatchResult, ParsedBetCode,
    PrizeResult, StakeResult, Station,
};
pub use parser::parse_bet_code;
pub use validate::{detect, fix, suggest_fixes};
pub use verify::{match_bet_code, match_line};
