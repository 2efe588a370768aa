//! Verification against published draw results

mod matcher;
mod tiers;

pub use matcher::{match_bet_code, match_line};
