//! Prize-tier relevance
//!
//! Each bet type only looks at a subset of a draw's tiers: đầu reads the
//! lowest prize (eighth in the south and central, seventh in the north),
//! đuôi reads the special prize, xỉu chủ reads the three-digit tiers, and
//! the bao-lô family sweeps everything. The pool returned here is the
//! trailing `digits` characters of every drawn number in the relevant
//! tiers, occurrence-preserving so the matcher can score nháy repeats.

use crate::catalog::{BetKind, Region};
use crate::models::DrawResult;

/// Tier holding the two-digit "đầu" numbers
fn head_tier(region: Region) -> &'static str {
    match region {
        Region::North => "g7",
        _ => "g8",
    }
}

/// Tier holding the three-digit xỉu chủ head numbers
fn three_digit_head_tier(region: Region) -> &'static str {
    match region {
        Region::North => "g6",
        _ => "g7",
    }
}

fn tail(number: &str, digits: usize) -> Option<String> {
    let chars: Vec<char> = number.chars().collect();
    if chars.len() < digits {
        return None;
    }
    Some(chars[chars.len() - digits..].iter().collect())
}

fn tier_tails(draw: &DrawResult, tier: &str, digits: usize, pool: &mut Vec<String>) {
    if let Some(numbers) = draw.prize_tiers.get(tier) {
        pool.extend(numbers.iter().filter_map(|n| tail(n, digits)));
    }
}

/// Trailing-`digits` pool of every drawn number in the tiers the bet type
/// reads, in tier order
pub(crate) fn relevant_pool(
    kind: BetKind,
    region: Region,
    digits: usize,
    draw: &DrawResult,
) -> Vec<String> {
    let mut pool = Vec::new();
    match kind {
        BetKind::Dau => tier_tails(draw, head_tier(region), digits, &mut pool),
        BetKind::Duoi => tier_tails(draw, "db", digits, &mut pool),
        BetKind::DauDuoi => {
            tier_tails(draw, head_tier(region), digits, &mut pool);
            tier_tails(draw, "db", digits, &mut pool);
        }
        BetKind::XiuChu | BetKind::Dao => {
            tier_tails(draw, three_digit_head_tier(region), digits, &mut pool);
            tier_tails(draw, "db", digits, &mut pool);
        }
        BetKind::XiuChuDau => tier_tails(draw, three_digit_head_tier(region), digits, &mut pool),
        BetKind::XiuChuDuoi => tier_tails(draw, "db", digits, &mut pool),
        BetKind::BaoLo | BetKind::Da | BetKind::BaoDao => {
            for numbers in draw.prize_tiers.values() {
                pool.extend(numbers.iter().filter_map(|n| tail(n, digits)));
            }
        }
    }
    pool
}
