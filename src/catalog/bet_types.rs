//! Bet type catalog
//!
//! The shorthand aliases resolve once into the closed `BetKind` enum; all
//! behavior (digit validity, region applicability, combination counts,
//! payout rates) is a pure function of the kind plus `(region, digits,
//! station_count)`. Rates are quoted per one unit staked, in the same
//! thousand-đồng scale the amounts use.

use super::Region;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of supported bet types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BetKind {
    /// Đầu đuôi: head and tail of the draw
    DauDuoi,
    /// Đầu: head tier only
    Dau,
    /// Đuôi: last two digits of the special prize
    Duoi,
    /// Bao lô: cover-all across prize tiers
    BaoLo,
    /// Xỉu chủ: three-digit head and tail
    XiuChu,
    /// Xỉu chủ đầu
    XiuChuDau,
    /// Xỉu chủ đuôi
    XiuChuDuoi,
    /// Đá: bridge bet on co-occurring pairs
    Da,
    /// Đảo xỉu chủ: any-permutation three-digit bet
    Dao,
    /// Bao lô đảo: any-permutation cover-all
    BaoDao,
}

impl BetKind {
    /// All kinds, in catalog order
    pub const ALL: &'static [BetKind] = &[
        BetKind::DauDuoi,
        BetKind::Dau,
        BetKind::Duoi,
        BetKind::BaoLo,
        BetKind::XiuChu,
        BetKind::XiuChuDau,
        BetKind::XiuChuDuoi,
        BetKind::Da,
        BetKind::Dao,
        BetKind::BaoDao,
    ];

    /// Shorthand aliases bettors type for this kind
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            BetKind::DauDuoi => &["dd", "dauduoi"],
            BetKind::Dau => &["dau", "dg"],
            BetKind::Duoi => &["duoi", "dui", "de"],
            BetKind::BaoLo => &["b", "bl", "bao", "lo", "baolo"],
            BetKind::XiuChu => &["xc", "x", "xchu"],
            BetKind::XiuChuDau => &["xcdau", "xdau"],
            BetKind::XiuChuDuoi => &["xcduoi", "xduoi"],
            BetKind::Da => &["da", "dv"],
            BetKind::Dao => &["dao", "xcdao", "daoxc", "dx"],
            BetKind::BaoDao => &["bdao", "baodao", "bdd"],
        }
    }

    /// Resolve an alias to its kind (exact match, lowercase input expected)
    pub fn from_alias(alias: &str) -> Option<BetKind> {
        BetKind::ALL
            .iter()
            .copied()
            .find(|k| k.aliases().contains(&alias))
    }

    /// Canonical shorthand used when rewriting text
    pub fn canonical_alias(&self) -> &'static str {
        self.aliases()[0]
    }

    /// Vietnamese display name
    pub fn label(&self) -> &'static str {
        match self {
            BetKind::DauDuoi => "đầu đuôi",
            BetKind::Dau => "đầu",
            BetKind::Duoi => "đuôi",
            BetKind::BaoLo => "bao lô",
            BetKind::XiuChu => "xỉu chủ",
            BetKind::XiuChuDau => "xỉu chủ đầu",
            BetKind::XiuChuDuoi => "xỉu chủ đuôi",
            BetKind::Da => "đá",
            BetKind::Dao => "đảo xỉu chủ",
            BetKind::BaoDao => "bao lô đảo",
        }
    }

    /// Digit lengths this kind accepts
    pub fn allowed_digits(&self) -> &'static [usize] {
        match self {
            BetKind::DauDuoi | BetKind::Dau | BetKind::Duoi | BetKind::Da => &[2],
            BetKind::XiuChu | BetKind::XiuChuDau | BetKind::XiuChuDuoi | BetKind::Dao => &[3],
            BetKind::BaoLo | BetKind::BaoDao => &[2, 3, 4],
        }
    }

    /// Whether this kind is played in the given region
    pub fn applicable_to(&self, region: Region) -> bool {
        match self {
            // Northern shorthand uses xiên for pair play, not đá
            BetKind::Da => region != Region::North,
            _ => true,
        }
    }

    /// Bridge (đá) bets pay on co-occurring pairs
    pub fn is_bridge(&self) -> bool {
        matches!(self, BetKind::Da)
    }

    /// Đảo-family bets match any digit permutation
    pub fn is_permutation(&self) -> bool {
        matches!(self, BetKind::Dao | BetKind::BaoDao)
    }

    /// Number of drawn combinations one staked number is checked against
    ///
    /// This is the per-station multiplier in the stake formula and must match
    /// the tier pool the verification matcher extracts. Returns `None` when
    /// the digit count is not allowed for this kind.
    pub fn combination_count(&self, region: Region, digits: usize) -> Option<u32> {
        if !self.allowed_digits().contains(&digits) {
            return None;
        }
        let north = region == Region::North;
        let count = match self {
            BetKind::Dau => {
                if north {
                    4
                } else {
                    1
                }
            }
            BetKind::Duoi => 1,
            BetKind::DauDuoi => {
                if north {
                    5
                } else {
                    2
                }
            }
            BetKind::XiuChu => {
                if north {
                    4
                } else {
                    2
                }
            }
            BetKind::XiuChuDau => {
                if north {
                    3
                } else {
                    1
                }
            }
            BetKind::XiuChuDuoi => 1,
            BetKind::BaoLo | BetKind::BaoDao => match (digits, north) {
                (2, false) => 18,
                (2, true) => 27,
                (3, false) => 17,
                (3, true) => 23,
                (4, false) => 16,
                (4, true) => 20,
                _ => return None,
            },
            // The pair factor is carried by C(n,2) in the stake formula
            BetKind::Da => 1,
            BetKind::Dao => {
                if north {
                    4
                } else {
                    2
                }
            }
        };
        Some(count)
    }

    /// Payout rate per unit staked
    pub fn payout_rate(&self, _region: Region, digits: usize, station_count: usize) -> f64 {
        match self {
            BetKind::DauDuoi | BetKind::Dau | BetKind::Duoi => 75.0,
            BetKind::XiuChu | BetKind::XiuChuDau | BetKind::XiuChuDuoi | BetKind::Dao => 650.0,
            BetKind::BaoLo | BetKind::BaoDao => match digits {
                3 => 650.0,
                4 => 5500.0,
                _ => 75.0,
            },
            BetKind::Da => {
                if station_count >= 2 {
                    550.0
                } else {
                    750.0
                }
            }
        }
    }
}

impl fmt::Display for BetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
