//! Static reference tables
//!
//! Read-only catalogs consumed by the parser, validators, calculators and the
//! verification matcher: the station roster with its weekly draw schedule,
//! the closed set of bet types with their combinatorics and payout rates, and
//! the special number-set keywords.

mod bet_types;
mod keywords;
mod stations;

pub use bet_types::BetKind;
pub use keywords::{expand_keyword, is_keyword};
pub use stations::{
    find_station, is_scheduled, region_from_alias, stations_on, stations_per_day, StationRecord,
    NORTH_STATION, STATIONS,
};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lottery macro-region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    North,
    Central,
    South,
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Region::North => "north",
            Region::Central => "central",
            Region::South => "south",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_display() {
        assert_eq!(Region::North.to_string(), "north");
        assert_eq!(Region::South.to_string(), "south");
    }

    #[test]
    fn test_region_serde_roundtrip() {
        let json = serde_json::to_string(&Region::Central).unwrap();
        assert_eq!(json, "\"central\"");
        let back: Region = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Region::Central);
    }
}
