//! Station resolution for the first line of a bet code
//!
//! Matching order: exact alias, `{count}{region}` multi-station pattern,
//! bare region abbreviation, dot-joined station list, and finally a greedy
//! split of two aliases written back-to-back. Schedule compatibility is a
//! detector concern, so resolution itself needs no date.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::catalog::{self, Region, NORTH_STATION};
use crate::error::StationError;
use crate::models::{Station, StationRef};

static MULTI_REGION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)([a-z]+)$").unwrap());

/// Resolve a normalized station line
pub fn resolve_station(line: &str) -> Result<Station, StationError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(StationError::Unresolved(line.to_string()));
    }

    // (a) single station alias
    if let Some(record) = catalog::find_station(line) {
        return Ok(Station::Single {
            name: record.name.to_string(),
            region: record.region,
        });
    }

    // (b) {count}{region} pattern, e.g. "2dmn"
    if let Some(caps) = MULTI_REGION.captures(line) {
        if let Some(region) = catalog::region_from_alias(&caps[2]) {
            let count: usize = caps[1].parse().unwrap_or(0);
            if count == 0 {
                return Err(StationError::ZeroCount);
            }
            return Ok(multi_station(region, count));
        }
    }

    // (c) bare region abbreviation defaults to one station
    if let Some(region) = catalog::region_from_alias(line) {
        return Ok(multi_station(region, 1));
    }

    // (d) dot-joined list of aliases
    if line.contains('.') {
        return resolve_list(line);
    }

    // (e) two aliases concatenated with no separator, greedy split
    for split in (1..line.len()).rev() {
        if !line.is_char_boundary(split) {
            continue;
        }
        let (head, tail) = line.split_at(split);
        if let (Some(a), Some(b)) = (catalog::find_station(head), catalog::find_station(tail)) {
            if a.region != b.region {
                return Err(StationError::MixedRegions(a.region, b.region));
            }
            return Ok(Station::List {
                stations: vec![
                    StationRef {
                        name: a.name.to_string(),
                        region: a.region,
                    },
                    StationRef {
                        name: b.name.to_string(),
                        region: b.region,
                    },
                ],
            });
        }
    }

    Err(StationError::Unresolved(line.to_string()))
}

fn resolve_list(line: &str) -> Result<Station, StationError> {
    let mut stations = Vec::new();
    for token in line.split('.').filter(|t| !t.is_empty()) {
        match catalog::find_station(token) {
            Some(record) => stations.push(StationRef {
                name: record.name.to_string(),
                region: record.region,
            }),
            None => return Err(StationError::Unresolved(token.to_string())),
        }
    }
    if stations.is_empty() {
        return Err(StationError::Unresolved(line.to_string()));
    }
    let region = stations[0].region;
    if let Some(other) = stations.iter().find(|s| s.region != region) {
        return Err(StationError::MixedRegions(region, other.region));
    }
    if stations.len() == 1 {
        let only = stations.remove(0);
        return Ok(Station::Single {
            name: only.name,
            region: only.region,
        });
    }
    Ok(Station::List { stations })
}

fn multi_station(region: Region, count: usize) -> Station {
    // The north has a single combined draw, so a bare "mb" is that station
    if region == Region::North && count == 1 {
        Station::Single {
            name: NORTH_STATION.to_string(),
            region,
        }
    } else {
        Station::MultiRegion { region, count }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_alias() {
        let station = resolve_station("mb").unwrap();
        assert_eq!(
            station,
            Station::Single {
                name: NORTH_STATION.to_string(),
                region: Region::North
            }
        );

        let station = resolve_station("tg").unwrap();
        assert_eq!(
            station,
            Station::Single {
                name: "Tiền Giang".to_string(),
                region: Region::South
            }
        );
    }

    #[test]
    fn test_multi_region_pattern() {
        assert_eq!(
            resolve_station("2dmn").unwrap(),
            Station::MultiRegion {
                region: Region::South,
                count: 2
            }
        );
        assert_eq!(
            resolve_station("3mt").unwrap(),
            Station::MultiRegion {
                region: Region::Central,
                count: 3
            }
        );
        assert_eq!(resolve_station("0dmn"), Err(StationError::ZeroCount));
    }

    #[test]
    fn test_bare_region_defaults_to_one() {
        assert_eq!(
            resolve_station("dmn").unwrap(),
            Station::MultiRegion {
                region: Region::South,
                count: 1
            }
        );
        // "mb" resolves as the single northern station before the region rule
        assert!(matches!(
            resolve_station("mienbac").unwrap(),
            Station::Single { .. }
        ));
    }

    #[test]
    fn test_station_list() {
        let station = resolve_station("vl.ct").unwrap();
        match station {
            Station::List { stations } => {
                assert_eq!(stations.len(), 2);
                assert_eq!(stations[0].name, "Vĩnh Long");
                assert_eq!(stations[1].name, "Cần Thơ");
            }
            other => panic!("expected list, got {:?}", other),
        }
    }

    #[test]
    fn test_mixed_region_list_rejected() {
        assert_eq!(
            resolve_station("vl.hue"),
            Err(StationError::MixedRegions(Region::South, Region::Central))
        );
    }

    #[test]
    fn test_concatenated_aliases() {
        let station = resolve_station("vlct").unwrap();
        match station {
            Station::List { stations } => {
                assert_eq!(stations[0].name, "Vĩnh Long");
                assert_eq!(stations[1].name, "Cần Thơ");
            }
            other => panic!("expected list, got {:?}", other),
        }
    }

    #[test]
    fn test_unresolved() {
        assert!(matches!(
            resolve_station("zzz"),
            Err(StationError::Unresolved(_))
        ));
        assert!(matches!(
            resolve_station(""),
            Err(StationError::Unresolved(_))
        ));
    }
}
