//! Station catalog and weekly draw schedule
//!
//! Names carry their Vietnamese diacritics; aliases are the plain-ASCII
//! shorthand bettors actually type. The northern draw is a single combined
//! station that runs every day; southern and central provinces rotate on a
//! fixed weekly schedule.

use super::Region;
use chrono::Weekday;

/// One station in the reference catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StationRecord {
    pub name: &'static str,
    pub region: Region,
    pub aliases: &'static [&'static str],
}

/// Canonical name of the combined northern draw
pub const NORTH_STATION: &str = "Miền Bắc";

/// Full station roster
pub const STATIONS: &[StationRecord] = &[
    StationRecord {
        name: NORTH_STATION,
        region: Region::North,
        aliases: &["mb", "mienbac", "hn", "hanoi"],
    },
    // South
    StationRecord {
        name: "TP.HCM",
        region: Region::South,
        aliases: &["tp", "hcm", "tphcm"],
    },
    StationRecord {
        name: "Đồng Tháp",
        region: Region::South,
        aliases: &["dt", "dthap"],
    },
    StationRecord {
        name: "Cà Mau",
        region: Region::South,
        aliases: &["cm", "cmau"],
    },
    StationRecord {
        name: "Bến Tre",
        region: Region::South,
        aliases: &["bt", "bentre"],
    },
    StationRecord {
        name: "Vũng Tàu",
        region: Region::South,
        aliases: &["vt", "vtau"],
    },
    StationRecord {
        name: "Bạc Liêu",
        region: Region::South,
        aliases: &["bl", "blieu"],
    },
    StationRecord {
        name: "Đồng Nai",
        region: Region::South,
        aliases: &["dn", "dnai"],
    },
    StationRecord {
        name: "Cần Thơ",
        region: Region::South,
        aliases: &["ct", "cantho"],
    },
    StationRecord {
        name: "Sóc Trăng",
        region: Region::South,
        aliases: &["st", "strang"],
    },
    StationRecord {
        name: "Tây Ninh",
        region: Region::South,
        aliases: &["tn", "tninh"],
    },
    StationRecord {
        name: "An Giang",
        region: Region::South,
        aliases: &["ag", "agiang"],
    },
    StationRecord {
        name: "Bình Thuận",
        region: Region::South,
        aliases: &["bth", "bthuan"],
    },
    StationRecord {
        name: "Vĩnh Long",
        region: Region::South,
        aliases: &["vl", "vlong"],
    },
    StationRecord {
        name: "Bình Dương",
        region: Region::South,
        aliases: &["bd", "bduong"],
    },
    StationRecord {
        name: "Trà Vinh",
        region: Region::South,
        aliases: &["tv", "tvinh"],
    },
    StationRecord {
        name: "Long An",
        region: Region::South,
        aliases: &["la", "longan"],
    },
    StationRecord {
        name: "Bình Phước",
        region: Region::South,
        aliases: &["bp", "bphuoc"],
    },
    StationRecord {
        name: "Hậu Giang",
        region: Region::South,
        aliases: &["hg", "hgiang"],
    },
    StationRecord {
        name: "Tiền Giang",
        region: Region::South,
        aliases: &["tg", "tgiang"],
    },
    StationRecord {
        name: "Kiên Giang",
        region: Region::South,
        aliases: &["kg", "kgiang"],
    },
    StationRecord {
        name: "Đà Lạt",
        region: Region::South,
        aliases: &["dl", "dalat"],
    },
    // Central
    StationRecord {
        name: "Thừa Thiên Huế",
        region: Region::Central,
        aliases: &["hue", "tth"],
    },
    StationRecord {
        name: "Phú Yên",
        region: Region::Central,
        aliases: &["py", "pyen"],
    },
    StationRecord {
        name: "Đắk Lắk",
        region: Region::Central,
        aliases: &["dlk", "daklak"],
    },
    StationRecord {
        name: "Quảng Nam",
        region: Region::Central,
        aliases: &["qnam", "qn"],
    },
    StationRecord {
        name: "Đà Nẵng",
        region: Region::Central,
        aliases: &["dng", "danang"],
    },
    StationRecord {
        name: "Khánh Hòa",
        region: Region::Central,
        aliases: &["kh", "khoa"],
    },
    StationRecord {
        name: "Bình Định",
        region: Region::Central,
        aliases: &["bdi", "bdinh"],
    },
    StationRecord {
        name: "Quảng Trị",
        region: Region::Central,
        aliases: &["qt", "qtri"],
    },
    StationRecord {
        name: "Quảng Bình",
        region: Region::Central,
        aliases: &["qb", "qbinh"],
    },
    StationRecord {
        name: "Gia Lai",
        region: Region::Central,
        aliases: &["gl", "glai"],
    },
    StationRecord {
        name: "Ninh Thuận",
        region: Region::Central,
        aliases: &["nt", "nthuan"],
    },
    StationRecord {
        name: "Quảng Ngãi",
        region: Region::Central,
        aliases: &["qng", "qngai"],
    },
    StationRecord {
        name: "Đắk Nông",
        region: Region::Central,
        aliases: &["dno", "dnong"],
    },
    StationRecord {
        name: "Kon Tum",
        region: Region::Central,
        aliases: &["kt", "ktum"],
    },
];

/// Look up a station by ASCII alias (exact match, lowercase input expected)
pub fn find_station(alias: &str) -> Option<&'static StationRecord> {
    STATIONS
        .iter()
        .find(|s| s.aliases.contains(&alias) || s.name.eq_ignore_ascii_case(alias))
}

/// Resolve a bare region abbreviation
pub fn region_from_alias(alias: &str) -> Option<Region> {
    match alias {
        "mb" | "mienbac" | "db" => Some(Region::North),
        "mt" | "dmt" | "mtrung" | "mientrung" => Some(Region::Central),
        "mn" | "dmn" | "mnam" | "miennam" => Some(Region::South),
        _ => None,
    }
}

/// Station names drawing in `region` on `weekday`
pub fn stations_on(region: Region, weekday: Weekday) -> &'static [&'static str] {
    use Weekday::*;
    match region {
        Region::North => &[NORTH_STATION],
        Region::South => match weekday {
            Mon => &["TP.HCM", "Đồng Tháp", "Cà Mau"],
            Tue => &["Bến Tre", "Vũng Tàu", "Bạc Liêu"],
            Wed => &["Đồng Nai", "Cần Thơ", "Sóc Trăng"],
            Thu => &["Tây Ninh", "An Giang", "Bình Thuận"],
            Fri => &["Vĩnh Long", "Bình Dương", "Trà Vinh"],
            Sat => &["TP.HCM", "Long An", "Bình Phước", "Hậu Giang"],
            Sun => &["Tiền Giang", "Kiên Giang", "Đà Lạt"],
        },
        Region::Central => match weekday {
            Mon => &["Thừa Thiên Huế", "Phú Yên"],
            Tue => &["Đắk Lắk", "Quảng Nam"],
            Wed => &["Đà Nẵng", "Khánh Hòa"],
            Thu => &["Bình Định", "Quảng Trị", "Quảng Bình"],
            Fri => &["Gia Lai", "Ninh Thuận"],
            Sat => &["Đà Nẵng", "Quảng Ngãi", "Đắk Nông"],
            Sun => &["Kon Tum", "Khánh Hòa", "Thừa Thiên Huế"],
        },
    }
}

/// Maximum number of stations drawing in `region` on `weekday`
pub fn stations_per_day(region: Region, weekday: Weekday) -> usize {
    stations_on(region, weekday).len()
}

/// Whether a station draws on the given weekday
pub fn is_scheduled(name: &str, region: Region, weekday: Weekday) -> bool {
    stations_on(region, weekday).contains(&name)
}
