//! Special number-set keywords
//!
//! Shorthand like `tai` or `chanchan` expands to a fixed, closed-form set of
//! two-digit numbers. These are lookup generators, not parsing rules.

/// Whether a token is a recognized number-set keyword
pub fn is_keyword(token: &str) -> bool {
    matches!(
        token,
        "tai" | "xiu" | "chan" | "le" | "chanchan" | "lele" | "chanle" | "lechan"
    )
}

/// Expand a keyword into its number set (zero-padded two-digit strings)
pub fn expand_keyword(token: &str) -> Option<Vec<String>> {
    let numbers: Vec<u8> = match token {
        // tài: 50-99
        "tai" => (50..=99).collect(),
        // xỉu: 00-49
        "xiu" => (0..=49).collect(),
        // chẵn: even 00-98
        "chan" => (0..=98).step_by(2).collect(),
        // lẻ: odd 01-99
        "le" => (1..=99).step_by(2).collect(),
        // parity of each digit position
        "chanchan" => parity_pairs(0, 0),
        "lele" => parity_pairs(1, 1),
        "chanle" => parity_pairs(0, 1),
        "lechan" => parity_pairs(1, 0),
        _ => return None,
    };
    Some(numbers.iter().map(|n| format!("{:02}", n)).collect())
}

fn parity_pairs(tens_parity: u8, units_parity: u8) -> Vec<u8> {
    (0..=99u8)
        .filter(|n| (n / 10) % 2 == tens_parity && n % 2 == units_parity)
        .collect()
}
