//! Combinatoric helpers for stake and prize formulas

/// Unordered pair count `C(n, 2)`
///
/// # Examples
/// ```
/// use betcode::calc::pair_count;
/// assert_eq!(pair_count(3), 3);
/// assert_eq!(pair_count(4), 6);
/// ```
pub fn pair_count(n: usize) -> u64 {
    let n = n as u64;
    n.saturating_mul(n.saturating_sub(1)) / 2
}

/// Number of distinct digit permutations of a number string
///
/// Repeated digits collapse: `"112"` has 3 distinct permutations, not 6.
///
/// # Examples
/// ```
/// use betcode::calc::distinct_permutations;
/// assert_eq!(distinct_permutations("123"), 6);
/// assert_eq!(distinct_permutations("112"), 3);
/// assert_eq!(distinct_permutations("111"), 1);
/// ```
pub fn distinct_permutations(number: &str) -> u64 {
    let mut counts = [0u64; 10];
    let mut len = 0u64;
    for c in number.chars().filter(|c| c.is_ascii_digit()) {
        counts[(c as u8 - b'0') as usize] += 1;
        len += 1;
    }
    let mut result = factorial(len);
    for count in counts {
        result /= factorial(count);
    }
    result
}

/// All distinct digit permutations of a number string, as strings
///
/// Used by the verification matcher; bet numbers are at most 4 digits so
/// the output is tiny.
pub fn permutations_of(number: &str) -> Vec<String> {
    let mut digits: Vec<char> = number.chars().collect();
    digits.sort_unstable();
    let mut out = Vec::new();
    permute(&mut digits, 0, &mut out);
    out.sort_unstable();
    out.dedup();
    out
}

fn permute(digits: &mut Vec<char>, start: usize, out: &mut Vec<String>) {
    if start == digits.len() {
        out.push(digits.iter().collect());
        return;
    }
    for i in start..digits.len() {
        digits.swap(start, i);
        permute(digits, start + 1, out);
        digits.swap(start, i);
    }
}

fn factorial(n: u64) -> u64 {
    (1..=n).product::<u64>().max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_count() {
        assert_eq!(pair_count(0), 0);
        assert_eq!(pair_count(1), 0);
        assert_eq!(pair_count(2), 1);
        assert_eq!(pair_count(3), 3);
        assert_eq!(pair_count(5), 10);
    }

    #[test]
    fn test_distinct_permutations() {
        assert_eq!(distinct_permutations("12"), 2);
        assert_eq!(distinct_permutations("11"), 1);
        assert_eq!(distinct_permutations("123"), 6);
        assert_eq!(distinct_permutations("112"), 3);
        assert_eq!(distinct_permutations("1111"), 1);
        assert_eq!(distinct_permutations("1234"), 24);
    }

    #[test]
    fn test_permutations_of() {
        let perms = permutations_of("112");
        assert_eq!(perms, vec!["112", "121", "211"]);
        assert_eq!(permutations_of("12").len(), 2);
        assert_eq!(permutations_of("777"), vec!["777"]);
    }

    #[test]
    fn test_permutation_count_matches_list() {
        for number in ["12", "112", "123", "1122", "1234"] {
            assert_eq!(
                distinct_permutations(number) as usize,
                permutations_of(number).len()
            );
        }
    }
}
