//! Small numeric helpers shared by every drill generator.

use rand::Rng;

use crate::drill_engine::difficulty::NumericRange;

/// Tolerance used when deciding whether an `f64` holds an integer.
pub const INTEGRAL_EPSILON: f64 = 1e-9;

/// Uniform integer in `range`, both ends inclusive.
pub fn random_int<R: Rng>(rng: &mut R, range: NumericRange) -> i64 {
    rng.gen_range(range.min..=range.max)
}

/// Weighted magnitude pool over `range` with 2 through 5 listed twice.
///
/// With `1..=10` this is `[1, 2, 2, 3, 3, 4, 4, 5, 5, 6, 7, 8, 9, 10]`.
pub fn term_pool(range: NumericRange) -> Vec<i64> {
    let mut pool = Vec::new();
    for n in range.min.max(1)..=range.max.max(1) {
        pool.push(n);
        if (2..=5).contains(&n) {
            pool.push(n);
        }
    }
    pool
}

/// Draw a magnitude from `pool` and negate it half of the time.
pub fn signed_term<R: Rng>(rng: &mut R, pool: &[i64]) -> i64 {
    let magnitude = pool[rng.gen_range(0..pool.len())];
    if rng.gen_bool(0.5) { -magnitude } else { magnitude }
}

/// Every `i` in `2..=n` that divides `n`, or `[1, n]` when there is none.
///
/// The fallback keeps the pool non-empty; callers must still reject `n == 0`
/// since the fallback would then offer a zero divisor.
pub fn even_factors(n: u64) -> Vec<u64> {
    let factors: Vec<u64> = (2..=n).filter(|i| n % i == 0).collect();
    if factors.is_empty() {
        return vec![1, n];
    }
    factors
}

/// Collapse `+ -` into `- ` and `- -` into `+ ` in rendered text.
pub fn normalize_signs(text: &str) -> String {
    text.replace("+ -", "- ").replace("- -", "+ ")
}

pub fn is_integral(value: f64) -> bool {
    value.is_finite() && (value - value.round()).abs() < INTEGRAL_EPSILON
}

/// Integer text for integral values, two decimals otherwise.
pub fn format_truth(value: f64) -> String {
    if is_integral(value) {
        format!("{}", value.round() as i64)
    } else {
        format!("{:.2}", value)
    }
}

/// Escape the characters HTML treats specially.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _   => out.push(ch),
        }
    }
    out
}
