//! Normalized comparison of values and footprints.

use serde::{Deserialize, Serialize};

/// Characters ignored by [`normalize`] in addition to whitespace.
const IGNORED: &[char] = &['.', ',', '_', '-'];

/// Lowercase and drop whitespace and `.,_-`.
pub fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace() && !IGNORED.contains(c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Footprint name without its `Library:` prefix.
pub fn bare_footprint(footprint: &str) -> &str {
    footprint.rsplit(':').next().unwrap_or(footprint)
}

/// How declared and catalog attributes are compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchPolicy {
    /// Normalized text equality only.
    #[default]
    Strict,
    /// Strict, plus engineering-notation values (`4k7` = `4.7k`) and
    /// footprints that contain the expected package (`R_0402_1005Metric`
    /// matches `0402`).
    Lenient,
}

impl MatchPolicy {
    pub fn values_match(&self, declared: &str, expected: &str) -> bool {
        if normalize(declared) == normalize(expected) {
            return true;
        }
        match self {
            MatchPolicy::Strict => false,
            MatchPolicy::Lenient => match (resolve_value(declared), resolve_value(expected)) {
                (Some(a), Some(b)) => approx_eq(a, b),
                _ => false,
            },
        }
    }

    /// Both operands are compared without their `Library:` prefix.
    pub fn footprints_match(&self, declared: &str, expected: &str) -> bool {
        let declared = normalize(bare_footprint(declared));
        let expected = normalize(bare_footprint(expected));
        match self {
            MatchPolicy::Strict => declared == expected,
            MatchPolicy::Lenient => !expected.is_empty() && declared.contains(&expected),
        }
    }
}

fn magnitude(c: char) -> Option<i32> {
    match c {
        'p' => Some(-12),
        'n' => Some(-9),
        'u' | 'µ' | 'μ' => Some(-6),
        'm' => Some(-3),
        'R' | 'r' => Some(0),
        'k' | 'K' => Some(3),
        'M' => Some(6),
        'G' => Some(9),
        _ => None,
    }
}

/// Resolve a value such as `100nF`, `4k7` or `2,2uF` to a plain number.
///
/// Only the first whitespace-separated token is read and it must start
/// with a digit. The first magnitude letter scales the result and, like a
/// decimal point, splits integer and fractional digits.
pub fn resolve_value(value: &str) -> Option<f64> {
    let token = value.split_whitespace().next()?;
    if !token.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }

    let mut number = String::new();
    let mut exponent = None;
    let mut has_point = false;

    for c in token.chars() {
        if c.is_ascii_digit() {
            number.push(c);
        } else if c == '.' || c == ',' {
            if !has_point {
                number.push('.');
                has_point = true;
            }
        } else if let Some(mag) = magnitude(c) {
            if exponent.is_none() {
                exponent = Some(mag);
                if !has_point {
                    number.push('.');
                    has_point = true;
                }
            }
        }
    }

    let base: f64 = number.parse().ok()?;
    Some(base * 10f64.powi(exponent.unwrap_or(0)))
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs())
}
