//! Numeric comparisons across integer, float and arbitrary precision representations.
//!
//! Integers that fit into `u64` / `i64` are compared exactly. Numbers with more significant
//! digits than `f64` can carry, or outside its range, are promoted to `BigDecimal`.
use bigdecimal::BigDecimal;
use num_cmp::NumCmp;
use once_cell::sync::Lazy;
use serde_json::Number;
use std::{cmp::Ordering, str::FromStr};

/// `f64` keeps about 15 significant decimal digits.
const MAX_FLOAT_DIGITS: usize = 15;
/// Tolerance for `multipleOf` remainders.
const EPSILON: f64 = 1.1920929e-7;
static BIG_EPSILON: Lazy<BigDecimal> =
    Lazy::new(|| BigDecimal::from_str("1.1920929e-7").expect("Is a valid decimal"));

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Numeric {
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Big(BigDecimal),
}

impl Numeric {
    pub(crate) fn new(number: &Number) -> Numeric {
        if let Some(value) = number.as_u64() {
            return Numeric::Unsigned(value);
        }
        if let Some(value) = number.as_i64() {
            return Numeric::Signed(value);
        }
        let text = number.to_string();
        match number.as_f64() {
            Some(value) if value.is_finite() && significant_digits(&text) <= MAX_FLOAT_DIGITS => {
                Numeric::Float(value)
            }
            fallback => BigDecimal::from_str(&text)
                .map(Numeric::Big)
                .unwrap_or_else(|_| Numeric::Float(fallback.unwrap_or(f64::NAN))),
        }
    }

    fn to_big(&self) -> Option<BigDecimal> {
        match self {
            Numeric::Unsigned(value) => Some(BigDecimal::from(*value)),
            Numeric::Signed(value) => Some(BigDecimal::from(*value)),
            // The shortest representation keeps `0.1` as `0.1` rather than its binary expansion
            Numeric::Float(value) => BigDecimal::from_str(&value.to_string()).ok(),
            Numeric::Big(value) => Some(value.clone()),
        }
    }

    fn as_f64(&self) -> f64 {
        match self {
            Numeric::Unsigned(value) => *value as f64,
            Numeric::Signed(value) => *value as f64,
            Numeric::Float(value) => *value,
            Numeric::Big(value) => value.to_string().parse().unwrap_or(f64::NAN),
        }
    }

    pub(crate) fn is_integer(&self) -> bool {
        match self {
            Numeric::Unsigned(_) | Numeric::Signed(_) => true,
            Numeric::Float(value) => value.is_finite() && value.fract() == 0.0,
            Numeric::Big(value) => value.with_scale(0) == *value,
        }
    }
}

fn significant_digits(text: &str) -> usize {
    let mantissa = text.split(['e', 'E']).next().unwrap_or(text);
    mantissa
        .chars()
        .filter(char::is_ascii_digit)
        .skip_while(|digit| *digit == '0')
        .count()
}

fn compare_with<T>(left: T, right: &Numeric) -> Option<Ordering>
where
    T: NumCmp<u64> + NumCmp<i64> + NumCmp<f64>,
{
    match right {
        Numeric::Unsigned(value) => <T as NumCmp<u64>>::num_cmp(left, *value),
        Numeric::Signed(value) => <T as NumCmp<i64>>::num_cmp(left, *value),
        Numeric::Float(value) => <T as NumCmp<f64>>::num_cmp(left, *value),
        Numeric::Big(_) => None,
    }
}

/// Order two numbers. `None` if either of them is NaN.
pub(crate) fn compare(left: &Numeric, right: &Numeric) -> Option<Ordering> {
    match (left, right) {
        (Numeric::Big(_), _) | (_, Numeric::Big(_)) => {
            left.to_big()?.partial_cmp(&right.to_big()?)
        }
        (Numeric::Unsigned(value), _) => compare_with(*value, right),
        (Numeric::Signed(value), _) => compare_with(*value, right),
        (Numeric::Float(value), _) => compare_with(*value, right),
    }
}

pub(crate) fn equal(left: &Number, right: &Number) -> bool {
    compare(&Numeric::new(left), &Numeric::new(right)) == Some(Ordering::Equal)
}

/// Whether `value` is a multiple of `divisor`.
///
/// Non-integer cases tolerate a remainder within `EPSILON` of either zero or the divisor.
pub(crate) fn is_multiple_of(value: &Numeric, divisor: &Numeric) -> bool {
    match (value, divisor) {
        (Numeric::Big(_), _) | (_, Numeric::Big(_)) => {
            let (Some(value), Some(divisor)) = (value.to_big(), divisor.to_big()) else {
                return false;
            };
            if divisor == BigDecimal::from(0) {
                return false;
            }
            let remainder = (value % divisor.clone()).abs();
            !(remainder > *BIG_EPSILON && divisor.abs() - remainder > *BIG_EPSILON)
        }
        (
            Numeric::Unsigned(_) | Numeric::Signed(_),
            Numeric::Unsigned(_) | Numeric::Signed(_),
        ) => {
            let (value, divisor) = (as_i128(value), as_i128(divisor));
            divisor != 0 && value % divisor == 0
        }
        _ => {
            let (value, divisor) = (value.as_f64(), divisor.as_f64());
            if divisor == 0.0 || !value.is_finite() || !divisor.is_finite() {
                return false;
            }
            let remainder = (value % divisor).abs();
            !(remainder > EPSILON && divisor.abs() - remainder > EPSILON)
        }
    }
}

fn as_i128(value: &Numeric) -> i128 {
    match value {
        Numeric::Unsigned(value) => i128::from(*value),
        Numeric::Signed(value) => i128::from(*value),
        Numeric::Float(value) => *value as i128,
        Numeric::Big(_) => 0,
    }
}
