use crate::error::TypesError;
use std::fmt;
use std::iter::Sum;
use std::str::FromStr;

/// Denominator for basis-point fee math (10_000 = 100%).
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Fungible credit amount.
///
/// Credits are indivisible units; there is no fractional denomination.
/// Arithmetic never wraps: callers get `Option`/`Result` from the
/// checked operations and must surface underflow/overflow themselves.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Credits(u64);

impl Credits {
    pub const ZERO: Self = Self(0);
    pub const MAX: Self = Self(u64::MAX);

    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(&self) -> u64 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition
    pub fn checked_add(&self, rhs: Credits) -> Option<Credits> {
        self.0.checked_add(rhs.0).map(Credits)
    }

    /// Checked subtraction
    pub fn checked_sub(&self, rhs: Credits) -> Option<Credits> {
        self.0.checked_sub(rhs.0).map(Credits)
    }

    /// Subtraction floored at zero
    pub fn saturating_sub(&self, rhs: Credits) -> Credits {
        Credits(self.0.saturating_sub(rhs.0))
    }

    /// Saturating addition
    pub fn saturating_add(&self, rhs: Credits) -> Credits {
        Credits(self.0.saturating_add(rhs.0))
    }

    /// The smaller of two amounts
    pub fn min(&self, rhs: Credits) -> Credits {
        Credits(self.0.min(rhs.0))
    }

    /// Basis-point share of this amount, floor division.
    ///
    /// `Credits::new(300).bps(500)` is 5% of 300 = 15. The intermediate
    /// product is computed in u128 so the full u64 range is usable.
    pub fn bps(&self, bps: u16) -> Credits {
        let product = self.0 as u128 * bps as u128;
        Credits((product / BPS_DENOMINATOR as u128) as u64)
    }

    /// `floor(self * numerator / denominator)` with a u128 intermediate.
    ///
    /// Returns `None` when the denominator is zero or the result does
    /// not fit in u64.
    pub fn mul_div(&self, numerator: Credits, denominator: Credits) -> Option<Credits> {
        if denominator.is_zero() {
            return None;
        }
        let product = self.0 as u128 * numerator.0 as u128;
        u64::try_from(product / denominator.0 as u128)
            .ok()
            .map(Credits)
    }

    /// Signed representation for settlement outcome deltas.
    pub const fn as_signed(&self) -> i128 {
        self.0 as i128
    }
}

impl Sum for Credits {
    fn sum<I: Iterator<Item = Credits>>(iter: I) -> Self {
        iter.fold(Credits::ZERO, |acc, c| acc.saturating_add(c))
    }
}

impl fmt::Display for Credits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Credits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credits({})", self.0)
    }
}

impl FromStr for Credits {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>()
            .map(Credits)
            .map_err(|e| TypesError::InvalidAmount(e.to_string()))
    }
}

impl From<u64> for Credits {
    fn from(value: u64) -> Self {
        Credits(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_checked_arithmetic() {
        let a = Credits::new(100);
        let b = Credits::new(30);

        assert_eq!(a.checked_add(b), Some(Credits::new(130)));
        assert_eq!(a.checked_sub(b), Some(Credits::new(70)));
        assert_eq!(b.checked_sub(a), None);
        assert_eq!(Credits::MAX.checked_add(Credits::new(1)), None);
    }

    #[test]
    fn test_saturating_sub_floors_at_zero() {
        assert_eq!(
            Credits::new(10).saturating_sub(Credits::new(25)),
            Credits::ZERO
        );
        assert_eq!(
            Credits::new(25).saturating_sub(Credits::new(10)),
            Credits::new(15)
        );
    }

    #[test]
    fn test_bps_floor_division() {
        // 5% of 300 = 15
        assert_eq!(Credits::new(300).bps(500), Credits::new(15));
        // 90% of 300 = 270
        assert_eq!(Credits::new(300).bps(9000), Credits::new(270));
        // 3% of 100 = 3
        assert_eq!(Credits::new(100).bps(300), Credits::new(3));
        // Floor: 5% of 99 = 4, not 4.95
        assert_eq!(Credits::new(99).bps(500), Credits::new(4));
        // No overflow at the top of the range
        assert_eq!(Credits::MAX.bps(10_000), Credits::MAX);
    }

    #[test]
    fn test_mul_div() {
        // 200 * 270 / 200 = 270
        assert_eq!(
            Credits::new(200).mul_div(Credits::new(270), Credits::new(200)),
            Some(Credits::new(270))
        );
        // Floors
        assert_eq!(
            Credits::new(7).mul_div(Credits::new(10), Credits::new(3)),
            Some(Credits::new(23))
        );
        // Division by zero
        assert_eq!(
            Credits::new(7).mul_div(Credits::new(10), Credits::ZERO),
            None
        );
    }

    #[test]
    fn test_display_parse_roundtrip() {
        let c = Credits::new(123_456);
        let parsed: Credits = c.to_string().parse().unwrap();
        assert_eq!(c, parsed);
        assert!("not-a-number".parse::<Credits>().is_err());
    }

    proptest! {
        #[test]
        fn prop_bps_never_exceeds_whole(value in 0u64.., bps in 0u16..=10_000) {
            let c = Credits::new(value);
            prop_assert!(c.bps(bps) <= c);
        }

        #[test]
        fn prop_saturating_sub_never_underflows(a in 0u64.., b in 0u64..) {
            let diff = Credits::new(a).saturating_sub(Credits::new(b));
            prop_assert!(diff.value() <= a);
        }
    }
}
