use crate::KbError;

/// Scalar type for every model quantity.
pub type Real = f64;

/// Absolute and relative slack for float comparisons.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Tolerances {
    pub const fn new(abs: Real, rel: Real) -> Self {
        Self { abs, rel }
    }

    /// Slack for values that went through an inverse calculation or a text round trip.
    pub const fn loose() -> Self {
        Self::new(1e-6, 1e-9)
    }
}

impl Default for Tolerances {
    fn default() -> Self {
        Self::new(1e-12, 1e-9)
    }
}

/// True when `a` and `b` differ by at most `tol.abs`, or by `tol.rel` of the larger magnitude.
pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    diff <= tol.abs || diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, KbError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(KbError::NonFinite { what, value: v })
    }
}

/// Round to a fixed number of decimal places, the way readings are displayed and stored.
pub fn round_to(v: Real, decimals: i32) -> Real {
    let scale = 10f64.powi(decimals);
    (v * scale).round() / scale
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn nearly_equal_is_symmetric(a in -1e6_f64..1e6, b in -1e6_f64..1e6) {
            let tol = Tolerances::loose();
            prop_assert_eq!(nearly_equal(a, b, tol), nearly_equal(b, a, tol));
        }

        #[test]
        fn round_to_stays_within_half_a_step(v in -1e4_f64..1e4, decimals in 0_i32..4) {
            let step = 10f64.powi(-decimals);
            let rounded = round_to(v, decimals);
            prop_assert!((rounded - v).abs() <= step / 2.0 + 1e-9);
        }

        #[test]
        fn round_to_is_idempotent(v in -1e4_f64..1e4, decimals in 0_i32..4) {
            let once = round_to(v, decimals);
            prop_assert!(nearly_equal(round_to(once, decimals), once, Tolerances::loose()));
        }
    }
}
