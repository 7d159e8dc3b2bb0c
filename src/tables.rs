//! Tabulated factorials and unit-ball volumes.
//!
//! The volume recurrence `V_i = V_{i-2} · 2π/i` (with `V_0 = 1`, `V_1 = 2`)
//! and the factorial recurrence are evaluated directly in the scalar backend,
//! seeded by the backend's own π constant, so each entry is correct at the
//! active precision. On the `f64` backend the factorials saturate to ∞ past
//! `170!`; the MPFR backend covers the full table.

use crate::scalar::Scalar;

/// Table of `i!` for `i` in `[0, len)`.
pub fn factorial_table<F: Scalar>(len: usize) -> Vec<F> {
    let mut table: Vec<F> = Vec::with_capacity(len);
    for i in 0..len {
        let entry = if i == 0 {
            F::one()
        } else {
            table[i - 1].clone() * F::from_f64(i as f64)
        };
        table.push(entry);
    }
    table
}

/// Table of the volume of the unit `i`-dimensional Euclidean ball for `i`
/// in `[0, len)`.
pub fn unit_ball_volume_table<F: Scalar>(len: usize) -> Vec<F> {
    let two_pi = F::from_f64(2.0) * F::pi();
    let mut table: Vec<F> = Vec::with_capacity(len);
    for i in 0..len {
        let entry = match i {
            0 => F::one(),
            1 => F::from_f64(2.0),
            _ => table[i - 2].clone() * two_pi.clone() / F::from_f64(i as f64),
        };
        table.push(entry);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalar::MpFloat;
    use std::f64::consts::PI;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_factorials() {
        let t = factorial_table::<f64>(11);
        assert_eq!(t[0], 1.0);
        assert_eq!(t[1], 1.0);
        assert_eq!(t[5], 120.0);
        assert_eq!(t[10], 3_628_800.0);
    }

    #[test]
    fn test_factorial_saturates_on_f64() {
        let t = factorial_table::<f64>(200);
        assert!(t[170].is_finite());
        assert!(t[171].is_infinite());
    }

    #[test]
    fn test_ball_volumes() {
        let t = unit_ball_volume_table::<f64>(6);
        assert!((t[1] - 2.0).abs() < EPS);
        assert!((t[2] - PI).abs() < EPS);
        assert!((t[3] - 4.0 * PI / 3.0).abs() < EPS);
        assert!((t[4] - PI * PI / 2.0).abs() < EPS);
        assert!((t[5] - 8.0 * PI * PI / 15.0).abs() < EPS);
    }

    #[test]
    fn test_mp_table_matches_f64_in_range() {
        let mp = unit_ball_volume_table::<MpFloat>(30);
        let native = unit_ball_volume_table::<f64>(30);
        for i in 0..30 {
            let rel = (mp[i].to_f64() - native[i]).abs() / native[i];
            assert!(rel < 1e-14, "entry {} off by {}", i, rel);
        }
    }

    #[test]
    fn test_mp_factorial_survives_past_f64_range() {
        let t = factorial_table::<MpFloat>(300);
        // 200! ≈ 7.9e374, far beyond f64 range but finite in MPFR.
        assert!(t[200].inner().is_finite());
        assert!(t[200].inner().clone() > 0);
    }
}
