//! Full-enumeration cost estimate.
//!
//! The classic per-level estimate of the number of nodes visited by an
//! unpruned enumeration: at each level the expected node count is the
//! volume of the sphere of the remaining dimension times the square root of
//! the product of `bound / r_i` over the levels below. This is the baseline
//! against which a pruned cost is read.

use crate::scalar::Scalar;
use crate::tables;

/// Estimated node count of a full (unpruned) enumeration at squared radius
/// `bound_sq` over a block with squared Gram-Schmidt norms `sq_norms`.
///
/// No symmetry divisor is applied; callers exploiting the central symmetry
/// of the search space halve the result themselves.
pub fn unpruned_enum_cost<F: Scalar>(bound_sq: f64, sq_norms: &[f64]) -> F {
    let dim = sq_norms.len();
    let ball_vol = tables::unit_ball_volume_table::<F>(dim + 1);
    let bound = F::from_f64(bound_sq);

    let mut det = F::one();
    let mut total = F::zero();
    for i in (0..dim).rev() {
        det = det * (bound.clone() / F::from_f64(sq_norms[i]));
        let level = det.sqrt() * ball_vol[dim - i].clone();
        total = total + level;
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_single_level() {
        // One level: sqrt(bound/r) * V_1.
        let cost = unpruned_enum_cost::<f64>(4.0, &[1.0]);
        assert!((cost - 2.0 * 2.0).abs() < EPS);
    }

    #[test]
    fn test_two_levels_flat() {
        // Levels: sqrt(b/r1)·V1 + sqrt(b²/(r0 r1))·V2.
        let cost = unpruned_enum_cost::<f64>(1.0, &[0.25, 1.0]);
        let expected = 1.0 * 2.0 + (1.0 / 0.25f64).sqrt() * PI;
        assert!((cost - expected).abs() < EPS);
    }

    #[test]
    fn test_cost_grows_with_radius() {
        let sq_norms: Vec<f64> = (0..10).map(|i| 1.05f64.powi(-i)).collect();
        let small = unpruned_enum_cost::<f64>(0.5, &sq_norms);
        let large = unpruned_enum_cost::<f64>(2.0, &sq_norms);
        assert!(large > small);
    }
}
