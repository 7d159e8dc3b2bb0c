//! Compact coefficient vectors and the feasibility projection.
//!
//! A coefficient vector `b` stores one squared bound per *pair* of
//! enumeration levels, reversed: the full array `pr` seen by callers
//! satisfies `pr[n-1-2i] = pr[n-2-2i] = b[i]` and `pr[0] = 1`. Feasibility
//! means `b[d-1] = 1`, every entry in `[0.1, 1]`, and `b` non-decreasing.

use super::{Pruner, PrunerError, Result};
use crate::scalar::Scalar;

impl<F: Scalar> Pruner<F> {
    /// Deterministic starting point for the descent: a ramp from 0.1 up,
    /// projected onto the feasible set.
    pub(crate) fn init_coeffs(&self) -> Vec<F> {
        let mut b: Vec<F> = (0..self.d)
            .map(|i| F::from_f64(0.1 + (i as f64) / (self.d as f64)))
            .collect();
        self.enforce(&mut b, 0);
        b
    }

    /// Extract the compact vector from a full coefficient array, rejecting
    /// any input the projection would have to modify.
    pub(crate) fn load_coeffs(&self, pr: &[f64]) -> Result<Vec<F>> {
        assert_eq!(
            pr.len(),
            self.n,
            "coefficient array length {} does not match the loaded block dimension {}",
            pr.len(),
            self.n
        );
        let mut b: Vec<F> = (0..self.d)
            .map(|i| F::from_f64(pr[self.n - 1 - 2 * i]))
            .collect();
        if self.enforce(&mut b, 0) {
            return Err(PrunerError::InfeasibleCoefficients);
        }
        Ok(b)
    }

    /// Mirror the compact vector back into the full array and pin
    /// `pr[0] = 1`.
    pub(crate) fn save_coeffs(&self, pr: &mut [f64], b: &[F]) {
        assert_eq!(
            pr.len(),
            self.n,
            "coefficient array length {} does not match the loaded block dimension {}",
            pr.len(),
            self.n
        );
        for i in 0..self.d {
            let v = b[i].to_f64();
            pr[self.n - 1 - 2 * i] = v;
            pr[self.n - 2 - 2 * i] = v;
        }
        pr[0] = 1.0;
    }

    /// Project `b` onto the feasible set, returning whether anything moved.
    ///
    /// Monotonicity is restored by sweeping right from the pivot `j`, then
    /// left from `j - 1`, so a perturbation at `j` propagates outward
    /// instead of being flattened by its unperturbed neighbors. Clamping up
    /// to the 0.1 floor does not count as a change.
    pub(crate) fn enforce(&self, b: &mut [F], j: usize) -> bool {
        let d = b.len();
        let mut changed = false;
        let floor = F::from_f64(0.1);

        if b[d - 1] < self.one {
            changed = true;
        }
        b[d - 1] = self.one.clone();

        for x in b.iter_mut() {
            if *x > self.one {
                *x = self.one.clone();
                changed = true;
            }
            if *x <= floor {
                *x = floor.clone();
            }
        }

        for i in j..d - 1 {
            if b[i + 1] < b[i] {
                b[i + 1] = b[i].clone();
                changed = true;
            }
        }
        for i in (0..j).rev() {
            if b[i + 1] < b[i] {
                b[i] = b[i + 1].clone();
                changed = true;
            }
        }
        changed
    }
}
