//! Volume, cost and success-probability functionals.
//!
//! `relative_volume` is a Dirichlet-style evaluation of the iterated
//! integral giving the volume of an intersection of nested cylinders,
//! relative to the ball of the same dimension. It alternates integration
//! with re-seeding the constant term, so the working polynomial never grows
//! past the current depth. The result is numerically sensitive for deep
//! recursions and must stay in the scalar backend throughout.

use super::poly::Poly;
use super::Pruner;
use crate::scalar::Scalar;

impl<F: Scalar> Pruner<F> {
    /// Dimensionally-scaled relative volume of the region cut out by the
    /// first `rd` coefficients.
    pub(crate) fn relative_volume(&self, rd: usize, b: &[F]) -> F {
        let top = b[rd - 1].clone();
        let mut p = Poly::constant(self.one.clone(), rd);
        for i in (0..rd).rev() {
            p.integrate();
            let x = b[i].clone() / top.clone();
            let value = self.minus_one.clone() * p.eval(&x);
            p.set_constant_term(value);
        }
        let volume = p.constant_term().clone() * self.factorial[rd].clone();
        if rd % 2 == 1 {
            self.minus_one.clone() * volume
        } else {
            volume
        }
    }

    /// Expected number of nodes visited by a single enumeration with
    /// bounds `b`, divided by the symmetry factor.
    pub(crate) fn cost(&self, b: &[F]) -> F {
        let d = self.d;

        // Relative volumes at each odd level; even levels are interpolated
        // as the geometric mean of their neighbors.
        let mut rv = vec![F::zero(); 2 * d];
        for i in 0..d {
            rv[2 * i + 1] = self.relative_volume(i + 1, b);
        }
        rv[0] = self.one.clone();
        for i in 1..d {
            rv[2 * i] = (rv[2 * i - 1].clone() * rv[2 * i + 1].clone()).sqrt();
        }

        let normalized_radius = (self.enumeration_radius.clone()
            * self.renormalization_factor.clone())
        .sqrt();

        let mut total = F::zero();
        for i in 0..2 * d {
            let term = normalized_radius.powi((i + 1) as i32)
                * rv[i].clone()
                * self.ball_vol[i + 1].clone()
                * b[i / 2].powi((i + 1) as i32).sqrt()
                / self.pv[i].clone();
            total = total + term;
        }
        total / self.symmetry_factor.clone()
    }

    /// Probability that a uniformly distributed short vector survives the
    /// pruned region, estimated as a finite difference of volumes across a
    /// thin shell of ratio `shell_ratio`.
    pub(crate) fn success_proba(&self, b: &[F]) -> F {
        let d = self.d;
        let dx = self.shell_ratio.clone();
        let dx_sq = dx.clone() * dx.clone();

        let mut b_shell = Vec::with_capacity(d);
        for bi in b.iter() {
            let mut v = bi.clone() / dx_sq.clone();
            if v > self.one {
                v = self.one.clone();
            }
            b_shell.push(v);
        }

        let vol = self.relative_volume(d, b);
        let dxn = dx.powi((2 * d) as i32);
        let dvol = dxn.clone() * self.relative_volume(d, &b_shell) - vol;
        dvol / (dxn - self.one.clone())
    }

    /// Expected cost of reaching the target success probability: a single
    /// enumeration if `b` already reaches it, otherwise the real-valued
    /// expected number of independent retrials, each paying the
    /// preprocessing cost again.
    pub(crate) fn cost_factor(&self, b: &[F]) -> F {
        let proba = self.success_proba(b);
        if proba >= self.target_success_proba {
            return self.cost(b);
        }
        let trials = (self.one.clone() - self.target_success_proba.clone()).ln()
            / (self.one.clone() - proba).ln();
        self.cost(b) * trials.clone() + self.preproc_cost.clone() * (trials - self.one.clone())
    }
}
