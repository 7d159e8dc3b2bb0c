//! Gradient estimation and descent.
//!
//! The functional being minimized is `log(cost_factor)`. Its gradient is
//! estimated by centered finite differences, one coordinate at a time; each
//! perturbed vector is projected back onto the feasible set with the
//! perturbed index as pivot, so the projection propagates the perturbation
//! outward instead of erasing it. The descent takes cumulative steps of
//! geometrically growing size along the normalized direction until the cost
//! factor stops decreasing.

use super::Pruner;
use crate::scalar::Scalar;

impl<F: Scalar> Pruner<F> {
    /// Centered finite-difference estimate of the descent direction of
    /// `log(cost_factor)`, written into `out`. The last coordinate is
    /// pinned, so its component is zero. The sign convention makes
    /// `b + step·out` a descent step.
    pub(crate) fn cost_factor_gradient(&self, b: &[F], out: &mut [F]) {
        let d = self.d;
        out[d - 1] = F::zero();
        for i in 0..d - 1 {
            let mut down = b.to_vec();
            down[i] = down[i].clone() * (self.one.clone() - self.epsilon.clone());
            self.enforce(&mut down, i);
            let low = self.cost_factor(&down);

            let mut up = b.to_vec();
            up[i] = up[i].clone() * (self.one.clone() + self.epsilon.clone());
            self.enforce(&mut up, i);
            let high = self.cost_factor(&up);

            out[i] = (low.ln() - high.ln()) / self.epsilon.clone();
        }
    }

    /// One line-search round. Returns the number of accepted steps, or 0
    /// when no acceptable step exists or the total improvement of the round
    /// stayed above the `min_cf_decrease` ratio.
    pub(crate) fn improve(&self, b: &mut Vec<F>) -> usize {
        let d = self.d;
        let mut cf = self.cost_factor(b);
        let old_cf = cf.clone();

        let mut gradient = vec![F::zero(); d];
        self.cost_factor_gradient(b, &mut gradient);

        let mut norm = F::zero();
        for g in gradient.iter() {
            norm = norm + g.clone() * g.clone();
        }
        norm = (norm / F::from_f64(d as f64)).sqrt();
        if norm <= F::zero() {
            return 0;
        }
        for g in gradient.iter_mut() {
            *g = g.clone() / norm.clone();
        }

        // The accepted candidate is the base for the next step, so the
        // trial point walks away from `b` with geometrically growing
        // increments.
        let mut candidate = b.clone();
        let mut step = self.min_step.clone();
        let mut accepted = 0;
        loop {
            for i in 0..d {
                candidate[i] = candidate[i].clone() + step.clone() * gradient[i].clone();
            }
            self.enforce(&mut candidate, 0);
            let new_cf = self.cost_factor(&candidate);
            if new_cf >= cf {
                break;
            }
            b.clone_from(&candidate);
            cf = new_cf;
            step = step * self.step_factor.clone();
            accepted += 1;
        }

        if cf > old_cf * self.min_cf_decrease.clone() {
            return 0;
        }
        accepted
    }

    /// Run `improve` to a fixed point. Stops when a round makes no
    /// progress: degenerate gradient, immediate line-search failure, or an
    /// improvement ratio above `min_cf_decrease`.
    pub(crate) fn descent(&self, b: &mut Vec<F>) {
        while self.improve(b) > 0 {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gsa_pruner(n: usize, ratio: f64) -> Pruner<f64> {
        let mut pruner = Pruner::<f64>::new();
        pruner.enumeration_radius = 1.0;
        let sq_norms: Vec<f64> = (0..n as i32).map(|i| ratio.powi(-2 * i)).collect();
        pruner.load_basis_shape(&sq_norms).unwrap();
        pruner
    }

    #[test]
    fn test_gradient_pins_last_coordinate() {
        let pruner = gsa_pruner(10, 1.04);
        let b = pruner.init_coeffs();
        let mut gradient = vec![0.0; 5];
        pruner.cost_factor_gradient(&b, &mut gradient);
        assert_eq!(gradient[4], 0.0);
        assert!(gradient.iter().any(|g| *g != 0.0));
    }

    #[test]
    fn test_improve_never_increases_cost_factor() {
        let pruner = gsa_pruner(12, 1.05);
        let mut b = pruner.init_coeffs();
        let before = pruner.cost_factor(&b);
        pruner.improve(&mut b);
        let after = pruner.cost_factor(&b);
        assert!(after <= before);
        let mut check = b.clone();
        assert!(!pruner.enforce(&mut check, 0));
    }

    #[test]
    fn test_descent_converges() {
        let pruner = gsa_pruner(10, 1.04);
        let mut b = pruner.init_coeffs();
        let initial = pruner.cost_factor(&b);
        pruner.descent(&mut b);
        let converged = pruner.cost_factor(&b);
        assert!(converged <= initial);
        // A second descent finds essentially nothing left.
        pruner.descent(&mut b);
        let again = pruner.cost_factor(&b);
        assert!(again <= converged);
        assert!(converged / again < 1.001);
    }

    #[test]
    fn test_descent_on_degenerate_direction_stops() {
        // d = 1: the only coefficient is pinned, the gradient is zero.
        let mut pruner = Pruner::<f64>::new();
        pruner.enumeration_radius = 1.0;
        pruner.load_basis_shape(&[2.0, 0.5]).unwrap();
        let mut b = pruner.init_coeffs();
        assert_eq!(b, vec![1.0]);
        assert_eq!(pruner.improve(&mut b), 0);
        assert_eq!(b, vec![1.0]);
    }
}
