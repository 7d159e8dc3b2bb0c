//! Small polynomials for the volume recurrence.
//!
//! Coefficients are stored low-order first. The only two operations the
//! recurrence needs are Horner evaluation and in-place integration with a
//! zero constant of integration.

use crate::scalar::Scalar;

pub(crate) struct Poly<F> {
    coeffs: Vec<F>,
    degree: usize,
}

impl<F: Scalar> Poly<F> {
    /// Constant polynomial, with room for `max_degree` integrations.
    pub fn constant(value: F, max_degree: usize) -> Self {
        let mut coeffs = vec![F::zero(); max_degree + 1];
        coeffs[0] = value;
        Poly { coeffs, degree: 0 }
    }

    #[allow(dead_code)]
    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn constant_term(&self) -> &F {
        &self.coeffs[0]
    }

    pub fn set_constant_term(&mut self, value: F) {
        self.coeffs[0] = value;
    }

    /// Horner evaluation at `x`.
    pub fn eval(&self, x: &F) -> F {
        let mut acc = F::zero();
        for i in (0..=self.degree).rev() {
            acc = acc * x.clone() + self.coeffs[i].clone();
        }
        acc
    }

    /// Replace the polynomial by its antiderivative with zero constant
    /// term. The degree grows by one.
    pub fn integrate(&mut self) {
        for i in (0..=self.degree).rev() {
            self.coeffs[i + 1] = self.coeffs[i].clone() / F::from_f64((i + 1) as f64);
        }
        self.coeffs[0] = F::zero();
        self.degree += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_eval_constant() {
        let p = Poly::<f64>::constant(3.5, 4);
        assert_eq!(p.degree(), 0);
        assert_eq!(p.eval(&2.0), 3.5);
    }

    #[test]
    fn test_integrate_once() {
        // 1 -> x
        let mut p = Poly::<f64>::constant(1.0, 2);
        p.integrate();
        assert_eq!(p.degree(), 1);
        assert!((p.eval(&0.5) - 0.5).abs() < EPS);
        assert_eq!(*p.constant_term(), 0.0);
    }

    #[test]
    fn test_integrate_twice_and_reset_constant() {
        // 1 -> x -> then set constant: p = x - 1 -> integrate: x²/2 - x
        let mut p = Poly::<f64>::constant(1.0, 3);
        p.integrate();
        p.set_constant_term(-1.0);
        p.integrate();
        assert_eq!(p.degree(), 2);
        let x = 3.0;
        assert!((p.eval(&x) - (x * x / 2.0 - x)).abs() < EPS);
    }

    #[test]
    fn test_horner_matches_direct_sum() {
        // Build 2 + 3x + 0.5x² by hand through integration arithmetic.
        let mut p = Poly::<f64>::constant(1.0, 3);
        p.integrate(); // x
        p.integrate(); // x²/2
        p.set_constant_term(2.0); // 2 + x²/2
        let x = 1.75;
        assert!((p.eval(&x) - (2.0 + x * x / 2.0)).abs() < EPS);
    }
}
