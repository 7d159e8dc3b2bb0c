//! Basis-shape loading.
//!
//! The squared Gram-Schmidt norms are stored reversed (index 0 is the last
//! vector of the block) and renormalized so that their product is 1, which
//! keeps the partial volumes away from overflow. The renormalization factor
//! is kept: the enumeration radius must be scaled by it during cost
//! evaluation.

use super::{Pruner, PrunerError, Result, MAX_N};
use crate::gso::GsoShape;
use crate::scalar::Scalar;

impl<F: Scalar> Pruner<F> {
    /// Load the shape of a basis block from its squared Gram-Schmidt norms.
    ///
    /// For odd `n` the leading entry takes part in the renormalization but
    /// not in the partial volumes: the compact coefficient model covers the
    /// trailing `2·⌊n/2⌋` levels only.
    pub fn load_basis_shape(&mut self, sq_norms: &[f64]) -> Result<()> {
        let n = sq_norms.len();
        let d = n / 2;
        if d == 0 {
            return Err(PrunerError::DimensionTooSmall);
        }
        assert!(n <= MAX_N, "block dimension {} exceeds the supported {}", n, MAX_N);

        self.n = n;
        self.d = d;

        self.r.clear();
        let mut logvol = F::zero();
        for i in 0..n {
            let ri = F::from_f64(sq_norms[n - 1 - i]);
            logvol = logvol + ri.ln();
            self.r.push(ri);
        }
        self.renormalization_factor = (logvol / F::from_f64(-(n as f64))).exp();
        for ri in self.r.iter_mut() {
            *ri = ri.clone() * self.renormalization_factor.clone();
        }

        self.pv.clear();
        let mut acc = F::one();
        for k in 0..2 * d {
            acc = acc * self.r[k].sqrt();
            self.pv.push(acc.clone());
        }
        Ok(())
    }

    /// Load the shape of the sub-block `[begin, end)` of a Gram-Schmidt
    /// object. `end = 0` means "up to `gso.dim()`".
    pub fn load_from_gso<G: GsoShape + ?Sized>(
        &mut self,
        gso: &G,
        begin: usize,
        end: usize,
    ) -> Result<()> {
        let end = if end == 0 { gso.dim() } else { end };
        assert!(
            begin <= end && end <= gso.dim(),
            "invalid block range [{}, {}) for a GSO of dimension {}",
            begin,
            end,
            gso.dim()
        );
        let sq_norms: Vec<f64> = (begin..end).map(|i| gso.r_diagonal(i)).collect();
        self.load_basis_shape(&sq_norms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_rejects_tiny_block() {
        let mut pruner = Pruner::<f64>::new();
        assert_eq!(
            pruner.load_basis_shape(&[2.0]),
            Err(PrunerError::DimensionTooSmall)
        );
        assert_eq!(
            pruner.load_basis_shape(&[]),
            Err(PrunerError::DimensionTooSmall)
        );
    }

    #[test]
    fn test_renormalized_product_is_one() {
        let mut pruner = Pruner::<f64>::new();
        let sq_norms: Vec<f64> = (0..6).map(|i| 1.2f64.powi(-2 * i)).collect();
        pruner.load_basis_shape(&sq_norms).unwrap();
        let prod: f64 = pruner.r.iter().product();
        assert!((prod - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_reversal_and_partial_volumes() {
        let mut pruner = Pruner::<f64>::new();
        let sq_norms = [9.0, 4.0, 1.0, 0.25];
        pruner.load_basis_shape(&sq_norms).unwrap();
        // r[0] corresponds to the last raw entry.
        let renorm = pruner.renormalization_factor();
        assert!((pruner.r[0] - 0.25 * renorm).abs() < EPS);
        assert!((pruner.r[3] - 9.0 * renorm).abs() < EPS);
        // pv[k] = pv[k-1] * sqrt(r[k])
        let mut acc = 1.0;
        for k in 0..4 {
            acc *= pruner.r[k].sqrt();
            assert!((pruner.pv[k] - acc).abs() < EPS);
        }
    }

    #[test]
    fn test_odd_dimension_drops_leading_entry() {
        let mut pruner = Pruner::<f64>::new();
        let sq_norms = [5.0, 3.0, 2.0, 1.0, 0.5];
        pruner.load_basis_shape(&sq_norms).unwrap();
        assert_eq!(pruner.dim(), 5);
        assert_eq!(pruner.num_coeffs(), 2);
        // The partial volumes only cover 2d = 4 levels.
        assert_eq!(pruner.pv.len(), 4);
        // The dropped entry (raw index 0) still entered the renormalization.
        let prod: f64 = pruner.r.iter().product();
        assert!((prod - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_gso_sub_block() {
        let sq_norms: Vec<f64> = (0..10).map(|i| 1.05f64.powi(-i)).collect();
        let mut whole = Pruner::<f64>::new();
        whole.load_basis_shape(&sq_norms[2..8]).unwrap();
        let mut sliced = Pruner::<f64>::new();
        sliced.load_from_gso(&sq_norms, 2, 8).unwrap();
        assert_eq!(sliced.dim(), 6);
        for k in 0..6 {
            assert!((whole.r[k] - sliced.r[k]).abs() < EPS);
        }
    }
}
