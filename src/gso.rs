//! Gram-Schmidt adapter.
//!
//! The pruner only ever consumes the diagonal of a Gram-Schmidt
//! decomposition: the squared norms `||b*_i||²`. Any orthogonalization
//! object can feed it by implementing [`GsoShape`]; a plain slice of squared
//! norms already does.

/// Read-only view of the diagonal of a Gram-Schmidt decomposition.
pub trait GsoShape {
    /// Number of Gram-Schmidt vectors.
    fn dim(&self) -> usize;

    /// Squared norm `||b*_i||²` of the i-th orthogonalized vector.
    fn r_diagonal(&self, i: usize) -> f64;
}

impl GsoShape for [f64] {
    fn dim(&self) -> usize {
        self.len()
    }

    fn r_diagonal(&self, i: usize) -> f64 {
        self[i]
    }
}

impl GsoShape for Vec<f64> {
    fn dim(&self) -> usize {
        self.len()
    }

    fn r_diagonal(&self, i: usize) -> f64 {
        self[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_adapter() {
        let norms = [4.0, 2.0, 1.0];
        let shape: &[f64] = &norms;
        assert_eq!(shape.dim(), 3);
        assert_eq!(shape.r_diagonal(1), 2.0);
    }
}
