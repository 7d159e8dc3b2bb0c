//! Pruning-coefficient optimizer for SVP enumeration.
//!
//! A [`Pruner`] predicts the cost and success probability of a pruned
//! lattice enumeration from the Gram-Schmidt shape of the basis block, and
//! runs a projected gradient descent to find coefficients minimizing the
//! expected cost including retrials.
//!
//! Internally everything works on a compact coefficient vector `b` of length
//! `d = n/2` in *reversed* level order (index 0 is the innermost pair of
//! enumeration levels), following the algorithm description of Chen's
//! thesis. The externally visible `pr` array of length `n` mirrors each
//! `b[i]` into two consecutive levels, with `pr[0] = 1`.
//!
//! # Workflow
//!
//! 1. [`Pruner::load_basis_shape`] (or [`Pruner::load_from_gso`]) ingests
//!    the squared Gram-Schmidt norms of the block;
//! 2. [`Pruner::optimize_pruning_coeffs`] runs the descent;
//! 3. [`Pruner::enum_cost`], [`Pruner::enum_cost_with_retrials`] and
//!    [`Pruner::svp_success_proba`] query a coefficient vector.
//!
//! [`auto_prune`] bundles the whole sequence.

mod coeffs;
mod cost;
mod optimize;
mod poly;
mod shape;

use crate::gso::GsoShape;
use crate::scalar::Scalar;
use crate::tables;
use std::fmt;

/// Largest supported block dimension.
pub const MAX_N: usize = 2047;
/// Largest number of independent coefficients (`⌊MAX_N/2⌋`).
pub const MAX_D: usize = 1023;

/// Errors surfaced by the pruner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrunerError {
    /// The basis block has dimension n < 2.
    DimensionTooSmall,
    /// A query or optimization was issued before a shape was loaded.
    BasisNotLoaded,
    /// Input coefficients violate the feasibility invariants.
    InfeasibleCoefficients,
}

impl fmt::Display for PrunerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrunerError::DimensionTooSmall => {
                write!(f, "basis block must have dimension n > 1")
            }
            PrunerError::BasisNotLoaded => write!(f, "no basis shape loaded"),
            PrunerError::InfeasibleCoefficients => write!(
                f,
                "ill-formed pruning coefficients (must be non-increasing, \
                 within [0.1, 1], starting with 1.0)"
            ),
        }
    }
}

impl std::error::Error for PrunerError {}

pub type Result<T> = std::result::Result<T, PrunerError>;

/// Pruning-coefficient optimizer, generic over the scalar backend.
///
/// The three main parameters are public fields, as are the tuning knobs of
/// the descent; all default to the values documented on [`Pruner::new`].
/// A `Pruner` is a single-threaded compute object: queries take `&self` and
/// allocate their own scratch, loading a shape takes `&mut self`. Distinct
/// instances are fully independent.
pub struct Pruner<F: Scalar> {
    /// Squared enumeration radius.
    pub enumeration_radius: F,
    /// Additive cost of re-preprocessing before each retrial.
    pub preproc_cost: F,
    /// Success probability the retrial model must reach.
    pub target_success_proba: F,
    /// Relative step of the finite-difference gradient.
    pub epsilon: F,
    /// Initial line-search step.
    pub min_step: F,
    /// Geometric growth factor of the line-search step.
    pub step_factor: F,
    /// Thickness ratio of the shell used for the probability estimate.
    pub shell_ratio: F,
    /// Stop when an `improve` round shrinks the cost factor by less than
    /// this ratio.
    pub min_cf_decrease: F,
    /// Cost divisor accounting for the half-space symmetry of enumeration.
    pub symmetry_factor: F,

    n: usize,
    d: usize,
    /// Reversed, renormalized squared Gram-Schmidt norms (∏ r[i] = 1).
    r: Vec<F>,
    /// Partial volumes pv[k] = ∏_{i≤k} √r[i].
    pv: Vec<F>,
    renormalization_factor: F,
    factorial: Vec<F>,
    ball_vol: Vec<F>,
    // Cached sentinels; spares the MPFR backend an allocation per literal in
    // the hot loops.
    one: F,
    minus_one: F,
}

impl<F: Scalar> Pruner<F> {
    /// Create an empty pruner with default parameters:
    /// `enumeration_radius = 0`, `preproc_cost = 0`,
    /// `target_success_proba = 0.90`, `epsilon = 2⁻¹³`, `min_step = 2⁻¹²`,
    /// `step_factor = √2`, `shell_ratio = 0.995`, `min_cf_decrease = 0.9999`,
    /// `symmetry_factor = 2`.
    ///
    /// The factorial and unit-ball-volume tables are materialized here, at
    /// the precision the backend carries at this moment.
    pub fn new() -> Self {
        Pruner {
            enumeration_radius: F::zero(),
            preproc_cost: F::zero(),
            target_success_proba: F::from_f64(0.90),
            epsilon: F::from_f64(2f64.powi(-13)),
            min_step: F::from_f64(2f64.powi(-12)),
            step_factor: F::from_f64(2f64.sqrt()),
            shell_ratio: F::from_f64(0.995),
            min_cf_decrease: F::from_f64(0.9999),
            symmetry_factor: F::from_f64(2.0),
            n: 0,
            d: 0,
            r: Vec::new(),
            pv: Vec::new(),
            renormalization_factor: F::one(),
            factorial: tables::factorial_table(MAX_N),
            ball_vol: tables::unit_ball_volume_table(MAX_N),
            one: F::one(),
            minus_one: -F::one(),
        }
    }

    /// Dimension of the loaded block (0 before a shape is loaded).
    pub fn dim(&self) -> usize {
        self.n
    }

    /// Number of independent coefficients, `⌊n/2⌋`.
    pub fn num_coeffs(&self) -> usize {
        self.d
    }

    /// Factor by which the loaded squared norms were rescaled so that their
    /// product is 1. The enumeration radius is scaled by it during cost
    /// evaluation.
    pub fn renormalization_factor(&self) -> f64 {
        self.renormalization_factor.to_f64()
    }

    fn check_basis_loaded(&self) -> Result<()> {
        if self.d == 0 {
            return Err(PrunerError::BasisNotLoaded);
        }
        Ok(())
    }

    /// Expected number of enumeration nodes for the coefficients `pr`,
    /// for a single enumeration (no retrials).
    ///
    /// `pr` must have length `n` and satisfy the feasibility invariants.
    pub fn enum_cost(&self, pr: &[f64]) -> Result<f64> {
        self.check_basis_loaded()?;
        let b = self.load_coeffs(pr)?;
        Ok(self.cost(&b).to_f64())
    }

    /// Expected total cost of reaching the target success probability with
    /// retrials, preprocessing included.
    pub fn enum_cost_with_retrials(&self, pr: &[f64]) -> Result<f64> {
        self.check_basis_loaded()?;
        let b = self.load_coeffs(pr)?;
        Ok(self.cost_factor(&b).to_f64())
    }

    /// Probability that a single pruned enumeration finds the short vector.
    pub fn svp_success_proba(&self, pr: &[f64]) -> Result<f64> {
        self.check_basis_loaded()?;
        let b = self.load_coeffs(pr)?;
        Ok(self.success_proba(&b).to_f64())
    }

    /// Optimize pruning coefficients in place.
    ///
    /// With `reset`, the descent starts from the deterministic ramp
    /// `b[i] = 0.1 + i/d`; otherwise `pr` itself is the starting point and
    /// must be feasible. On return `pr` holds the locally optimal
    /// coefficients in the mirrored full layout with `pr[0] = 1`.
    pub fn optimize_pruning_coeffs(&self, pr: &mut [f64], reset: bool) -> Result<()> {
        self.check_basis_loaded()?;
        let mut b = if reset {
            self.init_coeffs()
        } else {
            self.load_coeffs(pr)?
        };
        self.descent(&mut b);
        self.save_coeffs(pr, &b);
        Ok(())
    }
}

impl<F: Scalar> Default for Pruner<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// One-call facade: build a pruner, load the shape slice `[begin, end)` of
/// `gso`, optimize from the deterministic initialization and write the
/// coefficients into `pr`. Returns the achieved success probability.
///
/// `end = 0` means "up to `gso.dim()`". `pr` must have length `end - begin`.
pub fn auto_prune<F: Scalar, G: GsoShape + ?Sized>(
    pr: &mut [f64],
    enumeration_radius: f64,
    preproc_cost: f64,
    target_success_proba: f64,
    gso: &G,
    begin: usize,
    end: usize,
) -> Result<f64> {
    let mut pruner = Pruner::<F>::new();
    pruner.enumeration_radius = F::from_f64(enumeration_radius);
    pruner.preproc_cost = F::from_f64(preproc_cost);
    pruner.target_success_proba = F::from_f64(target_success_proba);
    pruner.load_from_gso(gso, begin, end)?;
    pruner.optimize_pruning_coeffs(pr, true)?;
    pruner.svp_success_proba(pr)
}
