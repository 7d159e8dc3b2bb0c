//! Scalar backends for the pruner.
//!
//! Every functional in this crate is generic over a [`Scalar`]: a cloneable,
//! ordered numeric type with field arithmetic, `ln`/`exp`/`sqrt`, integer
//! powers and conversions to and from native `f64`. Two backends are
//! provided:
//!
//! - `f64`, the fast native path;
//! - [`MpFloat`], an MPFR float (`rug::Float`) carrying a process-wide
//!   precision, for blocks large enough that the iterated volume integrals
//!   underflow a double.
//!
//! The MPFR precision is a process-wide setting read when values are
//! constructed. Set it once at startup, before building a `Pruner`.

use num_traits::{One, Zero};
use rug::float::Constant;
use rug::ops::Pow;
use rug::Float;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::sync::atomic::{AtomicU32, Ordering};

/// Default precision (bits) for [`MpFloat`] values.
pub const DEFAULT_MP_PRECISION: u32 = 1000;

static MP_PRECISION: AtomicU32 = AtomicU32::new(DEFAULT_MP_PRECISION);

/// Set the process-wide precision (bits) used by new [`MpFloat`] values.
pub fn set_mp_precision(bits: u32) {
    MP_PRECISION.store(bits.max(2), Ordering::Relaxed);
}

/// Current process-wide [`MpFloat`] precision in bits.
pub fn mp_precision() -> u32 {
    MP_PRECISION.load(Ordering::Relaxed)
}

/// Numeric capabilities the pruner needs from a floating-point type.
///
/// Addition and multiplication come with the `Zero`/`One` supertraits; the
/// comparison operators come with `PartialOrd`. Domain errors (`ln` of a
/// non-positive value, `sqrt` of a negative one) follow the backend's own
/// semantics and are not masked: both provided backends yield NaN, which
/// propagates through comparisons as "false" exactly like native floats.
pub trait Scalar:
    Clone
    + PartialOrd
    + Zero
    + One
    + Neg<Output = Self>
    + Sub<Output = Self>
    + Div<Output = Self>
{
    /// Construct from a native double, rounding to the backend precision.
    fn from_f64(x: f64) -> Self;
    /// Round to the nearest native double.
    fn to_f64(&self) -> f64;
    /// Natural logarithm.
    fn ln(&self) -> Self;
    /// Exponential.
    fn exp(&self) -> Self;
    /// Square root.
    fn sqrt(&self) -> Self;
    /// Integer power.
    fn powi(&self, exp: i32) -> Self;
    /// The constant π at the backend precision.
    fn pi() -> Self;
}

impl Scalar for f64 {
    #[inline(always)]
    fn from_f64(x: f64) -> Self {
        x
    }

    #[inline(always)]
    fn to_f64(&self) -> f64 {
        *self
    }

    #[inline(always)]
    fn ln(&self) -> Self {
        f64::ln(*self)
    }

    #[inline(always)]
    fn exp(&self) -> Self {
        f64::exp(*self)
    }

    #[inline(always)]
    fn sqrt(&self) -> Self {
        f64::sqrt(*self)
    }

    #[inline(always)]
    fn powi(&self, exp: i32) -> Self {
        f64::powi(*self, exp)
    }

    #[inline(always)]
    fn pi() -> Self {
        std::f64::consts::PI
    }
}

/// Arbitrary-precision scalar backed by MPFR (`rug::Float`).
///
/// New values are created at the process-wide precision returned by
/// [`mp_precision`]. Arithmetic follows MPFR semantics: the result of a
/// binary operation carries the larger precision of its operands.
#[derive(Clone, Debug, PartialEq, PartialOrd)]
pub struct MpFloat(Float);

impl MpFloat {
    /// Construct at an explicit precision instead of the process-wide one.
    pub fn with_precision(bits: u32, value: f64) -> Self {
        MpFloat(Float::with_val(bits.max(2), value))
    }

    /// Precision of this value in bits.
    pub fn precision(&self) -> u32 {
        self.0.prec()
    }

    /// Borrow the underlying MPFR float.
    pub fn inner(&self) -> &Float {
        &self.0
    }
}

impl From<Float> for MpFloat {
    fn from(f: Float) -> Self {
        MpFloat(f)
    }
}

impl fmt::Display for MpFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for MpFloat {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        MpFloat(self.0 + rhs.0)
    }
}

impl Sub for MpFloat {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        MpFloat(self.0 - rhs.0)
    }
}

impl Mul for MpFloat {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        MpFloat(self.0 * rhs.0)
    }
}

impl Div for MpFloat {
    type Output = Self;
    #[inline]
    fn div(self, rhs: Self) -> Self {
        MpFloat(self.0 / rhs.0)
    }
}

impl Neg for MpFloat {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        MpFloat(-self.0)
    }
}

impl Zero for MpFloat {
    fn zero() -> Self {
        MpFloat(Float::with_val(mp_precision(), 0))
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl One for MpFloat {
    fn one() -> Self {
        MpFloat(Float::with_val(mp_precision(), 1))
    }
}

impl Scalar for MpFloat {
    fn from_f64(x: f64) -> Self {
        MpFloat(Float::with_val(mp_precision(), x))
    }

    fn to_f64(&self) -> f64 {
        self.0.to_f64()
    }

    fn ln(&self) -> Self {
        MpFloat(self.0.clone().ln())
    }

    fn exp(&self) -> Self {
        MpFloat(self.0.clone().exp())
    }

    fn sqrt(&self) -> Self {
        MpFloat(self.0.clone().sqrt())
    }

    fn powi(&self, exp: i32) -> Self {
        MpFloat(self.0.clone().pow(exp))
    }

    fn pi() -> Self {
        MpFloat(Float::with_val(mp_precision(), Constant::Pi))
    }
}
