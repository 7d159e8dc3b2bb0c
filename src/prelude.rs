// src/prelude.rs
//! The “everything” import for the pruner.
//!
//! Brings you the most commonly used types and functions with one glob:
//! ```rust
//! use svp_pruner::prelude::*;
//! ```

// core types
pub use crate::pruner::{Pruner, PrunerError, Result};
pub use crate::scalar::{MpFloat, Scalar};

// adapters and free functions
pub use crate::estimate::unpruned_enum_cost;
pub use crate::gso::GsoShape;
pub use crate::pruner::auto_prune;
pub use crate::scalar::{mp_precision, set_mp_precision};
