#![doc = include_str!("../README.md")]

pub mod estimate;
pub mod gso;
pub mod prelude;
pub mod pruner;
pub mod scalar;
pub mod tables;

pub use estimate::unpruned_enum_cost;
pub use gso::GsoShape;
pub use pruner::{auto_prune, Pruner, PrunerError, Result, MAX_D, MAX_N};
pub use scalar::{mp_precision, set_mp_precision, MpFloat, Scalar};
