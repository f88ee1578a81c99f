//! Execution primitives shared by the evaluator and the Monte Carlo engine.
//!
//! - Deterministic RNG (PCG with partitioned seeds)
//! - Jidoka guards for stop-on-error

pub mod jidoka;
pub mod rng;

pub use jidoka::{JidokaGuard, JidokaViolation};
pub use rng::SimRng;
