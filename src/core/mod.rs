//! Core engine types: deterministic random number generation.
//!
//! The rest of the crate builds on this module; it has no game semantics of
//! its own.

pub mod rng;

pub use rng::GameRng;
