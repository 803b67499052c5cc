//! Session objectives and progress tracking.

pub mod tracker;

pub use tracker::{Goal, GoalCategory, GoalTracker};
