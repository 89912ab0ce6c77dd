//! AI components

pub mod chase;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod chase_tests;

// Re-export all components
pub use chase::*;
