//! Validation guards
//!
//! Each guard checks one rule and either lets the password through or
//! produces the [`Rejection`](crate::Rejection) for that rule. The
//! validator runs them in a fixed order and stops at the first failure.

mod dictionary;
mod identity;
mod length;
mod run_length;
mod strength;

pub use dictionary::dictionary_guard;
pub use identity::identity_guard;
pub use length::length_guard;
pub use run_length::run_length_guard;
pub use strength::{ClassMinimums, ScoreState, strength_guard};

/// Result type for guard functions.
/// - `Ok(())` - Guard passed or was skipped
/// - `Err(rejection)` - Password violates the guarded rule
pub type GuardResult = Result<(), crate::Rejection>;
