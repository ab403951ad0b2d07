//! Dictionary guard - asks the weak-password oracle about the password.

use secrecy::{ExposeSecret, SecretString};
use super::GuardResult;
use crate::dictionary::{OracleVerdict, WeakPasswordOracle};
use crate::result::Rejection;

/// Rejects the password when the oracle knows it as weak.
///
/// An unavailable oracle skips the check.
pub fn dictionary_guard(password: &SecretString, oracle: &dyn WeakPasswordOracle, dn: &str) -> GuardResult {
    match oracle.check(password.expose_secret()) {
        OracleVerdict::Clear => Ok(()),
        OracleVerdict::Weak(reason) => {
            #[cfg(feature = "tracing")]
            tracing::debug!("Dictionary rejected password for dn={} because {}", dn, reason);
            Err(Rejection::Dictionary {
                dn: dn.to_string(),
                reason,
            })
        }
        OracleVerdict::Unavailable(_detail) => {
            #[cfg(feature = "tracing")]
            tracing::warn!("Dictionary unavailable ({}), skipping dictionary checks", _detail);
            Ok(())
        }
    }
}
