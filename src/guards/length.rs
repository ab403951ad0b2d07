//! Length precheck - refuses passwords too short for the dictionary to judge.

use secrecy::{ExposeSecret, SecretString};
use super::GuardResult;
use crate::result::{MIN_PASSWORD_LENGTH, Rejection};

/// Rejects passwords shorter than six characters.
pub fn length_guard(password: &SecretString, dn: &str) -> GuardResult {
    let length = password.expose_secret().chars().count();
    if length < MIN_PASSWORD_LENGTH {
        return Err(Rejection::TooShort {
            dn: dn.to_string(),
            length,
        });
    }
    Ok(())
}
