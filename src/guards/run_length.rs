//! Run-length guard - limits consecutive characters of one class.

use secrecy::{ExposeSecret, SecretString};
use super::GuardResult;
use crate::class::CharClass;
use crate::result::Rejection;

/// Rejects the password when more than `max_consecutive` characters in a
/// row share a character class. `None` or `Some(0)` disables the guard.
///
/// [`CharClass::Other`] characters never reset a run: they lengthen the
/// run in progress and leave its class unchanged. A run that starts with
/// such characters takes the class of the first classified character.
///
/// The rejection names the entry only, not the offending position.
pub fn run_length_guard(password: &SecretString, max_consecutive: Option<u32>, dn: &str) -> GuardResult {
    let Some(max) = max_consecutive.filter(|&m| m > 0) else {
        return Ok(());
    };
    let max = max as usize;

    let mut current: Option<CharClass> = None;
    let mut run = 0usize;

    for c in password.expose_secret().chars() {
        let class = CharClass::of(c);
        match (class, current) {
            (CharClass::Other, _) | (_, None) => run += 1,
            (class, Some(prev)) if class == prev => run += 1,
            _ => run = 1,
        }
        if class != CharClass::Other {
            current = Some(class);
        }

        if run > max {
            #[cfg(feature = "tracing")]
            tracing::debug!("Run of {} characters exceeds limit {} for dn={}", run, max, dn);
            return Err(Rejection::ConsecutiveClass { dn: dn.to_string() });
        }
    }

    Ok(())
}
