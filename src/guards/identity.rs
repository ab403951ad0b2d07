//! Identity guard - the password must not contain the account name.

use secrecy::{ExposeSecret, SecretString};
use super::GuardResult;
use crate::result::Rejection;
use crate::subject::Subject;

/// Rejects the password when it contains the subject's account name
/// (case-sensitive). Skipped when no account name can be extracted.
pub fn identity_guard(password: &SecretString, subject: &Subject) -> GuardResult {
    let Some(name) = subject.account_name() else {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            "Cannot get username for entry '{}', skipping username check",
            subject.display_name
        );
        return Ok(());
    };

    if password.expose_secret().contains(name) {
        return Err(Rejection::ContainsIdentity {
            dn: subject.display_name.clone(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pwd(s: &str) -> SecretString {
        SecretString::new(s.to_string().into())
    }

    #[test]
    fn test_identity_guard_contains_name() {
        let subject = Subject::new("uid=jdoe,ou=People,dc=example", "uid=jdoe,ou=people,dc=example");
        assert_eq!(
            identity_guard(&pwd("jdoe12345!"), &subject),
            Err(Rejection::ContainsIdentity { dn: "uid=jdoe,ou=People,dc=example".to_string() })
        );
        assert!(identity_guard(&pwd("x!jdoe"), &subject).is_err());
    }

    #[test]
    fn test_identity_guard_case_sensitive() {
        let subject = Subject::from_dn("uid=jdoe,dc=example");
        assert_eq!(identity_guard(&pwd("JDoe12345!"), &subject), Ok(()));
    }

    #[test]
    fn test_identity_guard_no_name_skips() {
        let subject = Subject::from_dn("");
        assert_eq!(identity_guard(&pwd("anything!1"), &subject), Ok(()));
    }
}
