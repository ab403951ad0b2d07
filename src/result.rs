//! Outcome of a validation call.

use thiserror::Error;

/// Shortest password accepted, independent of configuration.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Why a password was refused. `Display` renders the text handed back to
/// the directory client.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("Password for dn=\"{dn}\" is too short ({length}/6)")]
    TooShort { dn: String, length: usize },

    #[error("Too many consecutive characters in the same character class for dn=\"{dn}\"")]
    ConsecutiveClass { dn: String },

    #[error(
        "Password for dn=\"{dn}\" does not pass required number of strength checks \
         for the required character sets ({achieved} of {required})"
    )]
    Quality { dn: String, achieved: u32, required: u32 },

    #[error("Bad password for dn=\"{dn}\" because {reason}")]
    Dictionary { dn: String, reason: String },

    #[error("Bad password for dn=\"{dn}\" because it contains the username")]
    ContainsIdentity { dn: String },
}

/// Tag identifying a [`Rejection`] without its fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectionKind {
    TooShort,
    ConsecutiveClass,
    Quality,
    Dictionary,
    ContainsIdentity,
}

impl Rejection {
    pub fn kind(&self) -> RejectionKind {
        match self {
            Rejection::TooShort { .. } => RejectionKind::TooShort,
            Rejection::ConsecutiveClass { .. } => RejectionKind::ConsecutiveClass,
            Rejection::Quality { .. } => RejectionKind::Quality,
            Rejection::Dictionary { .. } => RejectionKind::Dictionary,
            Rejection::ContainsIdentity { .. } => RejectionKind::ContainsIdentity,
        }
    }

    /// Display name of the entry the rejection refers to.
    pub fn dn(&self) -> &str {
        match self {
            Rejection::TooShort { dn, .. }
            | Rejection::ConsecutiveClass { dn }
            | Rejection::Quality { dn, .. }
            | Rejection::Dictionary { dn, .. }
            | Rejection::ContainsIdentity { dn } => dn,
        }
    }
}

/// Integer status returned to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ResultCode {
    Success = 0,
    Failure = 1,
}

impl From<ResultCode> for i32 {
    fn from(code: ResultCode) -> Self {
        code as i32
    }
}

/// Accept, or reject with exactly one reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    rejection: Option<Rejection>,
}

impl ValidationResult {
    pub fn accept() -> Self {
        Self { rejection: None }
    }

    pub fn reject(rejection: Rejection) -> Self {
        Self {
            rejection: Some(rejection),
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.rejection.is_none()
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        self.rejection.as_ref()
    }

    pub fn kind(&self) -> Option<RejectionKind> {
        self.rejection.as_ref().map(Rejection::kind)
    }

    /// Rendered diagnostic, `None` when accepted.
    pub fn message(&self) -> Option<String> {
        self.rejection.as_ref().map(ToString::to_string)
    }

    pub fn code(&self) -> ResultCode {
        if self.is_accepted() {
            ResultCode::Success
        } else {
            ResultCode::Failure
        }
    }
}

impl From<Result<(), Rejection>> for ValidationResult {
    fn from(result: Result<(), Rejection>) -> Self {
        match result {
            Ok(()) => Self::accept(),
            Err(rejection) => Self::reject(rejection),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let dn = "uid=jdoe,dc=example".to_string();
        assert_eq!(
            Rejection::TooShort { dn: dn.clone(), length: 4 }.to_string(),
            "Password for dn=\"uid=jdoe,dc=example\" is too short (4/6)"
        );
        assert_eq!(
            Rejection::ConsecutiveClass { dn: dn.clone() }.to_string(),
            "Too many consecutive characters in the same character class for dn=\"uid=jdoe,dc=example\""
        );
        assert_eq!(
            Rejection::Quality { dn: dn.clone(), achieved: 1, required: 3 }.to_string(),
            "Password for dn=\"uid=jdoe,dc=example\" does not pass required number of strength checks for the required character sets (1 of 3)"
        );
        assert_eq!(
            Rejection::Dictionary { dn: dn.clone(), reason: "it is based on a dictionary word".to_string() }.to_string(),
            "Bad password for dn=\"uid=jdoe,dc=example\" because it is based on a dictionary word"
        );
        assert_eq!(
            Rejection::ContainsIdentity { dn }.to_string(),
            "Bad password for dn=\"uid=jdoe,dc=example\" because it contains the username"
        );
    }

    #[test]
    fn test_result_accessors() {
        let ok = ValidationResult::accept();
        assert!(ok.is_accepted());
        assert_eq!(ok.code(), ResultCode::Success);
        assert_eq!(ok.message(), None);
        assert_eq!(i32::from(ok.code()), 0);

        let rejected = ValidationResult::reject(Rejection::ConsecutiveClass { dn: "cn=x".to_string() });
        assert!(!rejected.is_accepted());
        assert_eq!(rejected.code(), ResultCode::Failure);
        assert_eq!(i32::from(rejected.code()), 1);
        assert_eq!(rejected.kind(), Some(RejectionKind::ConsecutiveClass));
        assert_eq!(rejected.rejection().map(Rejection::dn), Some("cn=x"));
    }
}
