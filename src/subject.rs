//! The directory entry whose password is being changed.

/// Longest DN prefix considered when extracting the account name.
const DN_MAXLEN: usize = 511;

/// Entry supplied by the host for one validation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    /// Name shown in rejection messages, usually the entry DN as written.
    pub display_name: String,
    /// Normalized DN used for account name extraction.
    pub dn: String,
}

impl Subject {
    pub fn new(display_name: impl Into<String>, dn: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            dn: dn.into(),
        }
    }

    /// Subject whose display name and normalized DN are the same string.
    pub fn from_dn(dn: impl Into<String>) -> Self {
        let dn = dn.into();
        Self {
            display_name: dn.clone(),
            dn,
        }
    }

    /// Value of the first RDN, e.g. `jdoe` for `uid=jdoe,ou=people,dc=example`.
    ///
    /// Multi-valued RDNs contribute only their first attribute. Returns
    /// `None` when the DN is empty or the first RDN carries no value.
    pub fn account_name(&self) -> Option<&str> {
        let dn = truncate(&self.dn, DN_MAXLEN);
        let rdn = dn.split([',', '+']).find(|s| !s.is_empty())?;
        rdn.split('=').filter(|s| !s.is_empty()).nth(1)
    }
}

fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
