//! Configuration resolution
//!
//! Tunables come from three layers: built-in defaults, the configuration
//! file and an optional per-call override string supplied by the host.
//! Both text layers share the same syntax, one `key value` directive per
//! line. Resolution is a pure function producing an [`EffectiveConfig`]
//! that lives only for the duration of one validation call.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_ENV: &str = "PWDCHECK_MODULE_CONFIG_FILE";

/// Configuration file used when [`CONFIG_PATH_ENV`] is unset or empty.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/openldap/check_password.conf";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),
}

/// A recognized configuration key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tunable {
    MinPoints,
    UseCracklib,
    MinUpper,
    MinLower,
    MinDigit,
    MinPunct,
    MaxConsecutivePerClass,
    ContainsUsername,
}

impl Tunable {
    pub const ALL: [Tunable; 8] = [
        Tunable::MinPoints,
        Tunable::UseCracklib,
        Tunable::MinUpper,
        Tunable::MinLower,
        Tunable::MinDigit,
        Tunable::MinPunct,
        Tunable::MaxConsecutivePerClass,
        Tunable::ContainsUsername,
    ];

    /// Key as written in configuration text.
    pub fn key(self) -> &'static str {
        match self {
            Tunable::MinPoints => "min_points",
            Tunable::UseCracklib => "use_cracklib",
            Tunable::MinUpper => "min_upper",
            Tunable::MinLower => "min_lower",
            Tunable::MinDigit => "min_digit",
            Tunable::MinPunct => "min_punct",
            Tunable::MaxConsecutivePerClass => "max_consecutive_per_class",
            Tunable::ContainsUsername => "contains_username",
        }
    }

    pub fn default_value(self) -> &'static str {
        match self {
            Tunable::MinPoints => "3",
            Tunable::UseCracklib => "1",
            Tunable::MinUpper | Tunable::MinLower | Tunable::MinDigit | Tunable::MinPunct => "0",
            Tunable::MaxConsecutivePerClass => "5",
            Tunable::ContainsUsername => "false",
        }
    }

    /// Looks up a key. Unknown keys yield `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        if key == "use_dictionary" {
            return Some(Tunable::UseCracklib);
        }
        Tunable::ALL.into_iter().find(|t| t.key() == key)
    }
}

/// Raw values set by one configuration source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigLayer {
    values: HashMap<Tunable, String>,
}

impl ConfigLayer {
    /// Parses configuration text.
    ///
    /// Lines with fewer than two whitespace-separated tokens and lines with
    /// unknown keys are skipped. Tokens past the value are ignored. When a
    /// key repeats, the last occurrence wins.
    pub fn parse(text: &str) -> Self {
        let mut values = HashMap::new();

        for line in text.lines() {
            let mut tokens = line.split_whitespace();
            let (Some(key), Some(value)) = (tokens.next(), tokens.next()) else {
                continue;
            };

            match Tunable::from_key(key) {
                Some(tunable) => {
                    values.insert(tunable, value.to_string());
                }
                None => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!("Ignoring unknown config key '{}'", key);
                }
            }
        }

        Self { values }
    }

    pub fn get(&self, tunable: Tunable) -> Option<&str> {
        self.values.get(&tunable).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Resolved settings for a single validation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectiveConfig {
    /// Quality points the password must reach.
    pub min_points: u32,
    /// Consult the weak-password dictionary.
    pub use_dictionary: bool,
    pub min_lower: u32,
    pub min_upper: u32,
    pub min_digit: u32,
    pub min_punct: u32,
    /// Longest allowed run of one character class. `None` disables the check.
    pub max_consecutive_per_class: Option<u32>,
    /// Reject passwords containing the account name.
    pub reject_if_contains_identity: bool,
}

impl Default for EffectiveConfig {
    fn default() -> Self {
        resolve(None, None)
    }
}

/// Merges the layers into an [`EffectiveConfig`].
///
/// For every tunable the per-call layer wins over the file layer, which
/// wins over the built-in default.
pub fn resolve(file: Option<&ConfigLayer>, per_call: Option<&ConfigLayer>) -> EffectiveConfig {
    let raw = |tunable: Tunable| {
        per_call
            .and_then(|layer| layer.get(tunable))
            .or_else(|| file.and_then(|layer| layer.get(tunable)))
            .unwrap_or_else(|| tunable.default_value())
    };
    let int = |tunable: Tunable| {
        let value = raw(tunable);
        let parsed = parse_int(value);
        if parsed.is_none() {
            #[cfg(feature = "tracing")]
            tracing::warn!("Config value '{}' for {} is not a number, treating as unset", value, tunable.key());
        }
        parsed
    };
    let count = |tunable: Tunable| -> u32 { int(tunable).map(clamp_u32).unwrap_or(0) };

    let config = EffectiveConfig {
        min_points: count(Tunable::MinPoints),
        use_dictionary: parse_bool(raw(Tunable::UseCracklib)),
        min_lower: count(Tunable::MinLower),
        min_upper: count(Tunable::MinUpper),
        min_digit: count(Tunable::MinDigit),
        min_punct: count(Tunable::MinPunct),
        max_consecutive_per_class: int(Tunable::MaxConsecutivePerClass)
            .filter(|&n| n > 0)
            .map(clamp_u32),
        reject_if_contains_identity: parse_bool(raw(Tunable::ContainsUsername)),
    };

    #[cfg(feature = "tracing")]
    tracing::debug!(?config, "Resolved password check configuration");

    config
}

/// `true` and `1` (any case) are true; everything else is false.
pub fn parse_bool(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value == "1"
}

/// Permissive integer parser.
///
/// Skips leading whitespace, accepts an optional sign and reads digits up
/// to the first non-digit. Returns `None` when no digit is found.
/// Out-of-range values saturate.
pub fn parse_int(value: &str) -> Option<i64> {
    let s = value.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut seen = false;
    let mut n: i64 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        seen = true;
        let d = i64::from(b - b'0');
        n = if negative {
            n.saturating_mul(10).saturating_sub(d)
        } else {
            n.saturating_mul(10).saturating_add(d)
        };
    }

    seen.then_some(n)
}

fn clamp_u32(n: i64) -> u32 {
    u32::try_from(n.max(0)).unwrap_or(u32::MAX)
}

/// Returns the configuration file path.
///
/// Priority:
/// 1. Environment variable `PWDCHECK_MODULE_CONFIG_FILE` (when non-empty)
/// 2. Default path `/etc/openldap/check_password.conf`
pub fn get_config_path() -> PathBuf {
    std::env::var(CONFIG_PATH_ENV)
        .ok()
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Reads the configuration file at `path`.
///
/// # Errors
///
/// Returns error if the file does not exist or cannot be read. Bytes that
/// are not valid UTF-8 are replaced, so one bad line does not discard the
/// others.
pub fn read_config_file<P: AsRef<Path>>(path: P) -> Result<String, ConfigError> {
    let path = path.as_ref();

    #[cfg(feature = "tracing")]
    tracing::debug!("Reading config file {:?}", path);

    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }

    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
