//! Password quality checker for directory servers
//!
//! Validates a proposed password before the directory stores it and,
//! when refusing it, reports exactly one human-readable reason.
//!
//! Checks run in a fixed order and stop at the first failure:
//!
//! 1. at least six characters
//! 2. no overlong run of one character class (`max_consecutive_per_class`)
//! 3. per-class minimums and quality points (`min_lower`, `min_upper`,
//!    `min_digit`, `min_punct`, `min_points`)
//! 4. weak-password dictionary (`use_cracklib`)
//! 5. account name not contained in the password (`contains_username`)
//!
//! # Features
//!
//! - `async` (default): Enables [`validate_tx`] on tokio's blocking pool
//! - `tracing`: Enables logging via tracing crate
//!
//! # Environment Variables
//!
//! - `PWDCHECK_MODULE_CONFIG_FILE`: Custom path to the configuration file
//!   (default: `/etc/openldap/check_password.conf`)
//! - `PWDCHECK_DICTIONARY_PATH`: Custom path to the word list
//!   (default: `/usr/share/pwdcheck/words.txt`)
//!
//! # Example
//!
//! ```rust,no_run
//! use pwd_check::{Subject, Validator};
//! use secrecy::SecretString;
//!
//! let validator = Validator::new();
//! let subject = Subject::from_dn("uid=jdoe,ou=people,dc=example,dc=com");
//! let password = SecretString::new("MyP@ssw0rd!".to_string().into());
//!
//! let result = validator.validate(&password, &subject, Some("min_points 4"));
//! if let Some(message) = result.message() {
//!     println!("Rejected: {}", message);
//! }
//! ```

mod class;
mod config;
mod dictionary;
mod guards;
mod result;
mod subject;
mod validator;

// Public API
pub use class::CharClass;
pub use config::{
    CONFIG_PATH_ENV, ConfigError, ConfigLayer, DEFAULT_CONFIG_PATH, EffectiveConfig, Tunable,
    get_config_path, parse_bool, parse_int, read_config_file, resolve,
};
pub use dictionary::{
    DEFAULT_DICTIONARY_PATH, DICTIONARY_PATH_ENV, DictionaryError, OracleVerdict,
    WeakPasswordOracle, Wordlist, WordlistFile, get_dictionary_path,
};
pub use guards::{ClassMinimums, ScoreState};
pub use result::{MIN_PASSWORD_LENGTH, Rejection, RejectionKind, ResultCode, ValidationResult};
pub use subject::Subject;
pub use validator::Validator;

#[cfg(feature = "async")]
pub use validator::validate_tx;
