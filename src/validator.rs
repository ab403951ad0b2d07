//! Password validator - runs the guards in order for one password change.

use std::path::PathBuf;

use secrecy::SecretString;

#[cfg(feature = "async")]
use std::sync::Arc;

#[cfg(feature = "async")]
use tokio::sync::mpsc;

use crate::config::{ConfigLayer, EffectiveConfig, get_config_path, read_config_file, resolve};
use crate::dictionary::{WeakPasswordOracle, WordlistFile};
use crate::guards::{
    ClassMinimums, GuardResult, dictionary_guard, identity_guard, length_guard, run_length_guard,
    strength_guard,
};
use crate::result::ValidationResult;
use crate::subject::Subject;

/// Where the file configuration layer comes from.
#[derive(Debug, Clone)]
enum ConfigSource {
    /// Path from `PWDCHECK_MODULE_CONFIG_FILE`, looked up on every call.
    Env,
    File(PathBuf),
    Inline(ConfigLayer),
    Defaults,
}

/// Checks proposed passwords against the configured quality rules.
///
/// The validator holds no per-call state: every call reads the file
/// layer afresh and resolves its own [`EffectiveConfig`], so one validator
/// can serve concurrent calls.
pub struct Validator {
    config_source: ConfigSource,
    oracle: Option<Box<dyn WeakPasswordOracle>>,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Validator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Validator")
            .field("config_source", &self.config_source)
            .field("oracle", &self.oracle.is_some())
            .finish()
    }
}

impl Validator {
    /// Validator reading its configuration file and word list from the
    /// paths named by the environment. Both variables are looked up on
    /// every call.
    pub fn new() -> Self {
        Self {
            config_source: ConfigSource::Env,
            oracle: Some(Box::new(WordlistFile::from_env())),
        }
    }

    /// Reads the file layer from `path` instead of the environment.
    pub fn config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_source = ConfigSource::File(path.into());
        self
    }

    pub fn config_from_env(mut self) -> Self {
        self.config_source = ConfigSource::Env;
        self
    }

    /// Uses `text` as the file layer without touching the filesystem.
    pub fn config_text(mut self, text: &str) -> Self {
        self.config_source = ConfigSource::Inline(ConfigLayer::parse(text));
        self
    }

    /// Skips the file layer entirely.
    pub fn defaults_only(mut self) -> Self {
        self.config_source = ConfigSource::Defaults;
        self
    }

    pub fn oracle(mut self, oracle: impl WeakPasswordOracle + 'static) -> Self {
        self.oracle = Some(Box::new(oracle));
        self
    }

    /// Drops the dictionary; `use_cracklib` then has no effect.
    pub fn without_oracle(mut self) -> Self {
        self.oracle = None;
        self
    }

    /// Resolves the configuration a call with `per_call_override` would use.
    pub fn effective_config(&self, per_call_override: Option<&str>) -> EffectiveConfig {
        let file = self.file_layer();
        let per_call = per_call_override
            .map(ConfigLayer::parse)
            .filter(|layer| !layer.is_empty());
        resolve(file.as_ref(), per_call.as_ref())
    }

    fn file_layer(&self) -> Option<ConfigLayer> {
        let path = match &self.config_source {
            ConfigSource::Env => get_config_path(),
            ConfigSource::File(path) => path.clone(),
            ConfigSource::Inline(layer) => return Some(layer.clone()),
            ConfigSource::Defaults => return None,
        };

        match read_config_file(&path) {
            Ok(text) => Some(ConfigLayer::parse(&text)),
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!("Could not read config file {:?} ({}). Using defaults.", path, _e);
                None
            }
        }
    }

    /// Validates `password` for `subject`.
    ///
    /// `per_call_override` uses the configuration file syntax and takes
    /// precedence over it. The first failing guard decides the result:
    /// length, consecutive classes, strength, dictionary, username.
    pub fn validate(
        &self,
        password: &SecretString,
        subject: &Subject,
        per_call_override: Option<&str>,
    ) -> ValidationResult {
        let dn = subject.display_name.as_str();

        // Below six characters the dictionary cannot judge, so this runs
        // before any configuration is read.
        if let Err(rejection) = length_guard(password, dn) {
            return ValidationResult::reject(rejection);
        }

        let config = self.effective_config(per_call_override);

        let run_length = || run_length_guard(password, config.max_consecutive_per_class, dn);
        let strength = || strength_guard(password, ClassMinimums::from(&config), config.min_points, dn);
        let dictionary = || -> GuardResult {
            match (&self.oracle, config.use_dictionary) {
                (Some(oracle), true) => dictionary_guard(password, &**oracle, dn),
                _ => Ok(()),
            }
        };
        let identity = || -> GuardResult {
            if config.reject_if_contains_identity {
                identity_guard(password, subject)
            } else {
                Ok(())
            }
        };

        // Orchestrator: execute guards in sequence
        let guards: [(&str, &dyn Fn() -> GuardResult); 4] = [
            ("run_length", &run_length),
            ("strength", &strength),
            ("dictionary", &dictionary),
            ("identity", &identity),
        ];

        for (_guard_name, guard) in guards {
            if let Err(rejection) = guard() {
                #[cfg(feature = "tracing")]
                tracing::info!("Password for dn={} rejected by {} guard", dn, _guard_name);
                return ValidationResult::reject(rejection);
            }
        }

        ValidationResult::accept()
    }
}

/// Async version that validates on the blocking pool and sends the result
/// via channel.
///
/// Nothing is sent if validation panics; the receiver sees the channel
/// close instead.
#[cfg(feature = "async")]
pub async fn validate_tx(
    validator: Arc<Validator>,
    password: SecretString,
    subject: Subject,
    per_call_override: Option<String>,
    tx: mpsc::Sender<ValidationResult>,
) {
    let joined = tokio::task::spawn_blocking(move || {
        validator.validate(&password, &subject, per_call_override.as_deref())
    })
    .await;

    match joined {
        Ok(result) => {
            if let Err(_e) = tx.send(result).await {
                #[cfg(feature = "tracing")]
                tracing::error!("Failed to send password validation result: {}", _e);
            }
        }
        Err(_e) => {
            #[cfg(feature = "tracing")]
            tracing::error!("Password validation task failed: {}", _e);
        }
    }
}


#[cfg(all(test, feature = "async"))]
mod async_tests {
    use super::*;
    use crate::dictionary::Wordlist;
    use crate::result::RejectionKind;

    fn pwd(s: &str) -> SecretString {
        SecretString::new(s.to_string().into())
    }

    #[tokio::test]
    async fn test_validate_tx() {
        let validator = Arc::new(Validator::new().defaults_only().oracle(Wordlist::from_words(["letmein"])));
        let (tx, mut rx) = mpsc::channel(2);

        validate_tx(validator.clone(), pwd("aB3!xy"), Subject::from_dn("uid=jdoe"), None, tx.clone()).await;
        validate_tx(validator, pwd("aaaaaa"), Subject::from_dn("uid=jdoe"), None, tx).await;

        let first = rx.recv().await.expect("Should receive result");
        assert!(first.is_accepted());
        let second = rx.recv().await.expect("Should receive result");
        assert_eq!(second.kind(), Some(RejectionKind::ConsecutiveClass));
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_validate_tx_override() {
        let validator = Arc::new(Validator::new().defaults_only().without_oracle());
        let (tx, mut rx) = mpsc::channel(1);

        validate_tx(
            validator,
            pwd("abcde12"),
            Subject::from_dn("uid=jdoe"),
            Some("min_points 2".to_string()),
            tx,
        )
        .await;

        let result = rx.recv().await.expect("Should receive result");
        assert!(result.is_accepted());
    }
}
