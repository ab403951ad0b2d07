//! Weak-password dictionary
//!
//! The dictionary is an injected capability: the validator only sees the
//! [`WeakPasswordOracle`] trait. [`WordlistFile`] is the stock oracle backed
//! by a plain word list, one entry per line.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming the word list used by [`WordlistFile::from_env`].
pub const DICTIONARY_PATH_ENV: &str = "PWDCHECK_DICTIONARY_PATH";

pub const DEFAULT_DICTIONARY_PATH: &str = "/usr/share/pwdcheck/words.txt";

#[derive(Error, Debug)]
pub enum DictionaryError {
    #[error("Dictionary file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Failed to read dictionary file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Dictionary file is empty")]
    EmptyFile,
}

/// Answer from a dictionary lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OracleVerdict {
    /// No match.
    Clear,
    /// Known weak password, with a short reason such as
    /// "it is based on a dictionary word".
    Weak(String),
    /// Backing data missing or unreadable. The check is skipped.
    Unavailable(String),
}

/// Something that can flag known-weak passwords.
pub trait WeakPasswordOracle: Send + Sync {
    fn check(&self, password: &str) -> OracleVerdict;
}

impl<F> WeakPasswordOracle for F
where
    F: Fn(&str) -> OracleVerdict + Send + Sync,
{
    fn check(&self, password: &str) -> OracleVerdict {
        self(password)
    }
}

/// Returns the dictionary file path.
///
/// Priority:
/// 1. Environment variable `PWDCHECK_DICTIONARY_PATH`
/// 2. Default path `/usr/share/pwdcheck/words.txt`
pub fn get_dictionary_path() -> PathBuf {
    std::env::var(DICTIONARY_PATH_ENV)
        .ok()
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DICTIONARY_PATH))
}

/// In-memory, case-insensitive word list.
#[derive(Debug, Clone, Default)]
pub struct Wordlist {
    words: HashSet<String>,
}

impl Wordlist {
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// Loads a word list from a file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File does not exist
    /// - File cannot be read
    /// - File is empty
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DictionaryError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(DictionaryError::FileNotFound(path.to_path_buf()));
        }

        let bytes = std::fs::read(path)?;
        let content = String::from_utf8_lossy(&bytes);

        if content.trim().is_empty() {
            return Err(DictionaryError::EmptyFile);
        }

        let list = Self::from_words(content.lines());

        #[cfg(feature = "tracing")]
        tracing::debug!("Dictionary loaded: {} words from {:?}", list.len(), path);

        Ok(list)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }
}

impl WeakPasswordOracle for Wordlist {
    fn check(&self, password: &str) -> OracleVerdict {
        let lowered = password.to_lowercase();
        if self.words.contains(&lowered) {
            return OracleVerdict::Weak("it is based on a dictionary word".to_string());
        }

        let reversed: String = lowered.chars().rev().collect();
        if self.words.contains(&reversed) {
            return OracleVerdict::Weak("it is based on a (reversed) dictionary word".to_string());
        }

        OracleVerdict::Clear
    }
}

/// Oracle that reads its word list from disk on every query, so a list
/// installed or removed while the host runs is picked up.
#[derive(Debug, Clone)]
pub struct WordlistFile {
    /// `None` looks the path up with [`get_dictionary_path`] on every query.
    path: Option<PathBuf>,
}

impl WordlistFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Follows `PWDCHECK_DICTIONARY_PATH`, read at query time.
    pub fn from_env() -> Self {
        Self { path: None }
    }

    /// Path the next query will read.
    pub fn path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(get_dictionary_path)
    }
}

impl WeakPasswordOracle for WordlistFile {
    fn check(&self, password: &str) -> OracleVerdict {
        match Wordlist::load(self.path()) {
            Ok(list) => list.check(password),
            Err(e) => OracleVerdict::Unavailable(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper to safely set env var in tests
    fn set_env(key: &str, value: &str) {
        // SAFETY: This is only for testing purposes in single-threaded test context
        unsafe { std::env::set_var(key, value); }
    }

    /// Helper to safely remove env var in tests
    fn remove_env(key: &str) {
        // SAFETY: This is only for testing purposes in single-threaded test context
        unsafe { std::env::remove_var(key); }
    }

    fn setup_with_tempfile(words: &[&str]) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        for word in words {
            writeln!(temp_file, "{}", word).expect("Failed to write");
        }
        temp_file
    }

    #[test]
    #[serial]
    fn test_get_dictionary_path_default() {
        remove_env(DICTIONARY_PATH_ENV);
        assert_eq!(get_dictionary_path(), PathBuf::from(DEFAULT_DICTIONARY_PATH));
    }

    #[test]
    #[serial]
    fn test_get_dictionary_path_from_env() {
        set_env(DICTIONARY_PATH_ENV, "/custom/words.txt");
        assert_eq!(get_dictionary_path(), PathBuf::from("/custom/words.txt"));
        remove_env(DICTIONARY_PATH_ENV);
    }

    #[test]
    fn test_load_file_not_found() {
        let result = Wordlist::load("/nonexistent/path/words.txt");
        assert!(matches!(result, Err(DictionaryError::FileNotFound(_))));
    }

    #[test]
    fn test_load_empty_file() {
        let temp_file = setup_with_tempfile(&["", "   "]);
        let result = Wordlist::load(temp_file.path());
        assert!(matches!(result, Err(DictionaryError::EmptyFile)));
    }

    #[test]
    fn test_load_success() {
        let temp_file = setup_with_tempfile(&["password123", "Qwerty", "qwerty", ""]);
        let list = Wordlist::load(temp_file.path()).expect("Failed to load");
        assert_eq!(list.len(), 2);
        assert!(list.contains("QWERTY"));
    }

    #[test]
    fn test_wordlist_match_is_case_insensitive() {
        let list = Wordlist::from_words(["monkey123"]);
        assert_eq!(
            list.check("MonKey123"),
            OracleVerdict::Weak("it is based on a dictionary word".to_string())
        );
    }

    #[test]
    fn test_wordlist_reversed_match() {
        let list = Wordlist::from_words(["dragon"]);
        assert_eq!(
            list.check("nogard"),
            OracleVerdict::Weak("it is based on a (reversed) dictionary word".to_string())
        );
    }

    #[test]
    fn test_wordlist_clear() {
        let list = Wordlist::from_words(["dragon"]);
        assert_eq!(list.check("CorrectHorse9!"), OracleVerdict::Clear);
    }

    #[test]
    fn test_wordlist_file_unavailable() {
        let oracle = WordlistFile::new("/nonexistent/path/words.txt");
        assert!(matches!(oracle.check("anything"), OracleVerdict::Unavailable(_)));
    }

    #[test]
    fn test_wordlist_file_reads_per_query() {
        let temp_file = setup_with_tempfile(&["letmein"]);
        let oracle = WordlistFile::new(temp_file.path());
        assert!(matches!(oracle.check("letmein"), OracleVerdict::Weak(_)));

        let path = temp_file.path().to_path_buf();
        drop(temp_file);
        assert_eq!(oracle.path(), path);
        assert!(matches!(oracle.check("letmein"), OracleVerdict::Unavailable(_)));
    }

    #[test]
    #[serial]
    fn test_wordlist_file_from_env_follows_variable() {
        let temp_file = setup_with_tempfile(&["letmein"]);
        set_env(DICTIONARY_PATH_ENV, "/nonexistent/path/words.txt");

        let oracle = WordlistFile::from_env();
        assert!(matches!(oracle.check("letmein"), OracleVerdict::Unavailable(_)));

        set_env(DICTIONARY_PATH_ENV, temp_file.path().to_str().unwrap());
        assert_eq!(oracle.path(), temp_file.path().to_path_buf());
        assert!(matches!(oracle.check("letmein"), OracleVerdict::Weak(_)));

        remove_env(DICTIONARY_PATH_ENV);
    }

    #[test]
    fn test_closure_oracle() {
        let oracle = |pw: &str| {
            if pw.starts_with("abc") {
                OracleVerdict::Weak("it is too simplistic/systematic".to_string())
            } else {
                OracleVerdict::Clear
            }
        };
        assert!(matches!(oracle.check("abcdef"), OracleVerdict::Weak(_)));
        assert_eq!(oracle.check("zyx"), OracleVerdict::Clear);
    }
}
