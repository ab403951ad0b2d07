//! Character classes used by the run-length guard and the strength scorer.

/// The class a single password character falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    Lower,
    Upper,
    Digit,
    Punct,
    /// Whitespace, control characters and anything outside ASCII.
    Other,
}

impl CharClass {
    /// Classifies one character using the ASCII notions of letter case,
    /// decimal digit and punctuation.
    pub fn of(c: char) -> Self {
        if c.is_ascii_lowercase() {
            CharClass::Lower
        } else if c.is_ascii_uppercase() {
            CharClass::Upper
        } else if c.is_ascii_digit() {
            CharClass::Digit
        } else if c.is_ascii_punctuation() {
            CharClass::Punct
        } else {
            CharClass::Other
        }
    }
}
