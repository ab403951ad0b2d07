//! Strength scorer - one quality point per satisfied character class.

use secrecy::{ExposeSecret, SecretString};
use super::GuardResult;
use crate::class::CharClass;
use crate::config::EffectiveConfig;
use crate::result::Rejection;

/// Minimum occurrences required per character class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassMinimums {
    pub lower: u32,
    pub upper: u32,
    pub digit: u32,
    pub punct: u32,
}

impl From<&EffectiveConfig> for ClassMinimums {
    fn from(config: &EffectiveConfig) -> Self {
        Self {
            lower: config.min_lower,
            upper: config.min_upper,
            digit: config.min_digit,
            punct: config.min_punct,
        }
    }
}

/// Running tally of a single left-to-right scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreState {
    pub quality_points: u32,
    pub remaining_lower: i64,
    pub remaining_upper: i64,
    pub remaining_digit: i64,
    pub remaining_punct: i64,
    pub seen_lower: bool,
    pub seen_upper: bool,
    pub seen_digit: bool,
    pub seen_punct: bool,
}

impl ScoreState {
    pub fn new(minimums: ClassMinimums) -> Self {
        Self {
            quality_points: 0,
            remaining_lower: i64::from(minimums.lower),
            remaining_upper: i64::from(minimums.upper),
            remaining_digit: i64::from(minimums.digit),
            remaining_punct: i64::from(minimums.punct),
            seen_lower: false,
            seen_upper: false,
            seen_digit: false,
            seen_punct: false,
        }
    }

    /// Scores a whole password.
    pub fn scan(password: &str, minimums: ClassMinimums) -> Self {
        let mut state = Self::new(minimums);
        for c in password.chars() {
            state.observe(CharClass::of(c));
        }
        state
    }

    /// Counts one character. A class earns its point the first time its
    /// remaining count drops to zero or below; later characters of that
    /// class earn nothing.
    pub fn observe(&mut self, class: CharClass) {
        let (remaining, seen) = match class {
            CharClass::Lower => (&mut self.remaining_lower, &mut self.seen_lower),
            CharClass::Upper => (&mut self.remaining_upper, &mut self.seen_upper),
            CharClass::Digit => (&mut self.remaining_digit, &mut self.seen_digit),
            CharClass::Punct => (&mut self.remaining_punct, &mut self.seen_punct),
            CharClass::Other => return,
        };

        *remaining -= 1;
        if !*seen && *remaining < 1 {
            *seen = true;
            self.quality_points += 1;
        }
    }

    /// True while some class still lacks required characters.
    pub fn has_unmet_minimum(&self) -> bool {
        self.remaining_lower > 0
            || self.remaining_upper > 0
            || self.remaining_digit > 0
            || self.remaining_punct > 0
    }
}

/// Rejects the password when a per-class minimum is unmet or the quality
/// score falls below `min_points`.
pub fn strength_guard(
    password: &SecretString,
    minimums: ClassMinimums,
    min_points: u32,
    dn: &str,
) -> GuardResult {
    let state = ScoreState::scan(password.expose_secret(), minimums);

    #[cfg(feature = "tracing")]
    tracing::debug!(
        remaining_lower = state.remaining_lower,
        remaining_upper = state.remaining_upper,
        remaining_digit = state.remaining_digit,
        remaining_punct = state.remaining_punct,
        quality = state.quality_points,
        min_points,
        "Strength scan finished"
    );

    if state.has_unmet_minimum() || state.quality_points < min_points {
        return Err(Rejection::Quality {
            dn: dn.to_string(),
            achieved: state.quality_points,
            required: min_points,
        });
    }
    Ok(())
}
