//! Answer letters.

use std::fmt::{self, Display};

/// An uppercase ASCII letter `A`-`Z`.
///
/// Every solution letter in a puzzle and every letter a player enters is a `Letter`,
/// so lowercase input is normalized once at the boundary and never compared later.
///
/// # Examples
///
/// ```
/// use crossword_core::Letter;
///
/// let letter = Letter::from_char('q').unwrap();
/// assert_eq!(letter.as_char(), 'Q');
/// assert_eq!(Letter::from_char('Q'), Some(letter));
///
/// assert_eq!(Letter::from_char('7'), None);
/// assert_eq!(Letter::from_char('é'), None);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(try_from = "char", into = "char")]
pub struct Letter(u8);

impl Letter {
    /// Converts an ASCII letter of either case, normalizing to uppercase.
    ///
    /// Returns `None` for anything that is not `a-z` or `A-Z`.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        if c.is_ascii_alphabetic() {
            #[allow(clippy::cast_possible_truncation)]
            let byte = c as u8;
            Some(Self(byte.to_ascii_uppercase()))
        } else {
            None
        }
    }

    /// Returns the letter as an uppercase `char`.
    #[must_use]
    pub const fn as_char(self) -> char {
        self.0 as char
    }

    /// Parses every character of `word` as a letter.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidLetterError`] for the first character that is not an ASCII
    /// letter.
    pub fn parse_word(word: &str) -> Result<Vec<Self>, InvalidLetterError> {
        word.chars().map(Self::try_from).collect()
    }
}

impl Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Error returned for a character that is not an ASCII letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid letter {ch:?}")]
pub struct InvalidLetterError {
    ch: char,
}

impl InvalidLetterError {
    /// Returns the rejected character.
    #[must_use]
    pub fn ch(&self) -> char {
        self.ch
    }
}

impl TryFrom<char> for Letter {
    type Error = InvalidLetterError;

    fn try_from(ch: char) -> Result<Self, Self::Error> {
        Self::from_char(ch).ok_or(InvalidLetterError { ch })
    }
}

impl From<Letter> for char {
    fn from(letter: Letter) -> Self {
        letter.as_char()
    }
}
