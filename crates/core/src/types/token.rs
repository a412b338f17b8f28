//! Owner token type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// The fixed allow-list of owner tokens.
///
/// These five literals are the only identities the system knows. There is
/// no generation, rotation, or expiry - a token either is in this list or
/// it is rejected.
pub const PREDEFINED_TOKENS: [&str; 5] = [
    "EYEWEAR21",
    "VISION48X",
    "OPTICS92Z",
    "LENSES73Y",
    "GLASSES05",
];

/// Errors that can occur when parsing a [`Token`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// The input string is empty.
    #[error("token cannot be empty")]
    Empty,
    /// The input string is not in the allow-list.
    #[error("token is not recognized")]
    Unknown,
}

/// An owner token drawn from the fixed allow-list.
///
/// A `Token` identifies one independent usage history. Membership is an
/// exact, case-sensitive comparison against [`PREDEFINED_TOKENS`]; any
/// non-member string, including empty or malformed input, is rejected.
///
/// ## Examples
///
/// ```
/// use oculog_core::Token;
///
/// assert!(Token::parse("EYEWEAR21").is_ok());
///
/// assert!(Token::parse("").is_err());          // empty
/// assert!(Token::parse("eyewear21").is_err()); // case-sensitive
/// assert!(Token::parse("ABC123").is_err());    // not in the list
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    /// Parse a `Token` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty or is not one of the five
    /// predefined tokens.
    pub fn parse(s: &str) -> Result<Self, TokenError> {
        if s.is_empty() {
            return Err(TokenError::Empty);
        }

        if !PREDEFINED_TOKENS.contains(&s) {
            return Err(TokenError::Unknown);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Token` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Whether a string is a member of the token allow-list.
///
/// Convenience for callers that only need the boolean answer; prefer
/// [`Token::parse`] when the token travels further.
#[must_use]
pub fn is_valid_token(s: &str) -> bool {
    Token::parse(s).is_ok()
}
