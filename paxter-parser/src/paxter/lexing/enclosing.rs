//! Enclosing patterns
//!
//!     An enclosing pattern is a matched pair of delimiters around a piece of source: the
//!     braces of a fragment sequence, the quotes of a text, the bars of a phrase. Each left
//!     delimiter may be padded with any number of `#`, and the right delimiter must carry the
//!     same number of `#` on the other side:
//!
//!         {...}        #{...}#        ##"..."##        #|...|#
//!
//!     The right pattern is derived from the left one purely textually: the string is reversed
//!     and `{` / `<` are flipped into `}` / `>`. `#`, `"` and `|` map onto themselves.
//!
//!     The global pattern has an empty left and right. It encloses the whole document and
//!     terminates on end of input rather than on a delimiter.

use crate::paxter::error::{ParserResult, PaxterError};
use crate::paxter::lexing::tokenizer::Tokenizer;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static LEFT_PATTERN_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^#*[{"|]$"#).unwrap());

/// A matched pair of left/right delimiters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct EnclosingPattern {
    pub left: String,
    pub right: String,
}

impl EnclosingPattern {
    /// Build the pattern for a left delimiter, rejecting anything but `#*{`, `#*"` or `#*|`.
    ///
    /// `position` is where the left delimiter starts; it pins the error.
    pub fn new(left: &str, position: usize) -> ParserResult<Self> {
        if !LEFT_PATTERN_REGEX.is_match(left) {
            return Err(PaxterError::syntax(
                format!("invalid left pattern `{left}`"),
                position,
            ));
        }
        Ok(Self {
            left: left.to_string(),
            right: flip_pattern(left),
        })
    }

    /// The pattern enclosing the whole document.
    pub fn global() -> Self {
        Self::default()
    }

    pub fn is_global(&self) -> bool {
        self.left.is_empty()
    }

    /// Number of `#` padding the delimiter.
    pub fn hash_count(&self) -> usize {
        self.left.chars().filter(|ch| *ch == '#').count()
    }

    /// Regex matching up to the right pattern, ignoring nested commands.
    pub fn non_rec_break_re(&self, tokenizer: &mut Tokenizer) -> Regex {
        if self.is_global() {
            tokenizer.global_break_re().clone()
        } else {
            tokenizer.non_rec_break_re(&self.right)
        }
    }

    /// Regex matching up to either the switch character or the right pattern.
    pub fn rec_break_re(&self, tokenizer: &mut Tokenizer) -> Regex {
        if self.is_global() {
            tokenizer.global_break_re().clone()
        } else {
            tokenizer.rec_break_re(&self.right)
        }
    }
}

/// Flip a left pattern into its right counterpart.
pub fn flip_pattern(left: &str) -> String {
    left.chars()
        .rev()
        .map(|ch| match ch {
            '{' => '}',
            '<' => '>',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flip_pattern() {
        assert_eq!(flip_pattern("{"), "}");
        assert_eq!(flip_pattern("##{"), "}##");
        assert_eq!(flip_pattern("#\""), "\"#");
        assert_eq!(flip_pattern("###|"), "|###");
        assert_eq!(flip_pattern("#<"), ">#");
    }

    #[test]
    fn test_new_pattern() {
        let pattern = EnclosingPattern::new("#{", 0).unwrap();
        assert_eq!(pattern.left, "#{");
        assert_eq!(pattern.right, "}#");
        assert_eq!(pattern.hash_count(), 1);
        assert!(!pattern.is_global());
    }

    #[test]
    fn test_rejects_invalid_left() {
        for left in ["", "#", "{#", "[", "#{{", "<"] {
            let err = EnclosingPattern::new(left, 4).unwrap_err();
            assert!(matches!(err, PaxterError::Syntax { .. }), "{left:?}");
            assert_eq!(err.offset(), Some(4));
        }
    }

    #[test]
    fn test_global_pattern() {
        let global = EnclosingPattern::global();
        assert!(global.is_global());
        assert_eq!(global.right, "");
    }
}
