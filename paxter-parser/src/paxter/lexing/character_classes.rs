//! Character classes derived from Unicode general categories
//!
//! The classes are kept as regex class bodies so the tokenizer can splice them into its
//! patterns; the regex engine carries the Unicode category tables.
//!
//! - `ID_START`: letters (Lu, Ll, Lt, Lm, Lo), letter numbers (Nl) and `_`
//! - `ID_CONT`: `ID_START` plus marks (Mn, Mc), decimal digits (Nd) and connectors (Pc)
//! - `SYMBOL`: any punctuation (Ps, Pe, Pi, Pf, Pd, Po) or symbol (Sc, Sk, Sm, So); used for
//!   single-symbol commands such as `@!`
//! - `OP`: dashes, other punctuation and symbols (Pd, Po, Sc, Sk, Sm, So), the characters that
//!   make up operator runs inside options

use once_cell::sync::Lazy;
use regex::Regex;

pub const ID_START: &str = r"\p{Lu}\p{Ll}\p{Lt}\p{Lm}\p{Lo}\p{Nl}_";

pub const ID_CONT: &str = r"\p{Lu}\p{Ll}\p{Lt}\p{Lm}\p{Lo}\p{Nl}_\p{Mn}\p{Mc}\p{Nd}\p{Pc}";

pub const SYMBOL: &str = r"\p{Ps}\p{Pe}\p{Pi}\p{Pf}\p{Pd}\p{Po}\p{Sc}\p{Sk}\p{Sm}\p{So}";

pub const OP: &str = r"\p{Pd}\p{Po}\p{Sc}\p{Sk}\p{Sm}\p{So}";

/// Characters never part of an operator run; `,` and `;` are operators on their own.
pub const OP_EXCLUDED: &str = ",;@#\"";

/// Characters with a fixed meaning in the grammar, never usable as the switch.
pub const RESERVED: &str = "[]{}\"\\#|,;";

static OP_CHAR_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(&format!("^[{OP}]$")).unwrap());

static SYMBOL_CHAR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("^[{SYMBOL}]$")).unwrap());

static ID_START_CHAR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("^[{ID_START}]$")).unwrap());

/// Character class (with brackets) matching one operator character under `switch`.
pub fn op_class(switch: char) -> String {
    let switch = regex::escape(&switch.to_string());
    let excluded = regex::escape(OP_EXCLUDED);
    format!("[[{OP}]--[{excluded}{switch}]]")
}

pub fn is_op_char(ch: char) -> bool {
    OP_CHAR_REGEX.is_match(ch.encode_utf8(&mut [0; 4]))
}

pub fn is_symbol_char(ch: char) -> bool {
    SYMBOL_CHAR_REGEX.is_match(ch.encode_utf8(&mut [0; 4]))
}

pub fn is_id_start(ch: char) -> bool {
    ID_START_CHAR_REGEX.is_match(ch.encode_utf8(&mut [0; 4]))
}

pub fn is_reserved(ch: char) -> bool {
    RESERVED.contains(ch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_start() {
        assert!(is_id_start('a'));
        assert!(is_id_start('_'));
        assert!(is_id_start('ß'));
        assert!(is_id_start('ก'));
        assert!(!is_id_start('1'));
        assert!(!is_id_start('-'));
    }

    #[test]
    fn test_symbol_chars() {
        for ch in ['!', '(', ')', '«', '-', '$', '^', '+', '©', '@'] {
            assert!(is_symbol_char(ch), "{ch:?}");
        }
        for ch in ['a', '1', ' ', '_'] {
            assert!(!is_symbol_char(ch), "{ch:?}");
        }
    }

    #[test]
    fn test_op_chars() {
        assert!(is_op_char('+'));
        assert!(is_op_char('='));
        assert!(is_op_char('.'));
        // Brackets are open/close punctuation, not operators
        assert!(!is_op_char('('));
        assert!(!is_op_char(']'));
    }

    #[test]
    fn test_op_class_excludes_switch_and_reserved() {
        let class = Regex::new(&format!("^{}$", op_class('$'))).unwrap();
        assert!(class.is_match("+"));
        assert!(!class.is_match("@"));
        assert!(!class.is_match("$"));
        assert!(!class.is_match(","));
        assert!(!class.is_match("#"));
        assert!(!class.is_match("\""));
    }
}
