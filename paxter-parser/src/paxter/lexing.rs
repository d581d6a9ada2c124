//! Lexing primitives for paxter
//!
//!     Paxter has no separate lexing pass. The parser drives a set of anchored regular
//!     expressions directly over the source, and which expressions are tried depends on where
//!     the parser stands (prose, options, inside quotes). This module holds those pieces:
//!
//!         - [`character_classes`]: identifier, symbol and operator classes from Unicode
//!           general categories.
//!         - [`enclosing`]: left/right delimiter pairs with `#` padding.
//!         - [`tokenizer`]: the compiled expressions, including the memoized break expressions.

pub mod character_classes;
pub mod enclosing;
pub mod tokenizer;

pub use enclosing::EnclosingPattern;
pub use tokenizer::{Tokenizer, DEFAULT_SWITCH};
