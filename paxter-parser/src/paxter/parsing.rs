//! Parsing module for paxter
//!
//!     The parser is a recursive descent over two grammars that call into each other:
//!
//!         Fragment grammar (see [fragments]):
//!             Entered at the start of input and inside every braced main argument. Text is
//!             consumed up to the next switch character or up to the right pattern closing the
//!             current scope. A switch character starts a command.
//!
//!         Options grammar (see [options]):
//!             Entered after `[`. Whitespace separated tokens (identifiers, operators, numbers,
//!             braced fragments, quoted texts, commands, nested brackets) up to the matching
//!             `]`. Commas and equal signs are plain operators here: their meaning is given by
//!             the call-wrapper that consumes the options, not by the parser.
//!
//!     Commands (see [command]) bridge the two: a command is a fragment whose options are a
//!     token sequence, and a command is also a legal token.
//!
//!     The parser keeps no state besides the recursion stack and the tokenizer's memo tables.
//!     It is deterministic: the same source always yields the same tree, spans included.
//!
//! Terminology
//!
//!     - switch: the character introducing a command, `@` unless configured otherwise
//!     - phrase: the identifier or bar-enclosed string naming what a command invokes
//!     - options: the bracketed token sequence following a phrase
//!     - main argument: the braced fragments or quoted text closing a command

pub mod command;
pub mod fragments;
pub mod options;
pub mod parser;

pub use parser::{parse, Parser};
