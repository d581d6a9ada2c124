//! # paxter
//!
//! A parser and tree interpreter for the paxter document preprocessing language.
//!
//! Paxter is text first: free-form prose in which `@`-commands are embedded. The source is
//! parsed into a tree of fragments, commands and option tokens, and that tree is then
//! interpreted against a user supplied environment, producing a fragment list (or, with the
//! simple preset, a rendered string).
//!
//! File Layout
//!
//! src/paxter
//!   ├── lexing     Character classes, enclosing patterns and the regex tokenizer
//!   ├── ast        Node types, spans and source positions, snapshots
//!   ├── parsing    Recursive descent over the fragment and options grammars
//!   ├── interp     Values, environment, interpreter and call-wrappers
//!   ├── formats    Tree serializers (json, yaml, treeviz)
//!   └── presets    Parser to interpreter glue
//!
//! For test helpers, see the [testing module](paxter::testing).

#![allow(rustdoc::invalid_html_tags)]

pub mod paxter;

pub use paxter::error::{PaxterError, PaxterResult};
pub use paxter::presets::{default_environment, run, run_simple, run_simple_default};
