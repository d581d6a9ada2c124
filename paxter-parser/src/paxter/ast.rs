//! AST definitions and utilities for paxter
//!
//!     The parser turns source text into a tree rooted at a [`FragmentSeq`](nodes::FragmentSeq)
//!     with the global enclosing pattern. Nodes are plain values: they are created by the
//!     parser and only read afterwards. The interpreter never changes the tree, it produces
//!     fragment lists from it.
//!
//! Location Tracking
//!
//!     Every node stores a byte span into the source. For the main argument of a command, and
//!     for quoted texts, the span covers the content between the delimiters; for a command,
//!     it covers everything from the switch character to the last delimiter it consumed:
//!
//!         source:    Say @b#{hi}# now
//!                        ^^^^^^^^        Command     4..12
//!                            ^^          FragmentSeq 8..10
//!                            ^^          Text        8..10
//!
//!     Conversion to line:column is deferred until an error is reported, see
//!     [`SourceLocation`](range::SourceLocation).

pub mod nodes;
pub mod range;
pub mod snapshot;

pub use nodes::{
    Command, Fragment, FragmentSeq, Identifier, MainArg, Number, NumberValue, Operator, Text,
    Token, TokenSeq,
};
pub use range::{Position, SourceLocation, Span};
pub use snapshot::{
    snapshot_from_fragment, snapshot_from_fragment_seq, snapshot_from_token, AstSnapshot,
};
