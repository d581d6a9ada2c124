//! Parser entry point

use crate::paxter::ast::FragmentSeq;
use crate::paxter::error::PaxterResult;
use crate::paxter::lexing::{EnclosingPattern, Tokenizer};
use tracing::debug;

/// Parse `source` with the default `@` switch.
pub fn parse(source: &str) -> PaxterResult<FragmentSeq> {
    Parser::new().parse(source)
}

/// Recursive descent parser for paxter sources
///
/// A parser owns its tokenizer, so the break expressions compiled for one document are reused
/// for the next one parsed with the same parser.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    tokenizer: Tokenizer,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser using `switch` instead of `@` to introduce commands.
    pub fn with_switch(switch: char) -> PaxterResult<Self> {
        Ok(Self {
            tokenizer: Tokenizer::new(switch)?,
        })
    }

    pub fn switch(&self) -> char {
        self.tokenizer.switch()
    }

    /// Parse a whole document into its top-level fragment sequence.
    ///
    /// Syntax errors come back with their line and column resolved against `source`.
    pub fn parse(&mut self, source: &str) -> PaxterResult<FragmentSeq> {
        debug!(len = source.len(), switch = %self.switch(), "parsing source");
        let mut context = ParseContext {
            source,
            tokenizer: &mut self.tokenizer,
            depth: 0,
        };
        let (tree, _) = context
            .parse_fragment_seq(0, EnclosingPattern::global(), 0)
            .map_err(|err| err.locate(source))?;
        Ok(tree)
    }
}

/// State shared by the grammar functions while parsing one source
pub(crate) struct ParseContext<'s, 't> {
    pub(crate) source: &'s str,
    pub(crate) tokenizer: &'t mut Tokenizer,
    /// Number of enclosed fragment scopes around the current position
    pub(crate) depth: usize,
}
