//! AST node types
//!
//!     Paxter has two grammars and hence two node universes:
//!
//!         - Fragments make up free-form content: [`Text`], [`Command`] and nested
//!           [`FragmentSeq`]. See [`Fragment`].
//!         - Tokens make up the options of a command, the bracketed mini-language:
//!           [`Identifier`], [`Operator`], [`Number`], nested [`TokenSeq`], plus fragment
//!           sequences, texts and commands. See [`Token`].
//!
//!     A command is legal in both universes, which is how the two grammars recurse into each
//!     other. The split keeps, for example, a bare identifier from ever appearing in prose.
//!
//!     Every node carries a half-open byte [`Span`] into the source. Spans are informational:
//!     two nodes are equal when all their other fields are equal, wherever they were parsed.

use super::range::Span;
use crate::paxter::lexing::enclosing::EnclosingPattern;
use serde::{Deserialize, Serialize};

/// Implements `PartialEq` comparing every listed field, leaving the span out.
macro_rules! eq_ignoring_span {
    ($node:ty { $($field:ident),+ }) => {
        impl PartialEq for $node {
            fn eq(&self, other: &Self) -> bool {
                $(self.$field == other.$field)&&+
            }
        }
    };
}

/// A valid identifier inside options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identifier {
    pub span: Span,
    pub name: String,
}

/// A run of operator characters inside options, or a lone `,` / `;`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operator {
    pub span: Span,
    pub symbols: String,
}

/// Value of a number literal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberValue {
    Int(i64),
    Float(f64),
}

/// A JSON number literal inside options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Number {
    pub span: Span,
    pub value: NumberValue,
}

/// A bracketed sequence of tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenSeq {
    pub span: Span,
    pub children: Vec<Token>,
}

/// Raw text without nested commands
///
/// Prose between commands has the global (empty) enclosing pattern; quoted text keeps the
/// pattern it was written with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Text {
    pub span: Span,
    pub inner: String,
    pub enclosing: EnclosingPattern,
}

/// A sequence of fragments, the whole document or a braced main argument
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FragmentSeq {
    pub span: Span,
    pub children: Vec<Fragment>,
    pub enclosing: EnclosingPattern,
}

/// An @-expression
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Command {
    pub span: Span,
    pub phrase: String,
    pub phrase_enclosing: EnclosingPattern,
    pub options: Option<TokenSeq>,
    pub main_arg: Option<MainArg>,
}

/// The trailing body of a command: `{...}` or `"..."`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MainArg {
    FragmentSeq(FragmentSeq),
    Text(Text),
}

/// A child of a fragment sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Fragment {
    Text(Text),
    Command(Command),
    FragmentSeq(FragmentSeq),
}

/// A child of an options token sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Token {
    Identifier(Identifier),
    Operator(Operator),
    Number(Number),
    TokenSeq(TokenSeq),
    FragmentSeq(FragmentSeq),
    Text(Text),
    Command(Command),
}

eq_ignoring_span!(Identifier { name });
eq_ignoring_span!(Operator { symbols });
eq_ignoring_span!(Number { value });
eq_ignoring_span!(TokenSeq { children });
eq_ignoring_span!(Text { inner, enclosing });
eq_ignoring_span!(FragmentSeq { children, enclosing });
eq_ignoring_span!(Command {
    phrase,
    phrase_enclosing,
    options,
    main_arg
});

impl Identifier {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            span,
            name: name.into(),
        }
    }
}

impl Operator {
    pub fn new(symbols: impl Into<String>, span: Span) -> Self {
        Self {
            span,
            symbols: symbols.into(),
        }
    }

    pub fn is(&self, symbols: &str) -> bool {
        self.symbols == symbols
    }
}

impl Number {
    pub fn new(value: NumberValue, span: Span) -> Self {
        Self { span, value }
    }
}

impl TokenSeq {
    pub fn new(children: Vec<Token>, span: Span) -> Self {
        Self { span, children }
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl Text {
    pub fn new(inner: impl Into<String>, enclosing: EnclosingPattern, span: Span) -> Self {
        Self {
            span,
            inner: inner.into(),
            enclosing,
        }
    }

    /// Text found between commands, outside of any quotes.
    pub fn is_prose(&self) -> bool {
        self.enclosing.is_global()
    }
}

impl FragmentSeq {
    pub fn new(children: Vec<Fragment>, enclosing: EnclosingPattern, span: Span) -> Self {
        Self {
            span,
            children,
            enclosing,
        }
    }
}

impl Command {
    /// A command carrying only a phrase.
    pub fn bare(phrase: impl Into<String>, phrase_enclosing: EnclosingPattern, span: Span) -> Self {
        Self {
            span,
            phrase: phrase.into(),
            phrase_enclosing,
            options: None,
            main_arg: None,
        }
    }

    /// Whether the command has neither options nor a main argument.
    pub fn is_bare(&self) -> bool {
        self.options.is_none() && self.main_arg.is_none()
    }
}

impl MainArg {
    pub fn span(&self) -> Span {
        match self {
            MainArg::FragmentSeq(seq) => seq.span,
            MainArg::Text(text) => text.span,
        }
    }

    pub fn enclosing(&self) -> &EnclosingPattern {
        match self {
            MainArg::FragmentSeq(seq) => &seq.enclosing,
            MainArg::Text(text) => &text.enclosing,
        }
    }
}

impl Fragment {
    pub fn span(&self) -> Span {
        match self {
            Fragment::Text(text) => text.span,
            Fragment::Command(command) => command.span,
            Fragment::FragmentSeq(seq) => seq.span,
        }
    }
}

impl Token {
    pub fn span(&self) -> Span {
        match self {
            Token::Identifier(node) => node.span,
            Token::Operator(node) => node.span,
            Token::Number(node) => node.span,
            Token::TokenSeq(node) => node.span,
            Token::FragmentSeq(node) => node.span,
            Token::Text(node) => node.span,
            Token::Command(node) => node.span,
        }
    }

    /// The operator symbols, when this token is an operator.
    pub fn as_operator(&self) -> Option<&str> {
        match self {
            Token::Operator(op) => Some(&op.symbols),
            _ => None,
        }
    }

    /// The identifier name, when this token is an identifier.
    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            Token::Identifier(id) => Some(&id.name),
            _ => None,
        }
    }

    pub fn is_operator(&self, symbols: &str) -> bool {
        self.as_operator() == Some(symbols)
    }
}

impl From<MainArg> for Token {
    fn from(arg: MainArg) -> Self {
        match arg {
            MainArg::FragmentSeq(seq) => Token::FragmentSeq(seq),
            MainArg::Text(text) => Token::Text(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prose(inner: &str, start: usize) -> Text {
        Text::new(inner, EnclosingPattern::global(), Span::new(start, start + inner.len()))
    }

    #[test]
    fn test_equality_ignores_span() {
        assert_eq!(prose("abc", 0), prose("abc", 10));
        assert_ne!(prose("abc", 0), prose("abd", 0));
    }

    #[test]
    fn test_equality_includes_enclosing() {
        let quoted = Text::new(
            "abc",
            EnclosingPattern::new("\"", 0).unwrap(),
            Span::new(1, 4),
        );
        assert_ne!(quoted, prose("abc", 1));
        assert!(!quoted.is_prose());
    }

    #[test]
    fn test_command_equality_is_deep() {
        let mut a = Command::bare("f", EnclosingPattern::global(), Span::new(0, 2));
        let mut b = Command::bare("f", EnclosingPattern::global(), Span::new(5, 7));
        assert_eq!(a, b);

        a.options = Some(TokenSeq::new(
            vec![Token::Number(Number::new(NumberValue::Int(1), Span::new(3, 4)))],
            Span::new(3, 4),
        ));
        assert_ne!(a, b);
        b.options = Some(TokenSeq::new(
            vec![Token::Number(Number::new(NumberValue::Int(1), Span::new(8, 9)))],
            Span::new(8, 9),
        ));
        assert_eq!(a, b);
        assert!(!a.is_bare());
    }

    #[test]
    fn test_token_accessors() {
        let op = Token::Operator(Operator::new(",", Span::new(0, 1)));
        assert!(op.is_operator(","));
        assert_eq!(op.as_identifier(), None);

        let id = Token::Identifier(Identifier::new("x", Span::new(2, 3)));
        assert_eq!(id.as_identifier(), Some("x"));
        assert_eq!(id.span(), Span::new(2, 3));
    }
}
