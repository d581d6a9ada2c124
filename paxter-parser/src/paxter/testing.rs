//! Testing utilities
//!
//!     Node factories for writing expected trees by hand. Nodes compare without their spans,
//!     so a tree built here equals the parsed tree whenever the structure matches:
//!
//!     ```rust,ignore
//!     use paxter_parser::paxter::testing::*;
//!
//!     let tree = parse("a @f[x=1]{b}").unwrap();
//!     assert_eq!(
//!         tree,
//!         document(vec![
//!             text("a ").into(),
//!             command("f")
//!                 .options(vec![ident("x"), op("="), num(1)])
//!                 .braced("{", vec![text("b").into()])
//!                 .into(),
//!         ])
//!     );
//!     ```
//!
//!     Spans are still worth testing on their own; `assert_spans_cover` checks that every
//!     node sits inside its parent and that spans slice the source cleanly.

use crate::paxter::ast::{
    Command, Fragment, FragmentSeq, Identifier, MainArg, Number, NumberValue, Operator, Span,
    Text, Token, TokenSeq,
};
use crate::paxter::lexing::EnclosingPattern;

fn pattern(left: &str) -> EnclosingPattern {
    EnclosingPattern::new(left, 0)
        .unwrap_or_else(|err| panic!("bad left pattern in test: {err}"))
}

/// Prose text
pub fn text(inner: &str) -> Text {
    Text::new(inner, EnclosingPattern::global(), Span::default())
}

/// Quoted text, e.g. `quoted("#\"", "x")` for `#"x"#`
pub fn quoted(left: &str, inner: &str) -> Text {
    Text::new(inner, pattern(left), Span::default())
}

/// The top-level sequence of a document
pub fn document(children: Vec<Fragment>) -> FragmentSeq {
    FragmentSeq::new(children, EnclosingPattern::global(), Span::default())
}

/// A braced fragment sequence, e.g. `braced("##{", ...)`
pub fn braced(left: &str, children: Vec<Fragment>) -> FragmentSeq {
    FragmentSeq::new(children, pattern(left), Span::default())
}

pub fn ident(name: &str) -> Token {
    Token::Identifier(Identifier::new(name, Span::default()))
}

pub fn op(symbols: &str) -> Token {
    Token::Operator(Operator::new(symbols, Span::default()))
}

pub fn num(value: i64) -> Token {
    Token::Number(Number::new(NumberValue::Int(value), Span::default()))
}

pub fn float(value: f64) -> Token {
    Token::Number(Number::new(NumberValue::Float(value), Span::default()))
}

pub fn tokens(children: Vec<Token>) -> Token {
    Token::TokenSeq(TokenSeq::new(children, Span::default()))
}

/// A command with an identifier phrase; chain the builder methods to add the rest
pub fn command(phrase: &str) -> Command {
    Command::bare(phrase, EnclosingPattern::global(), Span::default())
}

/// A command with a bar-enclosed phrase, e.g. `bar_command("#|", "a|b")`
pub fn bar_command(left: &str, phrase: &str) -> Command {
    Command::bare(phrase, pattern(left), Span::default())
}

impl Command {
    pub fn options(mut self, children: Vec<Token>) -> Self {
        self.options = Some(TokenSeq::new(children, Span::default()));
        self
    }

    pub fn braced(mut self, left: &str, children: Vec<Fragment>) -> Self {
        self.main_arg = Some(MainArg::FragmentSeq(braced(left, children)));
        self
    }

    pub fn quoted(mut self, left: &str, inner: &str) -> Self {
        self.main_arg = Some(MainArg::Text(quoted(left, inner)));
        self
    }
}

impl From<Text> for Fragment {
    fn from(text: Text) -> Self {
        Fragment::Text(text)
    }
}

impl From<Command> for Fragment {
    fn from(command: Command) -> Self {
        Fragment::Command(command)
    }
}

impl From<FragmentSeq> for Fragment {
    fn from(seq: FragmentSeq) -> Self {
        Fragment::FragmentSeq(seq)
    }
}

impl From<Text> for Token {
    fn from(text: Text) -> Self {
        Token::Text(text)
    }
}

impl From<Command> for Token {
    fn from(command: Command) -> Self {
        Token::Command(command)
    }
}

impl From<FragmentSeq> for Token {
    fn from(seq: FragmentSeq) -> Self {
        Token::FragmentSeq(seq)
    }
}

/// Check span integrity of a parsed tree against its source.
///
/// Every span must slice `source` on char boundaries, every child span must lie within its
/// parent's, and siblings must not overlap. Panics with the offending node otherwise.
pub fn assert_spans_cover(source: &str, tree: &FragmentSeq) {
    check_fragment_seq(source, tree, Span::new(0, source.len()));
}

fn check_span(source: &str, span: Span, parent: Span, what: &str) {
    assert!(
        span.start <= span.end && span.end <= source.len(),
        "{what} span {span} out of source bounds"
    );
    assert!(
        source.is_char_boundary(span.start) && source.is_char_boundary(span.end),
        "{what} span {span} splits a character"
    );
    assert!(
        parent.contains(&span),
        "{what} span {span} not inside parent {parent}"
    );
}

fn check_siblings(spans: impl Iterator<Item = Span>, what: &str) {
    let mut last_end = 0;
    for span in spans {
        assert!(span.start >= last_end, "{what} span {span} overlaps previous sibling");
        last_end = span.end;
    }
}

fn check_fragment_seq(source: &str, seq: &FragmentSeq, parent: Span) {
    check_span(source, seq.span, parent, "FragmentSeq");
    check_siblings(seq.children.iter().map(Fragment::span), "Fragment");
    for child in &seq.children {
        match child {
            Fragment::Text(text) => check_text(source, text, seq.span),
            Fragment::Command(command) => check_command(source, command, seq.span),
            Fragment::FragmentSeq(inner) => check_fragment_seq(source, inner, seq.span),
        }
    }
}

fn check_text(source: &str, text: &Text, parent: Span) {
    check_span(source, text.span, parent, "Text");
    assert_eq!(
        &source[text.span.as_range()],
        text.inner,
        "Text span {} does not slice its content",
        text.span
    );
}

fn check_command(source: &str, command: &Command, parent: Span) {
    check_span(source, command.span, parent, "Command");
    if let Some(options) = &command.options {
        check_token_seq(source, options, command.span);
    }
    match &command.main_arg {
        Some(MainArg::FragmentSeq(seq)) => check_fragment_seq(source, seq, command.span),
        Some(MainArg::Text(text)) => check_text(source, text, command.span),
        None => {}
    }
}

fn check_token_seq(source: &str, seq: &TokenSeq, parent: Span) {
    check_span(source, seq.span, parent, "TokenSeq");
    check_siblings(seq.children.iter().map(Token::span), "Token");
    for token in &seq.children {
        match token {
            Token::Identifier(id) => {
                check_span(source, id.span, seq.span, "Identifier");
                assert_eq!(&source[id.span.as_range()], id.name);
            }
            Token::Operator(op) => {
                check_span(source, op.span, seq.span, "Operator");
                assert_eq!(&source[op.span.as_range()], op.symbols);
            }
            Token::Number(number) => check_span(source, number.span, seq.span, "Number"),
            Token::TokenSeq(inner) => check_token_seq(source, inner, seq.span),
            Token::FragmentSeq(inner) => check_fragment_seq(source, inner, seq.span),
            Token::Text(text) => check_text(source, text, seq.span),
            Token::Command(command) => check_command(source, command, seq.span),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paxter::parsing::parse;

    #[test]
    fn test_factories_match_parsed_tree() {
        let tree = parse(r#"a @f[x=1, "s"]{b @|c|}"#).unwrap();
        assert_eq!(
            tree,
            document(vec![
                text("a ").into(),
                command("f")
                    .options(vec![ident("x"), op("="), num(1), op(","), quoted("\"", "s").into()])
                    .braced("{", vec![text("b ").into(), bar_command("|", "c").into()])
                    .into(),
            ])
        );
    }

    #[test]
    fn test_spans_cover_nested_tree() {
        let source = "héllo @f[ @g{ü} , [1] ]#{x @y\"z\"}# end";
        assert_spans_cover(source, &parse(source).unwrap());
    }
}
