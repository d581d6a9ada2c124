//! Integration tests for the parser.

use paxter_parser::paxter::ast::{Fragment, MainArg, Token};
use paxter_parser::paxter::parsing::{parse, Parser};
use paxter_parser::paxter::testing::*;
use paxter_parser::PaxterError;
use rstest::rstest;

#[test]
fn test_prose_and_commands() {
    let tree = parse("Hello @name, see @link[\"x\"]{here}.").unwrap();
    assert_eq!(
        tree,
        document(vec![
            text("Hello ").into(),
            command("name").into(),
            text(", see ").into(),
            command("link")
                .options(vec![quoted("\"", "x").into()])
                .braced("{", vec![text("here").into()])
                .into(),
            text(".").into(),
        ])
    );
}

#[test]
fn test_options_are_lexed_not_parsed() {
    let tree = parse(r#"@f[a,b=1,"s",c=@f{x},+,-]"#).unwrap();
    let expected = command("f").options(vec![
        ident("a"),
        op(","),
        ident("b"),
        op("="),
        num(1),
        op(","),
        quoted("\"", "s").into(),
        op(","),
        ident("c"),
        op("="),
        command("f").braced("{", vec![text("x").into()]).into(),
        op(","),
        op("+"),
        op(","),
        op("-"),
    ]);
    assert_eq!(tree, document(vec![expected.into()]));
}

#[rstest]
#[case::identifier("@x", command("x"))]
#[case::unicode_identifier("@größe", command("größe"))]
#[case::bar_phrase("@|a + b|", bar_command("|", "a + b"))]
#[case::hashed_bar_phrase("@##|x|#y|##", bar_command("##|", "x|#y"))]
#[case::symbol("@!", command("!"))]
#[case::switch_as_symbol("@@", command("@"))]
#[case::quoted_main_arg(r#"@code"a {b} @c""#, command("code").quoted("\"", "a {b} @c"))]
#[case::hashed_quote(r###"@q##"say "hi""##"###, command("q").quoted("##\"", "say \"hi\""))]
#[case::empty_options("@f[]", command("f").options(vec![]))]
#[case::float("@f[2.5e-1]", command("f").options(vec![float(0.25)]))]
#[case::nested_tokens("@f[[1 2] x]", command("f").options(vec![tokens(vec![num(1), num(2)]), ident("x")]))]
#[case::hashed_bar_then_padded_body("@#|x|##{z}#", bar_command("#|", "x").braced("#{", vec![text("z").into()]))]
fn test_single_command(#[case] source: &str, #[case] expected: paxter_parser::paxter::ast::Command) {
    assert_eq!(parse(source).unwrap(), document(vec![expected.into()]));
}

#[test]
fn test_hash_padded_braces_nest() {
    let tree = parse("@hi#{@hello#{no @nesting here}#}#").unwrap();
    let inner = command("hello").braced(
        "#{",
        vec![text("no ").into(), command("nesting").into(), text(" here").into()],
    );
    assert_eq!(
        tree,
        document(vec![command("hi").braced("#{", vec![inner.into()]).into()])
    );
}

#[test]
fn test_unbalanced_hashes_are_unclosed() {
    let err = parse("@hi##{text}#").unwrap_err();
    assert!(matches!(err, PaxterError::Syntax { .. }));
    assert_eq!(err.offset(), Some(3));
    assert_eq!(err.message(), "unclosed `##{`: cannot match `}##`");
}

#[test]
fn test_extra_hashes_on_the_right_are_unbalanced() {
    let err = parse("@hi#{x}##").unwrap_err();
    assert!(matches!(err, PaxterError::Syntax { .. }));
    assert_eq!(err.offset(), Some(3));
    assert_eq!(err.message(), "unbalanced `#{`: `}#` is followed by another `#`");
}

#[test]
fn test_extra_hash_closes_into_outer_scope() {
    let tree = parse("@a##{@b#{x}##}##").unwrap();
    let inner = command("b").braced("#{", vec![text("x").into()]);
    assert_eq!(
        tree,
        document(vec![command("a")
            .braced("##{", vec![inner.into(), text("#").into()])
            .into()])
    );
}

#[test]
fn test_switch_introduced_sequence_and_text() {
    let tree = parse(r#"@{a @b} @"@foo @|bar|""#).unwrap();
    assert_eq!(
        tree,
        document(vec![
            braced("{", vec![text("a ").into(), command("b").into()]).into(),
            text(" ").into(),
            quoted("\"", "@foo @|bar|").into(),
        ])
    );
}

#[test]
fn test_custom_switch() {
    let mut parser = Parser::with_switch('%').unwrap();
    let tree = parser.parse("mail@example.com %b{bold}").unwrap();
    assert_eq!(
        tree,
        document(vec![
            text("mail@example.com ").into(),
            command("b").braced("{", vec![text("bold").into()]).into(),
        ])
    );
}

#[rstest]
#[case('[')]
#[case('#')]
#[case('|')]
#[case('a')]
#[case(' ')]
fn test_illegal_switch(#[case] switch: char) {
    assert!(matches!(
        Parser::with_switch(switch),
        Err(PaxterError::Config { .. })
    ));
}

#[rstest]
#[case::unclosed_brace("x @f{y", 4, "unclosed `{`")]
#[case::unclosed_quote("@f\"y", 2, "unclosed `\"`")]
#[case::unclosed_bar("@|phrase", 1, "unclosed `|`")]
#[case::unclosed_bracket("@f[1, 2", 2, "unclosed `[`")]
#[case::lone_switch("a @ b", 2, "invalid expression after `@`")]
fn test_syntax_errors(#[case] source: &str, #[case] offset: usize, #[case] message: &str) {
    let err = parse(source).unwrap_err();
    assert_eq!(err.offset(), Some(offset));
    assert!(
        err.message().starts_with(message),
        "{:?} does not start with {:?}",
        err.message(),
        message
    );
    assert!(err.position().is_some());
}

#[test]
fn test_parse_is_deterministic() {
    let source = "a @b[c=1]{d @e\"f\"} g";
    let first = parse(source).unwrap();
    let second = parse(source).unwrap();
    assert_eq!(first, second);

    let spans = |tree: &paxter_parser::paxter::ast::FragmentSeq| -> Vec<_> {
        tree.children.iter().map(Fragment::span).collect()
    };
    assert_eq!(spans(&first), spans(&second));
}

#[test]
fn test_command_inside_options_keeps_its_main_arg() {
    let tree = parse("@f[c=@g#{x}#]").unwrap();
    let Some(Fragment::Command(f)) = tree.children.first() else {
        panic!("expected a command");
    };
    let options = f.options.as_ref().unwrap();
    let Token::Command(g) = &options.children[2] else {
        panic!("expected a nested command");
    };
    assert!(matches!(&g.main_arg, Some(MainArg::FragmentSeq(seq)) if seq.enclosing.left == "#{"));
}
