//! Treeviz formatter for parsed trees
//!
//! Treeviz is a one line per node rendering of the tree, handy to scan how a document was
//! parsed. Nesting is drawn with box connectors, each line reads `<icon> <label>` and labels
//! are truncated to 30 characters, newlines shown as `↵`.
//!
//! Example, for `Hi,@b[x=1]{there}`:
//!
//!     ⧉ document
//!     ├─ ◦ Hi,
//!     └─ ƒ b
//!       ├─ ☰ 3 tokens
//!       │ ├─ 𝑥 x
//!       │ ├─ ± =
//!       │ └─ # 1
//!       └─ ⧉ {
//!         └─ ◦ there
//!
//! Icons
//!     Fragments:
//!         FragmentSeq: ⧉
//!         Text: ◦
//!         Command: ƒ
//!     Tokens:
//!         TokenSeq: ☰
//!         Identifier: 𝑥
//!         Operator: ±
//!         Number: #

use super::{FormatError, TreeFormat};
use crate::paxter::ast::{snapshot_from_fragment_seq, AstSnapshot, FragmentSeq};

fn truncate(s: &str, max_chars: usize) -> String {
    let s = s.replace('\n', "↵");
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push('…');
        truncated
    } else {
        s
    }
}

fn get_icon(node_type: &str) -> &'static str {
    match node_type {
        "FragmentSeq" => "⧉",
        "Text" => "◦",
        "Command" => "ƒ",
        "TokenSeq" => "☰",
        "Identifier" => "𝑥",
        "Operator" => "±",
        "Number" => "#",
        _ => "○",
    }
}

fn format_snapshot(
    snapshot: &AstSnapshot,
    prefix: &str,
    child_index: usize,
    child_count: usize,
) -> String {
    let is_last = child_index == child_count - 1;
    let connector = if is_last { "└─" } else { "├─" };
    let mut output = format!(
        "{}{} {} {}\n",
        prefix,
        connector,
        get_icon(&snapshot.node_type),
        truncate(&snapshot.label, 30)
    );

    let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    let child_count = snapshot.children.len();
    for (i, child) in snapshot.children.iter().enumerate() {
        output.push_str(&format_snapshot(child, &child_prefix, i, child_count));
    }

    output
}

pub fn to_treeviz(tree: &FragmentSeq) -> String {
    let snapshot = snapshot_from_fragment_seq(tree);
    let label = if snapshot.label.is_empty() {
        "document"
    } else {
        snapshot.label.as_str()
    };
    let mut output = format!("{} {}\n", get_icon(&snapshot.node_type), label);

    let child_count = snapshot.children.len();
    for (i, child) in snapshot.children.iter().enumerate() {
        output.push_str(&format_snapshot(child, "", i, child_count));
    }

    output
}

pub struct TreevizFormat;

impl TreeFormat for TreevizFormat {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn description(&self) -> &str {
        "Visual tree representation with box connectors and Unicode icons"
    }

    fn serialize(&self, tree: &FragmentSeq) -> Result<String, FormatError> {
        Ok(to_treeviz(tree))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paxter::parsing::parse;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 30), "short");
        assert_eq!(truncate("abcdef", 3), "abc…");
        assert_eq!(truncate("a\nb", 30), "a↵b");
    }

    #[test]
    fn test_documented_example() {
        let tree = parse("Hi,@b[x=1]{there}").unwrap();
        let expected = "\
⧉ document
├─ ◦ Hi,
└─ ƒ b
  ├─ ☰ 3 tokens
  │ ├─ 𝑥 x
  │ ├─ ± =
  │ └─ # 1
  └─ ⧉ {
    └─ ◦ there
";
        assert_eq!(to_treeviz(&tree), expected);
    }
}
