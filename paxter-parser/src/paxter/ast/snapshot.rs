//! AST Snapshot - a normalized intermediate representation of the AST tree
//!
//! This module provides a canonical, format-agnostic representation of the tree suitable for
//! display formats such as treeviz.
//!
//! The snapshot captures the complete tree structure with node types, labels, attributes,
//! spans and children, so serializers only deal with presentation and never reimplement the
//! traversal over the two node universes.

use super::nodes::{Command, Fragment, FragmentSeq, MainArg, NumberValue, Text, Token, TokenSeq};
use super::range::Span;
use crate::paxter::lexing::enclosing::EnclosingPattern;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A snapshot of an AST node in a normalized, serializable form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AstSnapshot {
    /// The type of node (e.g., "Text", "Command", "Operator")
    pub node_type: String,

    /// The primary label or text content of the node
    pub label: String,

    /// Additional attributes specific to the node type
    pub attributes: BTreeMap<String, String>,

    pub span: Span,

    /// Child nodes in the tree
    pub children: Vec<AstSnapshot>,
}

impl AstSnapshot {
    /// Create a new snapshot with the given node type and label
    pub fn new(node_type: &str, label: String, span: Span) -> Self {
        Self {
            node_type: node_type.to_string(),
            label,
            attributes: BTreeMap::new(),
            span,
            children: Vec::new(),
        }
    }

    /// Add an attribute to this snapshot
    pub fn with_attribute(mut self, key: &str, value: String) -> Self {
        self.attributes.insert(key.to_string(), value);
        self
    }

    /// Add a child snapshot
    pub fn with_child(mut self, child: AstSnapshot) -> Self {
        self.children.push(child);
        self
    }

    /// Add multiple children
    pub fn with_children(mut self, children: Vec<AstSnapshot>) -> Self {
        self.children.extend(children);
        self
    }

    fn with_enclosing(self, key: &str, enclosing: &EnclosingPattern) -> Self {
        if enclosing.is_global() {
            self
        } else {
            self.with_attribute(key, format!("{}…{}", enclosing.left, enclosing.right))
        }
    }
}

// ============================================================================
// Snapshot Building Functions
// ============================================================================

/// Build a snapshot for a fragment sequence and everything below it
pub fn snapshot_from_fragment_seq(seq: &FragmentSeq) -> AstSnapshot {
    let label = if seq.enclosing.is_global() {
        String::new()
    } else {
        seq.enclosing.left.clone()
    };
    AstSnapshot::new("FragmentSeq", label, seq.span)
        .with_enclosing("enclosing", &seq.enclosing)
        .with_children(seq.children.iter().map(snapshot_from_fragment).collect())
}

/// Build a snapshot from a concrete Fragment enum
pub fn snapshot_from_fragment(fragment: &Fragment) -> AstSnapshot {
    match fragment {
        Fragment::Text(text) => build_text_snapshot(text),
        Fragment::Command(command) => build_command_snapshot(command),
        Fragment::FragmentSeq(seq) => snapshot_from_fragment_seq(seq),
    }
}

/// Build a snapshot from a concrete Token enum
pub fn snapshot_from_token(token: &Token) -> AstSnapshot {
    match token {
        Token::Identifier(id) => AstSnapshot::new("Identifier", id.name.clone(), id.span),
        Token::Operator(op) => AstSnapshot::new("Operator", op.symbols.clone(), op.span),
        Token::Number(number) => {
            let label = match number.value {
                NumberValue::Int(value) => value.to_string(),
                NumberValue::Float(value) => value.to_string(),
            };
            AstSnapshot::new("Number", label, number.span)
        }
        Token::TokenSeq(seq) => build_token_seq_snapshot(seq),
        Token::FragmentSeq(seq) => snapshot_from_fragment_seq(seq),
        Token::Text(text) => build_text_snapshot(text),
        Token::Command(command) => build_command_snapshot(command),
    }
}

fn build_text_snapshot(text: &Text) -> AstSnapshot {
    AstSnapshot::new("Text", text.inner.clone(), text.span).with_enclosing("enclosing", &text.enclosing)
}

fn build_token_seq_snapshot(seq: &TokenSeq) -> AstSnapshot {
    AstSnapshot::new("TokenSeq", format!("{} tokens", seq.children.len()), seq.span)
        .with_children(seq.children.iter().map(snapshot_from_token).collect())
}

fn build_command_snapshot(command: &Command) -> AstSnapshot {
    let mut snapshot = AstSnapshot::new("Command", command.phrase.clone(), command.span)
        .with_enclosing("phrase_enclosing", &command.phrase_enclosing);

    if let Some(options) = &command.options {
        snapshot = snapshot.with_child(build_token_seq_snapshot(options));
    }
    match &command.main_arg {
        Some(MainArg::FragmentSeq(seq)) => snapshot.with_child(snapshot_from_fragment_seq(seq)),
        Some(MainArg::Text(text)) => snapshot.with_child(build_text_snapshot(text)),
        None => snapshot,
    }
}
