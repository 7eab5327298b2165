//! Token-level stand-in for a grammar-driven parser
//!
//! [`TokenStreamParser`] recognizes C-- tokens only. It groups them by source
//! line under a single `Program` root:
//!
//! ```text
//! Program (1)
//!   TokenLine (1)
//!     TYPE: int
//!     ID: main
//!     ...
//! ```
//!
//! A grammar-driven parser plugs into the driver through the same
//! [`SyntaxParser`] trait and replaces this one wholesale.

use super::collaborator::{ParseDiagnostic, ParseFailure, ParseOutcome, SyntaxParser};
use super::lexer::{Lexer, Token, TokenKind};
use crate::tree::{SyntaxNode, TreeError};
use std::io::Read;
use std::str;
use tracing::debug;

pub const ROOT_LABEL: &str = "Program";
pub const LINE_LABEL: &str = "TokenLine";

#[derive(Debug, Default)]
pub struct TokenStreamParser;

impl TokenStreamParser {
    pub fn new() -> Self {
        TokenStreamParser
    }

    /// Parse source text that is already in memory.
    ///
    /// Only a failed tree allocation is an `Err`; lexical errors are counted.
    pub fn parse_source(&self, source: &str) -> Result<ParseOutcome, TreeError> {
        self.parse_decoded(source, Vec::new())
    }

    /// Parse raw bytes. Sequences that are not UTF-8 are counted as lexical
    /// errors and scanned as whitespace.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<ParseOutcome, TreeError> {
        let (source, diagnostics) = decode(bytes);
        self.parse_decoded(&source, diagnostics)
    }

    fn parse_decoded(
        &self,
        source: &str,
        mut diagnostics: Vec<ParseDiagnostic>,
    ) -> Result<ParseOutcome, TreeError> {
        let output = Lexer::new(source).tokenize();
        diagnostics.extend(
            output
                .errors
                .iter()
                .map(|e| ParseDiagnostic::lexical(e.location.line, e.to_string())),
        );
        diagnostics.sort_by_key(|d| d.line);

        let root = build_tree(&output.tokens)?;

        debug!(
            tokens = output.tokens.len(),
            errors = diagnostics.len(),
            "token stream parsed"
        );
        Ok(ParseOutcome::new(Some(root), diagnostics))
    }
}

impl SyntaxParser for TokenStreamParser {
    fn parse(&mut self, input: &mut dyn Read) -> Result<ParseOutcome, ParseFailure> {
        let mut bytes = Vec::new();
        input.read_to_end(&mut bytes)?;
        Ok(self.parse_bytes(&bytes)?)
    }
}

/// Decode `bytes` as UTF-8, replacing each invalid sequence with a space and
/// reporting it on the line where it occurs.
fn decode(bytes: &[u8]) -> (String, Vec<ParseDiagnostic>) {
    let mut text = String::with_capacity(bytes.len());
    let mut diagnostics = Vec::new();
    let mut line = 1;
    let mut rest = bytes;

    loop {
        match str::from_utf8(rest) {
            Ok(valid) => {
                text.push_str(valid);
                return (text, diagnostics);
            }
            Err(err) => {
                let (valid, invalid) = rest.split_at(err.valid_up_to());
                let valid = str::from_utf8(valid).unwrap_or_default();
                line += valid.matches('\n').count();
                text.push_str(valid);

                let bad_len = err.error_len().unwrap_or(invalid.len());
                let shown: Vec<String> = invalid[..bad_len]
                    .iter()
                    .map(|b| format!("0x{:02X}", b))
                    .collect();
                diagnostics.push(ParseDiagnostic::lexical(
                    line,
                    format!("Invalid UTF-8 sequence {}", shown.join(" ")),
                ));
                text.push(' ');
                rest = &invalid[bad_len..];
            }
        }
    }
}

fn leaf(token: &Token) -> SyntaxNode {
    let line = token.location.line;
    match &token.kind {
        TokenKind::Int(n) => SyntaxNode::int_literal(*n, line),
        TokenKind::Float(x) => SyntaxNode::float_literal(*x, line),
        TokenKind::Id(name) => SyntaxNode::identifier(name.as_str(), line),
        TokenKind::Type(name) => SyntaxNode::type_name(name.as_str(), line),
        other => SyntaxNode::token(other.label(), line),
    }
}

fn build_tree(tokens: &[Token]) -> Result<SyntaxNode, TreeError> {
    let Some(first) = tokens.first() else {
        // Nothing was derived
        return Ok(SyntaxNode::epsilon(ROOT_LABEL, 1));
    };

    let mut root = SyntaxNode::non_terminal(ROOT_LABEL, first.location.line);
    for group in tokens.chunk_by(|a, b| a.location.line == b.location.line) {
        let line = SyntaxNode::non_terminal(LINE_LABEL, group[0].location.line)
            .with_children(group.iter().map(leaf))?;
        root.append_child(line)?;
    }
    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{preorder, NodeKind, Payload};

    #[test]
    fn test_groups_tokens_by_line() {
        let outcome = TokenStreamParser::new().parse_source("int x;\n\nx = 3.5;\n").unwrap();
        assert!(outcome.is_clean());
        let root = outcome.root.unwrap();

        assert_eq!(root.name(), ROOT_LABEL);
        assert_eq!(root.child_count(), 2);
        assert_eq!(root.children()[0].lineno(), 1);
        assert_eq!(root.children()[1].lineno(), 3);

        let labels: Vec<&str> = root.children()[1].children().iter().map(|n| n.name()).collect();
        assert_eq!(labels, vec!["ID", "ASSIGNOP", "FLOAT", "SEMI"]);
        assert_eq!(root.children()[1].children()[2].payload(), &Payload::Float(3.5));
    }

    #[test]
    fn test_empty_input_is_epsilon_root() {
        let outcome = TokenStreamParser::new().parse_source("  // only a comment\n").unwrap();
        assert!(outcome.is_clean());
        let root = outcome.root.unwrap();
        assert_eq!(root.kind(), NodeKind::EpsilonNonTerminal);
        assert_eq!(root.child_count(), 0);
    }

    #[test]
    fn test_lexical_errors_are_counted() {
        let outcome = TokenStreamParser::new().parse_source("int a;\na = b @ c;\n").unwrap();
        assert_eq!(outcome.error_count(), 1);
        assert_eq!(
            outcome.diagnostics[0].to_string(),
            "Error type A at Line 2: Mysterious character '@'."
        );
        // The tree is still built from the tokens that were recognized
        let root = outcome.root.unwrap();
        assert_eq!(preorder(&root).filter(|(_, n)| n.name() == "ID").count(), 4);
    }

    #[test]
    fn test_parse_reads_from_reader() {
        let mut input: &[u8] = b"struct Point { int x; };";
        let outcome = TokenStreamParser::new().parse(&mut input).unwrap();
        let root = outcome.root.unwrap();
        assert_eq!(root.child_count(), 1);
        assert_eq!(root.children()[0].children()[0].name(), "STRUCT");
    }

    #[test]
    fn test_invalid_utf8_in_comment_is_counted() {
        let mut input: &[u8] = b"int x;\nx = 1; // caf\xe9\n";
        let outcome = TokenStreamParser::new().parse(&mut input).unwrap();

        assert_eq!(outcome.error_count(), 1);
        assert_eq!(
            outcome.diagnostics[0].to_string(),
            "Error type A at Line 2: Invalid UTF-8 sequence 0xE9."
        );
        let root = outcome.root.unwrap();
        assert_eq!(root.child_count(), 2);
    }

    #[test]
    fn test_invalid_utf8_between_tokens_splits_them() {
        let outcome = TokenStreamParser::new()
            .parse_bytes(b"int a\xff\xfeb;\nc ~;\n")
            .unwrap();

        let reports: Vec<String> = outcome.diagnostics.iter().map(|d| d.to_string()).collect();
        assert_eq!(
            reports,
            vec![
                "Error type A at Line 1: Invalid UTF-8 sequence 0xFF.",
                "Error type A at Line 1: Invalid UTF-8 sequence 0xFE.",
                "Error type A at Line 2: Mysterious character '~'.",
            ]
        );
        let root = outcome.root.unwrap();
        let first_line: Vec<&str> = root.children()[0].children().iter().map(|n| n.name()).collect();
        assert_eq!(first_line, vec!["TYPE", "ID", "ID", "SEMI"]);
    }
}
