//! The boundary between the driver and whatever parser fills the tree
//!
//! A parser consumes the opened input and hands back the root it built plus
//! every error it counted on the way. Errors are data, not control flow: a
//! parser keeps going after malformed input and may return a partial root.
//! Only an unreadable input or a failed tree allocation stops a parse.

use crate::tree::{SyntaxNode, TreeError};
use std::fmt;
use std::io::{self, Read};
use thiserror::Error;

/// Which phase of recognition reported a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// Unrecognized or malformed token
    Lexical,
    /// Token sequence that matches no production
    Syntax,
}

impl DiagnosticKind {
    /// Letter used in the conventional `Error type X` report
    pub fn code(self) -> char {
        match self {
            DiagnosticKind::Lexical => 'A',
            DiagnosticKind::Syntax => 'B',
        }
    }
}

/// One counted parse error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDiagnostic {
    pub kind: DiagnosticKind,
    pub line: usize,
    pub message: String,
}

impl ParseDiagnostic {
    pub fn lexical(line: usize, message: impl Into<String>) -> Self {
        ParseDiagnostic {
            kind: DiagnosticKind::Lexical,
            line,
            message: message.into(),
        }
    }

    pub fn syntax(line: usize, message: impl Into<String>) -> Self {
        ParseDiagnostic {
            kind: DiagnosticKind::Syntax,
            line,
            message: message.into(),
        }
    }
}

impl fmt::Display for ParseDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Error type {} at Line {}: {}.",
            self.kind.code(),
            self.line,
            self.message
        )
    }
}

/// Everything a parse run produced
#[derive(Debug, Default)]
pub struct ParseOutcome {
    /// Root of the tree, possibly partial when errors were counted
    pub root: Option<SyntaxNode>,
    pub diagnostics: Vec<ParseDiagnostic>,
}

impl ParseOutcome {
    pub fn new(root: Option<SyntaxNode>, diagnostics: Vec<ParseDiagnostic>) -> Self {
        ParseOutcome { root, diagnostics }
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Fatal parse failure, as opposed to a counted [`ParseDiagnostic`]
#[derive(Debug, Error)]
pub enum ParseFailure {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Tree(#[from] TreeError),
}

/// A parser that builds a syntax tree from an input stream.
///
/// Read failures and tree allocation failures are returned as `Err`;
/// malformed input is reported through [`ParseOutcome::diagnostics`].
pub trait SyntaxParser {
    fn parse(&mut self, input: &mut dyn Read) -> Result<ParseOutcome, ParseFailure>;
}

impl<P: SyntaxParser + ?Sized> SyntaxParser for &mut P {
    fn parse(&mut self, input: &mut dyn Read) -> Result<ParseOutcome, ParseFailure> {
        (**self).parse(input)
    }
}
