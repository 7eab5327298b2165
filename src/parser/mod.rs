//! Parser collaborators
//!
//! Grammar-driven parsers live outside this crate; they fill a
//! [`SyntaxNode`](crate::tree::SyntaxNode) tree through the tree module and
//! report to the driver through [`SyntaxParser`]:
//! - [`collaborator`]: the [`SyntaxParser`] trait and its outcome types
//! - [`lexer`]: C-- token scanner, demo-only, used by the stand-in
//! - [`token_stream`]: token-level stand-in parser used by the binary

pub mod collaborator;
pub mod lexer;
pub mod token_stream;

pub use collaborator::{DiagnosticKind, ParseDiagnostic, ParseFailure, ParseOutcome, SyntaxParser};
pub use token_stream::TokenStreamParser;
