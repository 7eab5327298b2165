//! Per-node formatting for the diagnostic dump
//!
//! One line per node, indented by two spaces per depth level:
//!
//! ```text
//! Program (1)
//!   ExtDefList (1)
//!     Specifier (1)
//!       TYPE: int
//!     INT: 42
//!     FLOAT: 3.500000
//! ```
//!
//! Epsilon non-terminals are suppressed unless the dump is verbose, and even
//! then they are written without indentation.

use super::errors::TreeError;
use super::node::{NodeKind, SyntaxNode};
use std::io::Write;

const INDENT: &str = "  ";

/// Runtime switches for the diagnostic dump.
///
/// The default is disabled: dumping is opt-in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DumpConfig {
    /// Emit the dump at all
    pub enabled: bool,
    /// Also emit epsilon non-terminals
    pub verbose: bool,
}

impl DumpConfig {
    pub fn enabled() -> Self {
        DumpConfig {
            enabled: true,
            verbose: false,
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// Format one node at `depth`, or `None` when the node is not printed.
pub fn format_node(
    node: &SyntaxNode,
    depth: usize,
    verbose: bool,
) -> Result<Option<String>, TreeError> {
    let kind = node.kind();

    if kind.carries_value() && node.payload().is_unset() {
        return Err(TreeError::MissingPayload {
            name: node.name().to_string(),
            kind,
            lineno: node.lineno(),
        });
    }

    let line = match kind {
        NodeKind::EpsilonNonTerminal => {
            if !verbose {
                return Ok(None);
            }
            return Ok(Some(format!("{} ({})", node.name(), node.lineno())));
        }
        NodeKind::NonTerminal => format!("{} ({})", node.name(), node.lineno()),
        NodeKind::IdentifierLeaf
        | NodeKind::TypeLeaf
        | NodeKind::IntLiteralLeaf
        | NodeKind::FloatLiteralLeaf => format!("{}: {}", node.name(), node.payload()),
        NodeKind::NoValueLeaf => node.name().to_string(),
    };

    Ok(Some(format!("{}{}", INDENT.repeat(depth), line)))
}

/// Write the line for one node, if it has one.
pub fn print_node<W: Write>(
    out: &mut W,
    node: &SyntaxNode,
    depth: usize,
    verbose: bool,
) -> Result<(), TreeError> {
    if let Some(line) = format_node(node, depth, verbose)? {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(node: &SyntaxNode, depth: usize) -> String {
        format_node(node, depth, false).unwrap().unwrap()
    }

    #[test]
    fn test_non_terminal_shows_line_number() {
        assert_eq!(line(&SyntaxNode::non_terminal("ExtDef", 7), 1), "  ExtDef (7)");
    }

    #[test]
    fn test_int_leaf() {
        let text = line(&SyntaxNode::int_literal(42, 1), 0);
        assert!(text.contains("INT"));
        assert!(text.contains("42"));
        assert_eq!(text, "INT: 42");
    }

    #[test]
    fn test_float_leaf_is_fixed_point() {
        let text = line(&SyntaxNode::float_literal(3.5, 1), 2);
        assert_eq!(text, "    FLOAT: 3.500000");
        assert!(!text.contains("e0"));
    }

    #[test]
    fn test_identifier_and_type_leaves() {
        assert_eq!(line(&SyntaxNode::identifier("foo", 1), 0), "ID: foo");
        assert_eq!(line(&SyntaxNode::type_name("float", 1), 1), "  TYPE: float");
    }

    #[test]
    fn test_no_value_leaf_prints_name_only() {
        assert_eq!(line(&SyntaxNode::token("SEMI", 9), 3), "      SEMI");
    }

    #[test]
    fn test_epsilon_hidden_unless_verbose() {
        let node = SyntaxNode::epsilon("DefList", 4);
        assert_eq!(format_node(&node, 2, false).unwrap(), None);
        assert_eq!(
            format_node(&node, 2, true).unwrap(),
            Some("DefList (4)".to_string())
        );
    }

    #[test]
    fn test_unset_value_leaf_is_an_error() {
        let node = SyntaxNode::new("ID", NodeKind::IdentifierLeaf, 2);
        let err = format_node(&node, 0, false).unwrap_err();
        assert!(matches!(err, TreeError::MissingPayload { lineno: 2, .. }));
    }

    #[test]
    fn test_print_node_writes_newline() {
        let mut out = Vec::new();
        print_node(&mut out, &SyntaxNode::token("LP", 1), 1, false).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "  LP\n");
    }
}
