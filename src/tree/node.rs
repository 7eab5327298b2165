//! Syntax tree node definitions

use super::errors::TreeError;
use std::fmt;
use std::mem;

/// Type tag of a syntax tree node.
///
/// The tag decides which [`Payload`] variant a node may carry and how the
/// printer renders it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Grammar symbol deriving at least one token
    NonTerminal,
    /// Grammar symbol that derived the empty string
    EpsilonNonTerminal,
    /// `ID` token, carries the lexeme
    IdentifierLeaf,
    /// `TYPE` token, carries the type name
    TypeLeaf,
    /// `INT` token, carries the integer value
    IntLiteralLeaf,
    /// `FLOAT` token, carries the floating-point value
    FloatLiteralLeaf,
    /// Any other token (punctuation, keywords, operators)
    NoValueLeaf,
}

impl NodeKind {
    /// Whether this kind stands for a token rather than a grammar symbol
    pub fn is_leaf(self) -> bool {
        !matches!(self, NodeKind::NonTerminal | NodeKind::EpsilonNonTerminal)
    }

    /// Whether a node of this kind is printed with a value after its name
    pub fn carries_value(self) -> bool {
        matches!(
            self,
            NodeKind::IdentifierLeaf
                | NodeKind::TypeLeaf
                | NodeKind::IntLiteralLeaf
                | NodeKind::FloatLiteralLeaf
        )
    }

    /// Whether `payload` is the variant this kind stores
    pub fn accepts(self, payload: &Payload) -> bool {
        match (self, payload) {
            (_, Payload::Unset) => true,
            (NodeKind::IntLiteralLeaf, Payload::Int(_)) => true,
            (NodeKind::FloatLiteralLeaf, Payload::Float(_)) => true,
            (NodeKind::IdentifierLeaf | NodeKind::TypeLeaf, Payload::Text(_)) => true,
            _ => false,
        }
    }
}

/// Token value attached to a leaf
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Payload {
    #[default]
    Unset,
    Int(i32),
    Float(f32),
    Text(String),
}

impl Payload {
    pub fn variant_name(&self) -> &'static str {
        match self {
            Payload::Unset => "unset",
            Payload::Int(_) => "int",
            Payload::Float(_) => "float",
            Payload::Text(_) => "text",
        }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, Payload::Unset)
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Unset => Ok(()),
            Payload::Int(n) => write!(f, "{}", n),
            // Fixed-point with six places, never scientific notation
            Payload::Float(x) => write!(f, "{:.6}", x),
            Payload::Text(s) => write!(f, "{}", s),
        }
    }
}

/// A node of the syntax tree.
///
/// Children are owned in insertion order, which is the left-to-right order in
/// which the parser recognized them. A node can be attached to at most one
/// parent because attaching moves it.
pub struct SyntaxNode {
    name: String,
    kind: NodeKind,
    lineno: usize,
    payload: Payload,
    pub(crate) children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    /// Create a node with no children and an unset payload.
    ///
    /// Value leaves created this way must get their payload through
    /// [`SyntaxNode::set_payload`] before they are printed.
    pub fn new(name: impl Into<String>, kind: NodeKind, lineno: usize) -> Self {
        SyntaxNode {
            name: name.into(),
            kind,
            lineno,
            payload: Payload::Unset,
            children: Vec::new(),
        }
    }

    pub fn non_terminal(name: impl Into<String>, lineno: usize) -> Self {
        Self::new(name, NodeKind::NonTerminal, lineno)
    }

    pub fn epsilon(name: impl Into<String>, lineno: usize) -> Self {
        Self::new(name, NodeKind::EpsilonNonTerminal, lineno)
    }

    pub fn identifier(lexeme: impl Into<String>, lineno: usize) -> Self {
        Self::new("ID", NodeKind::IdentifierLeaf, lineno).with_text(lexeme)
    }

    pub fn type_name(lexeme: impl Into<String>, lineno: usize) -> Self {
        Self::new("TYPE", NodeKind::TypeLeaf, lineno).with_text(lexeme)
    }

    pub fn int_literal(value: i32, lineno: usize) -> Self {
        let mut node = Self::new("INT", NodeKind::IntLiteralLeaf, lineno);
        node.payload = Payload::Int(value);
        node
    }

    pub fn float_literal(value: f32, lineno: usize) -> Self {
        let mut node = Self::new("FLOAT", NodeKind::FloatLiteralLeaf, lineno);
        node.payload = Payload::Float(value);
        node
    }

    /// A token without a value, e.g. `SEMI` or `RETURN`
    pub fn token(name: impl Into<String>, lineno: usize) -> Self {
        Self::new(name, NodeKind::NoValueLeaf, lineno)
    }

    fn with_text(mut self, text: impl Into<String>) -> Self {
        self.payload = Payload::Text(text.into());
        self
    }

    /// Populate the payload of a node created with [`SyntaxNode::new`].
    pub fn set_payload(&mut self, payload: Payload) -> Result<(), TreeError> {
        if !self.kind.accepts(&payload) {
            return Err(TreeError::PayloadMismatch {
                name: self.name.clone(),
                kind: self.kind,
                payload: payload.variant_name(),
            });
        }
        self.payload = payload;
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn lineno(&self) -> usize {
        self.lineno
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Direct children in insertion order
    pub fn children(&self) -> &[SyntaxNode] {
        &self.children
    }

    /// Mutable access to a child that is already attached
    pub fn child_mut(&mut self, index: usize) -> Option<&mut SyntaxNode> {
        self.children.get_mut(index)
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Number of nodes in the subtree rooted here, including this node
    pub fn subtree_size(&self) -> usize {
        super::traverse::preorder(self).count()
    }

    /// Copy of this node without its children
    fn shallow_copy(&self) -> Self {
        SyntaxNode {
            name: self.name.clone(),
            kind: self.kind,
            lineno: self.lineno,
            payload: self.payload.clone(),
            children: Vec::new(),
        }
    }

    fn same_fields(&self, other: &Self) -> bool {
        self.name == other.name
            && self.kind == other.kind
            && self.lineno == other.lineno
            && self.payload == other.payload
            && self.children.len() == other.children.len()
    }
}

// Clone, PartialEq and Debug walk the tree with explicit stacks or not at all,
// so deep trees never recurse.

impl Clone for SyntaxNode {
    fn clone(&self) -> Self {
        let mut pending: Vec<(&SyntaxNode, bool)> = vec![(self, false)];
        // Finished copies; a node's children are always the last entries
        let mut built: Vec<SyntaxNode> = Vec::new();

        while let Some((node, expanded)) = pending.pop() {
            if expanded {
                let mut copy = node.shallow_copy();
                let first = built.len() - node.children.len();
                copy.children = built.split_off(first);
                built.push(copy);
            } else {
                pending.push((node, true));
                pending.extend(node.children.iter().rev().map(|child| (child, false)));
            }
        }

        built.pop().unwrap_or_else(|| self.shallow_copy())
    }
}

impl PartialEq for SyntaxNode {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];
        while let Some((a, b)) = pending.pop() {
            if !a.same_fields(b) {
                return false;
            }
            pending.extend(a.children.iter().zip(b.children.iter()));
        }
        true
    }
}

impl fmt::Debug for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyntaxNode")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("lineno", &self.lineno)
            .field("payload", &self.payload)
            .field("children", &self.children.len())
            .finish()
    }
}

impl Drop for SyntaxNode {
    // Flatten the subtree before it is dropped so deep trees never recurse.
    fn drop(&mut self) {
        let mut pending = mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}
