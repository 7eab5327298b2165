//! Error types for tree construction and dumping
//!
//! Builder contract violations are reported through [`TreeError`] instead of
//! being dropped, since a silently lost subtree corrupts child counts and every
//! later dump without any signal.

use super::node::NodeKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TreeError {
    /// `insert` was called without a parent node
    #[error("insert error: parent node is missing (child '{child}')")]
    MissingParent { child: String },

    /// `insert` was called without a child node
    #[error("insert error: child node is missing (parent '{parent}')")]
    MissingChild { parent: String },

    /// A payload variant that the node kind does not accept
    #[error("payload {payload} does not match node '{name}' of kind {kind:?}")]
    PayloadMismatch {
        name: String,
        kind: NodeKind,
        payload: &'static str,
    },

    /// A value leaf reached the printer before its payload was set
    #[error("node '{name}' (line {lineno}) of kind {kind:?} has no payload")]
    MissingPayload {
        name: String,
        kind: NodeKind,
        lineno: usize,
    },

    /// Growing a child sequence failed
    #[error("out of memory while appending to '{parent}' ({requested} children)")]
    OutOfMemory { parent: String, requested: usize },

    /// The dump sink rejected a write
    #[error("failed to write tree dump: {0}")]
    Io(#[from] std::io::Error),
}
