//! Generic syntax tree for C-- parsers
//!
//! The tree is built by parser actions while input is recognized, dumped once
//! for diagnostics, and destroyed once:
//! - [`node`]: node type, kind tags and token payloads
//! - [`builder`]: ordered child insertion
//! - [`traverse`]: preorder walk and the diagnostic dump
//! - [`printer`]: per-node dump formatting
//! - [`destroy`]: post-order teardown
//! - [`stats`]: summary counts used by the viewer and logs
//!
//! # Representation
//!
//! Each node owns its children in a `Vec`, in the order they were inserted.
//! There are no parent or sibling links, so the structure is a tree by
//! construction: attaching a node moves it into its parent.

pub mod builder;
pub mod destroy;
pub mod errors;
pub mod node;
pub mod printer;
pub mod stats;
pub mod traverse;

pub use builder::insert;
pub use destroy::{destroy, destroy_with};
pub use errors::TreeError;
pub use node::{NodeKind, Payload, SyntaxNode};
pub use printer::{format_node, print_node, DumpConfig};
pub use stats::TreeStats;
pub use traverse::{preorder, traverse, Preorder};
