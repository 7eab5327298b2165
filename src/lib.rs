//! # Introduction
//!
//! cmmtree builds the syntax tree of a C-- source file, dumps it in the
//! classic indented form and, on request, opens it in a terminal viewer.
//!
//! ## Pipeline
//!
//! ```text
//! File → SyntaxParser → SyntaxNode tree → dump / viewer → destroy
//! ```
//!
//! 1. [`tree`]: the syntax tree: node creation, ordered insertion, preorder
//!    dump, post-order destruction.
//! 2. [`parser`]: the [`parser::SyntaxParser`] seam grammar-driven parsers
//!    plug into, plus a token-level stand-in. The stand-in and its lexer are
//!    demo-only: they let the binary run end to end and derive no grammar
//!    productions.
//! 3. [`driver`]: one run: open, parse, dump when clean, destroy.
//! 4. [`config`] and [`logging`]: command line and `tracing` setup.
//! 5. [`ui`]: ratatui-based viewer; not part of the stable library API.
//!
//! ## Dump format
//!
//! ```text
//! Program (1)
//!   ExtDefList (1)
//!     ExtDef (1)
//!       Specifier (1)
//!         TYPE: int
//!       FunDec (1)
//!         ID: main
//!         LP
//!         RP
//! ```

pub mod config;
pub mod driver;
pub mod logging;
pub mod parser;
pub mod tree;
pub mod ui;
