//! Viewer pane rendering
//!
//! Each pane is a stateless render function; scroll state lives in
//! [`App`](crate::ui::app::App).
//!
//! - [`tree`]: indented tree with fold markers and the selected row
//! - [`details`]: selected node fields and tree summary
//! - [`status`]: status bar with keybindings

pub mod details;
pub mod status;
pub mod tree;

pub use details::render_details_pane;
pub use status::render_status_bar;
pub use tree::render_tree_pane;
