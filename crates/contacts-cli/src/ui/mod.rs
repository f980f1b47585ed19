//! UI primitives for the Contacts CLI.
//!
//! - **Context**: Environment detection (TTY, width, color, unicode)
//! - **Mode**: Output mode resolution (plain, pretty)
//! - **Theme**: Badge tokens and styles
//! - **Render**: Badges, dividers, contact cards and page tables
//! - **Format**: String utilities (truncate, center)

mod context;
pub mod format;
pub mod mode;
pub mod render;
pub mod theme;

pub use context::UiContext;

pub use render::{contact_card, divider, notice, page_table, print_error};
