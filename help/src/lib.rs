//! Help and usage text for [`flagtrie_core::Parser`] registries.
//!
//! - [`render_help`] lists positional arguments and parameters with their
//!   descriptions aligned on a fixed column and word-wrapped.
//! - [`render_usage`] prints the one-line `usage:` summary.
//! - [`wrap_words`] is the greedy wrapper both use.
//!
//! Only spec metadata is read; rendering never touches parse state.

mod layout;
mod render;
mod wrap;

pub use layout::{
    DEFAULT_INDENT, DEFAULT_WIDTH, HelpLayout, arg_label, flag_column, positional_column,
};
pub use render::{render_help, render_usage};
pub use wrap::wrap_words;
