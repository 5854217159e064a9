//! Report generation for collected snapshots
//!
//! Two generators are provided, each accessed through a `generate` function writing to any
//! [`core::fmt::Write`]:
//! - **Console**: sectioned terminal output, optionally colored, `n/a` for values not found
//! - **JSON**: the serialized [`Snapshot`](crate::records::Snapshot), pretty-printed

mod console;
mod json;

pub use console::generate as generate_console;
pub use json::generate as generate_json;
