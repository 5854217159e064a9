//! Label-anchored text extraction
//!
//! The building blocks every source strategy is composed of:
//!
//! - [`normalize`] canonicalizes whitespace so patterns match reliably.
//! - [`find_near_label`] locates a label and returns the first value-shaped token within a
//!   character window around it. The window makes the search independent of DOM structure.
//! - [`rule_chain`] evaluates ordered fallback rules until one yields a value.
//! - [`dom`] holds the small structural queries used by the precise extraction tier.
//! - [`patterns`] is the versioned table of every label and value pattern.

pub mod dom;
mod normalize;
pub mod patterns;
mod proximity;
pub mod rule_chain;

pub use normalize::normalize;
pub use proximity::{DEFAULT_WINDOW, find_near_label};
