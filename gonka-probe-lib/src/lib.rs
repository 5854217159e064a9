#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for gonka-probe
//!
//! This library consolidates all functionality for the gonka-probe tool, which collects public
//! metrics of the Gonka network (node dashboards, community, follower, repository and price pages)
//! into a single snapshot.
//!
//! # Module Organization
//!
//! - [`commands`]: Command-line interface and orchestration
//! - [`aggregate`]: Running every source and assembling the snapshot
//! - [`fetch`]: The page retrieval boundary and its HTTP implementation
//! - [`sources`]: Per-source extraction strategies
//! - [`extract`]: Text normalization, label proximity and pattern tables
//! - [`records`]: Typed result records
//! - [`reports`]: Console and JSON report generation

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod aggregate;
pub mod extract;
pub mod fetch;
pub mod records;
pub mod sources;

#[cfg(any(debug_assertions, test))]
pub mod commands;
#[cfg(not(any(debug_assertions, test)))]
mod commands;

#[cfg(any(debug_assertions, test))]
pub mod reports;
#[cfg(not(any(debug_assertions, test)))]
mod reports;

pub use crate::commands::{Host, run};
