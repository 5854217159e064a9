//! Command-line interface and orchestration for gonka-probe
//!
//! This module implements the CLI commands and wires the aggregation engine to the outside world:
//! argument parsing, configuration management, logging setup and report output.
//!
//! ## Commands
//!
//! - **collect**: Load the configuration, fetch every source page through the
//!   [`HttpFetcher`](crate::fetch::HttpFetcher), and print or save the console or JSON report
//! - **init**: Generate a default configuration file listing the default sources
//!
//! ## Execution Flow
//!
//! The `run` function parses command-line arguments using clap and routes to the appropriate
//! command handler. All output goes through the [`Host`] so commands can be tested end-to-end.
//!
//! Configuration is managed through a TOML file with a `[fetch]` table and a `[sources]` table.

mod collect;
mod common;
mod config;
mod host;
mod init;
mod progress_reporter;
mod run;

pub use collect::{CollectArgs, collect_snapshot};
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use progress_reporter::ProgressReporter;
pub use run::run;
