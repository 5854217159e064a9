//! Command dispatch logic for gonka-probe

use super::{CollectArgs, InitArgs, collect_snapshot, init_config};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};
use std::io::Write;

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "gonka-probe", version, author, long_about = None)]
#[command(about = "Collect public metrics of the Gonka network")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: ProbeSubcommand,
}

#[derive(Subcommand, Debug)]
enum ProbeSubcommand {
    /// Fetch every configured source and report the collected metrics
    Collect(Box<CollectArgs>),
    /// Generate a default configuration file
    Init(InitArgs),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// This function parses the command-line arguments and executes the corresponding
/// subcommand. It's designed to be called from main.rs with the program arguments.
///
/// # Errors
///
/// Returns an error if command parsing fails or if the executed command fails
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) => {
            let exit_code = e.exit_code();
            let rendered = e.render();
            if e.use_stderr() {
                let _ = write!(host.error(), "{rendered}");
            } else {
                let _ = write!(host.output(), "{rendered}");
            }
            host.exit(exit_code);
            return Ok(());
        }
    };

    match &cli.command {
        ProbeSubcommand::Collect(collect_args) => collect_snapshot(host, collect_args).await,
        ProbeSubcommand::Init(init_args) => init_config(host, init_args),
    }
}
