use super::Host;
use super::ProgressReporter;
use super::common::{ColorMode, LogLevel, ReportFormat, init_logging};
use super::config::Config;
use crate::Result;
use crate::aggregate::Aggregator;
use crate::fetch::{DEFAULT_USER_AGENT, HttpFetcher};
use crate::reports::{generate_console, generate_json};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use core::time::Duration;
use ohno::{IntoAppError, bail};
use std::fs;
use std::io::Write;

const LOG_TARGET: &str = "   collect";

#[derive(Parser, Debug)]
pub struct CollectArgs {
    /// Path to configuration file (default is `gonka-probe.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Report format
    #[arg(long, value_name = "FORMAT", default_value = "console")]
    pub format: ReportFormat,

    /// Write the report to a file instead of to the terminal
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<Utf8PathBuf>,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none")]
    pub log_level: LogLevel,

    /// User-Agent header sent with every request, overriding the configuration file
    #[arg(long, value_name = "AGENT")]
    pub user_agent: Option<String>,

    /// Exit with status code 1 if any source could not be retrieved
    #[arg(long)]
    pub fail_on_error: bool,
}

pub async fn collect_snapshot<H: Host>(host: &mut H, args: &CollectArgs) -> Result<()> {
    init_logging(args.log_level);

    let config = Config::load(Utf8Path::new("."), args.config.as_deref())?;

    let user_agent = args
        .user_agent
        .as_deref()
        .or(config.fetch.user_agent.as_deref())
        .unwrap_or(DEFAULT_USER_AGENT);
    let fetcher = HttpFetcher::new(user_agent, config.fetch.ignore_https_errors)?;

    let delay = if args.log_level == LogLevel::None {
        Duration::from_millis(300)
    } else {
        Duration::from_hours(365 * 24)
    };
    let progress = ProgressReporter::new(delay, args.color.use_colors_on_stderr());

    let aggregator = Aggregator::new(fetcher, progress).with_max_concurrent_fetches(config.fetch.max_concurrent_fetches);
    let snapshot = aggregator.aggregate(&config.sources).await;

    let mut report = String::new();
    match args.format {
        ReportFormat::Console => {
            let use_colors = args.output.is_none() && args.color.use_colors_on_stdout();
            generate_console(&snapshot, use_colors, &mut report)?;
        }
        ReportFormat::Json => generate_json(&snapshot, &mut report)?,
    }

    if let Some(path) = &args.output {
        fs::write(path, report).into_app_err_with(|| format!("writing report to '{path}'"))?;
        log::info!(target: LOG_TARGET, "Report written to '{path}'");
    } else {
        let _ = write!(host.output(), "{report}");
    }

    let failed = snapshot.failed_count();
    if failed > 0 {
        let _ = writeln!(
            host.error(),
            "{failed} of {} sources could not be retrieved",
            snapshot.record_count()
        );

        if args.fail_on_error {
            bail!("one or more sources could not be retrieved");
        }
    }

    Ok(())
}
