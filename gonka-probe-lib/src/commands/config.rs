use crate::Result;
use crate::aggregate::{DEFAULT_MAX_CONCURRENT_FETCHES, Sources};
use camino::{Utf8Path, Utf8PathBuf};
use ohno::{EnrichableExt, IntoAppError, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// The configuration file looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "gonka-probe.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// How pages are retrieved
    #[serde(default)]
    pub fetch: FetchSettings,

    /// The pages to collect from
    pub sources: Sources,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FetchSettings {
    /// Number of pages fetched at the same time
    #[serde(default = "default_max_concurrent_fetches")]
    pub max_concurrent_fetches: usize,

    /// Accept invalid or self-signed TLS certificates
    #[serde(default = "default_ignore_https_errors")]
    pub ignore_https_errors: bool,

    /// User-Agent header sent with every request
    #[serde(default)]
    pub user_agent: Option<String>,
}

const fn default_max_concurrent_fetches() -> usize {
    DEFAULT_MAX_CONCURRENT_FETCHES
}

const fn default_ignore_https_errors() -> bool {
    true
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            max_concurrent_fetches: default_max_concurrent_fetches(),
            ignore_https_errors: default_ignore_https_errors(),
            user_agent: None,
        }
    }
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// Without an explicit path, `gonka-probe.toml` in `base_dir` is used when present.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8Path>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading gonka-probe configuration file '{path}'"))?;
            (path.to_path_buf(), text)
        } else {
            let path = base_dir.join(DEFAULT_CONFIG_FILE);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
                Err(e) => return Err(e).into_app_err_with(|| format!("reading gonka-probe configuration file '{path}'")),
            }
        };

        Self::parse(&text, &final_path)
    }

    fn parse(text: &str, path: &Utf8Path) -> Result<Self> {
        let config: Self = toml::from_str(text).into_app_err_with(|| format!("parsing configuration file '{path}'"))?;
        match config.validate() {
            Ok(()) => Ok(config),
            Err(e) => Err(e.enrich_with(|| format!("validating configuration file '{path}'"))),
        }
    }

    /// Save the default configuration to a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// The default location of the configuration file under `base_dir`
    #[must_use]
    pub fn default_path(base_dir: &Utf8Path) -> Utf8PathBuf {
        base_dir.join(DEFAULT_CONFIG_FILE)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch limit is zero, a timeout is zero or a URL is not HTTP(S)
    fn validate(&self) -> Result<()> {
        if self.fetch.max_concurrent_fetches == 0 {
            bail!("max_concurrent_fetches must be at least 1");
        }

        for (kind, endpoint) in self.sources.endpoints() {
            if endpoint.timeout.is_zero() {
                bail!("the timeout of {kind} source '{}' must be greater than zero", endpoint.url);
            }

            if !matches!(endpoint.url.scheme(), "http" | "https") {
                bail!("{kind} source '{}' must use http or https, got '{}'", endpoint.url, endpoint.url.scheme());
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}
