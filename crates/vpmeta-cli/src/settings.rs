//! Layered configuration: TOML file, then `VPMETA_*` environment variables,
//! then command-line flags.

use std::{
  fmt,
  path::{Path, PathBuf},
  time::Duration,
};

use anyhow::{Context as _, Result, anyhow};
use serde::Deserialize;
use vpmeta_fdp::{
  RegistryConfig,
  config::{DEFAULT_PUBLISH_ATTEMPTS, DEFAULT_PUBLISH_RETRY_DELAY, DEFAULT_TIMEOUT},
};
use vpmeta_rdf::{GraphBuilder, TemplateSet};

pub const ENV_PREFIX: &str = "VPMETA";

#[derive(Clone, Deserialize)]
pub struct Settings {
  #[serde(default)]
  pub base_url:               Option<String>,
  /// Prefix of the identity URLs the registry hands out. Defaults to
  /// `base_url`.
  #[serde(default)]
  pub persistent_url:         Option<String>,
  #[serde(default)]
  pub username:               Option<String>,
  #[serde(default)]
  pub password:               Option<String>,
  /// Parent of records that name none.
  #[serde(default)]
  pub catalog_url:            Option<String>,
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs:           u64,
  #[serde(default = "default_publish_attempts")]
  pub publish_attempts:       u32,
  #[serde(default = "default_publish_retry_delay_ms")]
  pub publish_retry_delay_ms: u64,
  /// Directory of `<name>.ttl.hbs` files replacing the built-in templates.
  #[serde(default)]
  pub template_dir:           Option<PathBuf>,
  #[serde(default = "default_separator")]
  pub separator:              String,
}

fn default_timeout_secs() -> u64 { DEFAULT_TIMEOUT.as_secs() }

fn default_publish_attempts() -> u32 { DEFAULT_PUBLISH_ATTEMPTS }

fn default_publish_retry_delay_ms() -> u64 {
  DEFAULT_PUBLISH_RETRY_DELAY.as_millis() as u64
}

fn default_separator() -> String { vpmeta_core::fields::DEFAULT_SEPARATOR.to_string() }

/// Flags that take precedence over the file and the environment. The
/// password has no flag so it never shows up in a process listing.
#[derive(Debug, Default, Clone, clap::Args)]
pub struct Overrides {
  /// Registry endpoint, e.g. `http://localhost:8080`.
  #[arg(long, global = true)]
  pub base_url:       Option<String>,
  /// Public prefix of resource URLs issued by the registry.
  #[arg(long, global = true)]
  pub persistent_url: Option<String>,
  #[arg(long, global = true)]
  pub username:       Option<String>,
  #[arg(long, global = true)]
  pub catalog_url:    Option<String>,
  #[arg(long, global = true)]
  pub template_dir:   Option<PathBuf>,
  /// Separator for multi-valued fields given as one string.
  #[arg(long, global = true)]
  pub separator:      Option<String>,
}

impl Settings {
  /// Read `path` (optional), the environment, then `overrides`.
  pub fn load(path: &Path, overrides: &Overrides) -> Result<Self> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix(ENV_PREFIX))
      .set_override_option("base_url", overrides.base_url.clone())?
      .set_override_option("persistent_url", overrides.persistent_url.clone())?
      .set_override_option("username", overrides.username.clone())?
      .set_override_option("catalog_url", overrides.catalog_url.clone())?
      .set_override_option(
        "template_dir",
        overrides
          .template_dir
          .as_ref()
          .map(|p| p.to_string_lossy().into_owned()),
      )?
      .set_override_option("separator", overrides.separator.clone())?
      .build()
      .with_context(|| format!("failed to read configuration from {path:?}"))?
      .try_deserialize()
      .context("failed to deserialise settings")
  }

  /// Registry connection settings. Fails when the endpoint or a credential
  /// is not configured.
  pub fn registry_config(&self) -> Result<RegistryConfig> {
    let base_url = require(&self.base_url, "base_url")?;
    let username = require(&self.username, "username")?;
    let password = require(&self.password, "password")?;

    let mut config = RegistryConfig::new(base_url, username, password)
      .with_timeout(Duration::from_secs(self.timeout_secs))
      .with_publish_policy(
        self.publish_attempts,
        Duration::from_millis(self.publish_retry_delay_ms),
      );
    if let Some(persistent_url) = &self.persistent_url {
      config = config.with_persistent_url(persistent_url.clone());
    }
    Ok(config)
  }

  /// Settings for calls that carry no credentials, such as existence
  /// checks.
  pub fn anonymous_config(&self) -> RegistryConfig {
    RegistryConfig::new(self.base_url.clone().unwrap_or_default(), "", "")
      .with_timeout(Duration::from_secs(self.timeout_secs))
  }

  /// Graph builder over the configured templates.
  pub fn graph_builder(&self) -> Result<GraphBuilder> {
    let templates = match &self.template_dir {
      Some(dir) => TemplateSet::from_dir(dir)
        .with_context(|| format!("failed to load templates from {dir:?}"))?,
      None => TemplateSet::embedded().context("failed to compile built-in templates")?,
    };
    Ok(GraphBuilder::new(templates))
  }
}

fn require<'a>(value: &'a Option<String>, key: &str) -> Result<&'a str> {
  value.as_deref().filter(|v| !v.is_empty()).ok_or_else(|| {
    anyhow!(
      "{key} is not configured; set it in the config file, as {ENV_PREFIX}_{} or with --{}",
      key.to_uppercase(),
      key.replace('_', "-"),
    )
  })
}

impl fmt::Debug for Settings {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Settings")
      .field("base_url", &self.base_url)
      .field("persistent_url", &self.persistent_url)
      .field("username", &self.username)
      .field("password", &self.password.as_ref().map(|_| "<redacted>"))
      .field("catalog_url", &self.catalog_url)
      .field("timeout_secs", &self.timeout_secs)
      .field("publish_attempts", &self.publish_attempts)
      .field("publish_retry_delay_ms", &self.publish_retry_delay_ms)
      .field("template_dir", &self.template_dir)
      .field("separator", &self.separator)
      .finish()
  }
}
