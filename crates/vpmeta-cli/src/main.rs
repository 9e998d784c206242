//! vpmeta binary.
//!
//! Reads `vpmeta.toml` (or the path given with `--config`) plus `VPMETA_*`
//! environment variables, then publishes, renders, or looks up records in a
//! FAIR Data Point.
//!
//! ```text
//! vpmeta publish records.json
//! vpmeta render records.json > preview.ttl
//! vpmeta exists https://fdp.example.org/dataset/1234
//! ```

mod run;
mod settings;
mod source;

use std::path::PathBuf;

use anyhow::{Context as _, bail};
use clap::{Parser, Subcommand};
use settings::{Overrides, Settings};
use source::SourceDefaults;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use vpmeta_fdp::FdpClient;

#[derive(Parser)]
#[command(author, version, about = "Publish research-resource metadata to a FAIR Data Point")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "vpmeta.toml", global = true)]
  config: PathBuf,

  #[command(flatten)]
  overrides: Overrides,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Create and publish every record of a JSON record file, in order.
  Publish {
    records: PathBuf,
  },
  /// Print the Turtle of every record without contacting the registry.
  Render {
    records: PathBuf,
  },
  /// Check whether resource URLs resolve (HTTP 200).
  Exists {
    #[arg(required = true)]
    urls: Vec<String>,
  },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let settings = Settings::load(&cli.config, &cli.overrides)?;
  tracing::debug!(?settings, "loaded settings");

  let defaults = SourceDefaults {
    separator:   settings.separator.clone(),
    catalog_url: settings.catalog_url.clone(),
  };

  match cli.command {
    Command::Publish { records } => {
      let records = source::load(&records, &defaults)?;
      let builder = settings.graph_builder()?;
      let client = FdpClient::new(settings.registry_config()?)
        .context("failed to build HTTP client")?;

      let summary = run::publish_all(&client, &builder, &records).await?;
      tracing::info!(
        published = summary.published.len(),
        skipped = summary.skipped,
        failed = summary.failed,
        "run finished"
      );
      if !summary.is_success() {
        bail!("{} of {} records failed", summary.failed, records.len());
      }
    }

    Command::Render { records } => {
      let records = source::load(&records, &defaults)?;
      let builder = settings.graph_builder()?;
      for text in run::render_all(&builder, &records)? {
        println!("{text}");
      }
    }

    Command::Exists { urls } => {
      let client = FdpClient::new(settings.anonymous_config())
        .context("failed to build HTTP client")?;
      for url in urls {
        let present = client
          .exists(&url)
          .await
          .with_context(|| format!("failed to reach {url}"))?;
        println!("{url}\t{}", if present { "present" } else { "absent" });
      }
    }
  }

  Ok(())
}
