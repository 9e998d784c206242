//! The sequential publish run.

use anyhow::{Context as _, Result};
use vpmeta_core::Record;
use vpmeta_fdp::FdpClient;
use vpmeta_rdf::{GraphBuilder, Renderer};

use crate::source::SourceRecord;

/// Outcome of a run. Identity URLs are in input order.
#[derive(Debug, Default)]
pub struct Summary {
  pub published: Vec<String>,
  pub skipped:   usize,
  pub failed:    usize,
}

impl Summary {
  pub fn is_success(&self) -> bool { self.failed == 0 }
}

/// Publish `records` one after the other.
///
/// Invalid records and registry rejections are logged and counted; an
/// authentication failure aborts the run since every later record would
/// fail the same way.
pub async fn publish_all<R: Renderer>(
  client: &FdpClient,
  builder: &GraphBuilder<R>,
  records: &[SourceRecord],
) -> Result<Summary> {
  let mut summary = Summary::default();

  for (index, entry) in records.iter().enumerate() {
    if entry.is_blank() {
      tracing::warn!(index, record_type = %entry.record_type, "skipping record without a title");
      summary.skipped += 1;
      continue;
    }

    let record = match Record::from_fields(entry.record_type, &entry.fields) {
      Ok(record) => record,
      Err(e) => {
        tracing::error!(index, record_type = %entry.record_type, "invalid record: {e}");
        summary.failed += 1;
        continue;
      }
    };

    match client.publish_record(builder, &record).await {
      Ok(url) => {
        tracing::info!(index, title = record.title(), %url, "published {}", record.resource_type());
        summary.published.push(url);
      }
      Err(e) if e.is_authentication() => {
        return Err(e).context("authentication failed, aborting the run");
      }
      Err(e) => {
        tracing::error!(index, title = record.title(), "failed to publish: {e}");
        summary.failed += 1;
      }
    }
  }

  Ok(summary)
}

/// Render every record to Turtle without contacting a registry.
pub fn render_all<R: Renderer>(
  builder: &GraphBuilder<R>,
  records: &[SourceRecord],
) -> Result<Vec<String>> {
  records
    .iter()
    .enumerate()
    .filter(|(_, entry)| !entry.is_blank())
    .map(|(index, entry)| {
      let record = Record::from_fields(entry.record_type, &entry.fields)
        .with_context(|| format!("record {index} ({})", entry.record_type))?;
      let document = builder
        .build(&record)
        .with_context(|| format!("record {index} ({})", entry.record_type))?;
      Ok(document.text)
    })
    .collect()
}
