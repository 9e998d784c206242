//! JSON record source.
//!
//! ```json
//! { "records": [ { "type": "dataset", "fields": { "title": "…" } } ] }
//! ```

use std::path::Path;

use anyhow::{Context as _, Result};
use serde::Deserialize;
use vpmeta_core::{FieldSet, RecordType};

#[derive(Debug, Deserialize)]
struct RecordFile {
  records: Vec<SourceRecord>,
}

/// One entry of a record file, not yet validated.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceRecord {
  #[serde(rename = "type")]
  pub record_type: RecordType,
  #[serde(default)]
  pub fields:      FieldSet,
}

impl SourceRecord {
  /// Entries without a title are blank rows of the upstream export.
  pub fn is_blank(&self) -> bool {
    matches!(self.fields.text("title"), Ok(None))
  }
}

/// Run-wide defaults applied to every entry.
#[derive(Debug, Clone, Default)]
pub struct SourceDefaults {
  pub separator:   String,
  pub catalog_url: Option<String>,
}

/// Parse a record file.
pub fn parse(text: &str, defaults: &SourceDefaults) -> Result<Vec<SourceRecord>> {
  let file: RecordFile =
    serde_json::from_str(text).context("record file is not valid JSON")?;

  Ok(
    file
      .records
      .into_iter()
      .map(|mut record| {
        record.fields = record.fields.with_separator(defaults.separator.clone());
        if let Some(catalog_url) = &defaults.catalog_url {
          record.fields.insert_if_absent("parent_url", catalog_url.clone());
        }
        record
      })
      .collect(),
  )
}

/// Read and parse the record file at `path`.
pub fn load(path: &Path, defaults: &SourceDefaults) -> Result<Vec<SourceRecord>> {
  let text = std::fs::read_to_string(path)
    .with_context(|| format!("failed to read records from {path:?}"))?;
  parse(&text, defaults).with_context(|| format!("in {path:?}"))
}

#[cfg(test)]
mod tests {
  use serde_json::Value;
  use vpmeta_core::Record;

  use super::*;

  const FILE: &str = r#"{
    "records": [
      { "type": "organisation",
        "fields": { "title": "Example UMC", "description": "Hospital",
                    "landing_pages": "https://umc.example.org ; https://umc.example.org/en" } },
      { "type": "dataset",
        "fields": { "parent_url": "https://fdp.example.org/catalog/other",
                    "title": "Cohort", "description": "Data",
                    "theme": ["http://www.orpha.net/ORDO/Orphanet_558"],
                    "publisher": "https://fdp.example.org/org/1",
                    "contact_point": "mailto:a@example.org",
                    "language": "EN", "personal_data": true } },
      { "type": "biobank", "fields": { "title": "" } }
    ]
  }"#;

  fn defaults() -> SourceDefaults {
    SourceDefaults {
      separator:   ";".into(),
      catalog_url: Some("https://fdp.example.org/catalog/main".into()),
    }
  }

  #[test]
  fn records_inherit_run_defaults() {
    let records = parse(FILE, &defaults()).unwrap();
    assert_eq!(records.len(), 3);

    assert_eq!(records[0].record_type, RecordType::Organisation);
    assert_eq!(
      records[0].fields.get("parent_url"),
      Some(&Value::from("https://fdp.example.org/catalog/main"))
    );
    assert_eq!(
      records[1].fields.get("parent_url"),
      Some(&Value::from("https://fdp.example.org/catalog/other"))
    );

    let org = Record::from_fields(records[0].record_type, &records[0].fields).unwrap();
    match org {
      Record::Organisation(o) => assert_eq!(o.landing_pages().len(), 2),
      other => panic!("expected an organisation, got {other:?}"),
    }
  }

  #[test]
  fn untitled_entries_are_blank() {
    let records = parse(FILE, &defaults()).unwrap();
    assert!(!records[0].is_blank());
    assert!(!records[1].is_blank());
    assert!(records[2].is_blank());
  }

  #[test]
  fn unknown_type_is_rejected() {
    let err = parse(r#"{ "records": [ { "type": "guideline", "fields": {} } ] }"#, &defaults())
      .unwrap_err();
    assert!(format!("{err:#}").contains("guideline"));
  }

  #[test]
  fn load_names_the_file() {
    let err = load(Path::new("/nonexistent/records.json"), &defaults()).unwrap_err();
    assert!(err.to_string().contains("records.json"));
  }
}
