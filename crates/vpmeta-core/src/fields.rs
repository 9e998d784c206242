//! Raw field sets as delivered by a record source.
//!
//! A [`FieldSet`] maps field names to loosely typed JSON values. The typed
//! `*Fields` inputs are produced from it with `TryFrom`, which is where the
//! kind of every value is checked: a personal-data flag that is not a boolean
//! or a list given as a number is a [`crate::Error::Validation`], not a
//! silent coercion.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
  Error, Result,
  distribution::DistributionFields,
  normalize::version_from_value,
  organisation::OrganisationFields,
  resource::ResourceFields,
};

/// Separator used to demultiplex list values given as a single string.
pub const DEFAULT_SEPARATOR: &str = "|";

/// One record's raw fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldSet {
  values:    BTreeMap<String, Value>,
  #[serde(skip)]
  separator: Option<String>,
}

impl FieldSet {
  pub fn new() -> Self { Self::default() }

  /// Builder-style insert.
  pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
    self.values.insert(key.into(), value.into());
    self
  }

  /// Use `separator` instead of [`DEFAULT_SEPARATOR`] when splitting list
  /// values given as strings.
  pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
    self.separator = Some(separator.into());
    self
  }

  pub fn separator(&self) -> &str {
    self.separator.as_deref().unwrap_or(DEFAULT_SEPARATOR)
  }

  pub fn get(&self, key: &str) -> Option<&Value> { self.values.get(key) }

  pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
    self.values.insert(key.into(), value.into());
  }

  /// Set `key` only when the field is absent or null. Used to inherit
  /// run-wide defaults such as the catalog URL.
  pub fn insert_if_absent(&mut self, key: &str, value: impl Into<Value>) {
    match self.values.get(key) {
      Some(v) if !v.is_null() => {}
      _ => {
        self.values.insert(key.to_string(), value.into());
      }
    }
  }

  pub fn is_empty(&self) -> bool { self.values.is_empty() }

  // ── Typed accessors ─────────────────────────────────────────────────────

  /// A single text value. Numbers are accepted (spreadsheet identifiers are
  /// often numeric) and rendered as written; blank strings count as absent.
  pub fn text(&self, key: &'static str) -> Result<Option<String>> {
    match self.values.get(key) {
      None | Some(Value::Null) => Ok(None),
      Some(Value::String(s)) => {
        let s = s.trim();
        Ok((!s.is_empty()).then(|| s.to_string()))
      }
      Some(Value::Number(n)) => Ok(Some(n.to_string())),
      Some(other) => Err(Error::invalid(
        key,
        format!("expected text, got {}", kind_name(other)),
      )),
    }
  }

  /// A list value, in input order. A string is split on the separator; an
  /// array must hold strings. Empty items are dropped.
  pub fn list(&self, key: &'static str) -> Result<Vec<String>> {
    let items: Vec<String> = match self.values.get(key) {
      None | Some(Value::Null) => Vec::new(),
      Some(Value::String(s)) => s
        .split(self.separator())
        .map(|item| item.trim().to_string())
        .collect(),
      Some(Value::Array(values)) => values
        .iter()
        .map(|v| match v {
          Value::String(s) => Ok(s.trim().to_string()),
          other => Err(Error::invalid(
            key,
            format!("expected a list of text, found {}", kind_name(other)),
          )),
        })
        .collect::<Result<_>>()?,
      Some(other) => {
        return Err(Error::invalid(
          key,
          format!("expected a list, got {}", kind_name(other)),
        ));
      }
    };
    Ok(items.into_iter().filter(|item| !item.is_empty()).collect())
  }

  pub fn flag(&self, key: &'static str) -> Result<Option<bool>> {
    match self.values.get(key) {
      None | Some(Value::Null) => Ok(None),
      Some(Value::Bool(b)) => Ok(Some(*b)),
      Some(other) => Err(Error::invalid(
        key,
        format!("expected a boolean, got {}", kind_name(other)),
      )),
    }
  }

  /// A calendar date given as `YYYY-MM-DD` or as an RFC 3339 / ISO 8601
  /// timestamp, of which only the date is kept.
  pub fn date(&self, key: &'static str) -> Result<Option<NaiveDate>> {
    let Some(text) = self.text(key)? else {
      return Ok(None);
    };
    if let Ok(d) = NaiveDate::parse_from_str(&text, "%Y-%m-%d") {
      return Ok(Some(d));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(&text) {
      return Ok(Some(dt.date_naive()));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(&text, "%Y-%m-%dT%H:%M:%S") {
      return Ok(Some(dt.date()));
    }
    Err(Error::invalid(key, format!("{text:?} is not a date")))
  }

  /// The raw version, dropped when not a string.
  pub fn version(&self) -> Option<String> {
    version_from_value(self.values.get("version"))
  }
}

impl FromIterator<(String, Value)> for FieldSet {
  fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
    Self {
      values:    iter.into_iter().collect(),
      separator: None,
    }
  }
}

fn kind_name(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "a boolean",
    Value::Number(_) => "a number",
    Value::String(_) => "text",
    Value::Array(_) => "a list",
    Value::Object(_) => "an object",
  }
}

// ─── Conversions ─────────────────────────────────────────────────────────────

impl TryFrom<&FieldSet> for ResourceFields {
  type Error = Error;

  fn try_from(f: &FieldSet) -> Result<Self> {
    Ok(Self {
      parent_url:    f.text("parent_url")?,
      license:       f.text("license")?,
      title:         f.text("title")?,
      description:   f.text("description")?,
      theme:         f.list("theme")?,
      publisher:     f.text("publisher")?,
      contact_point: f.text("contact_point")?,
      language:      f.text("language")?,
      personal_data: f.flag("personal_data")?,
      conforms_to:   f.text("conforms_to")?,
      vp_connection: f.text("vp_connection")?,
      keyword:       f.list("keyword")?,
      logo:          f.text("logo")?,
      has_policy:    f.list("has_policy")?,
      identifier:    f.text("identifier")?,
      issued:        f.date("issued")?,
      modified:      f.date("modified")?,
      version:       f.version(),
      access_rights: f.list("access_rights")?,
      landing_page:  f.list("landing_page")?,
    })
  }
}

impl TryFrom<&FieldSet> for OrganisationFields {
  type Error = Error;

  fn try_from(f: &FieldSet) -> Result<Self> {
    Ok(Self {
      parent_url:    f.text("parent_url")?,
      title:         f.text("title")?,
      description:   f.text("description")?,
      landing_pages: f.list("landing_pages")?,
      logo:          f.text("logo")?,
      location:      f.text("location")?,
      identifier:    f.text("identifier")?,
    })
  }
}

impl TryFrom<&FieldSet> for DistributionFields {
  type Error = Error;

  fn try_from(f: &FieldSet) -> Result<Self> {
    Ok(Self {
      parent_url:     f.text("parent_url")?,
      license:        f.text("license")?,
      title:          f.text("title")?,
      description:    f.text("description")?,
      publisher:      f.text("publisher")?,
      version:        f.version(),
      access_rights:  f.list("access_rights")?,
      has_policy:     f.list("has_policy")?,
      media_type:     f.text("media_type")?,
      is_part_of:     f.list("is_part_of")?,
      access_url:     f.text("access_url")?,
      download_url:   f.text("download_url")?,
      access_service: f.text("access_service")?,
      conforms_to:    f.text("conforms_to")?,
    })
  }
}
