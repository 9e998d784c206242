//! Field-level normalisation and validation helpers shared by every record
//! type.

use serde_json::Value;

use crate::{Error, Result};

/// Vocabulary base onto which two-letter language codes are appended.
pub const LANGUAGE_VOCABULARY: &str = "http://id.loc.gov/vocabulary/iso639-1/";

/// Version assigned when a record carries no usable version string.
pub const DEFAULT_VERSION: &str = "1";

// ─── Language ────────────────────────────────────────────────────────────────

/// Turn a bare ISO 639-1 code (`"en"`) into its vocabulary URI.
///
/// Already-qualified URIs are rejected rather than passed through, so a value
/// can never be prefixed twice.
pub fn normalize_language(code: &str) -> Result<String> {
  let code = code.trim();
  if code.is_empty() {
    return Err(Error::missing("language"));
  }
  if code.contains(':') || code.contains('/') {
    return Err(Error::invalid(
      "language",
      format!("expected a two-letter code, got a URI: {code}"),
    ));
  }
  if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
    return Err(Error::invalid(
      "language",
      format!("expected a two-letter code, got {code:?}"),
    ));
  }
  Ok(format!("{LANGUAGE_VOCABULARY}{}", code.to_ascii_lowercase()))
}

// ─── Version ─────────────────────────────────────────────────────────────────

/// Default-assign the version: a missing or blank version becomes
/// [`DEFAULT_VERSION`]. The registry schema requires a version on every
/// resource, so this is assignment of the schema default, not data loss.
pub fn normalize_version(version: Option<&str>) -> String {
  match version {
    Some(v) if !v.trim().is_empty() => v.to_string(),
    _ => DEFAULT_VERSION.to_string(),
  }
}

/// Raw version cells that are not strings (numbers, dates, booleans) carry no
/// usable version and map to `None`, which [`normalize_version`] then
/// defaults.
pub fn version_from_value(value: Option<&Value>) -> Option<String> {
  match value {
    Some(Value::String(s)) => Some(s.clone()),
    _ => None,
  }
}

// ─── Required / optional values ──────────────────────────────────────────────

pub(crate) fn require_text(
  field: &'static str,
  value: Option<String>,
) -> Result<String> {
  match value {
    Some(v) if !v.trim().is_empty() => Ok(v),
    _ => Err(Error::missing(field)),
  }
}

/// Characters a Turtle IRI reference cannot hold. `url` percent-encodes most
/// of them when serializing, but leaves some (`|`, `^`) in paths and queries.
const IRI_FORBIDDEN: &[char] = &['<', '>', '"', '{', '}', '|', '^', '`', '\\', ' '];

/// Parse `value` as an absolute URL and return its serialized form, which is
/// what gets published.
pub(crate) fn normalize_uri(field: &'static str, value: &str) -> Result<String> {
  let url = url::Url::parse(value.trim())
    .map_err(|e| Error::invalid(field, format!("{value:?} is not a URI: {e}")))?;
  let normalized = String::from(url);
  if let Some(c) = normalized
    .chars()
    .find(|c| IRI_FORBIDDEN.contains(c) || c.is_control())
  {
    return Err(Error::invalid(
      field,
      format!("{value:?} contains {c:?}, which an IRI cannot hold"),
    ));
  }
  Ok(normalized)
}

pub(crate) fn require_uri(
  field: &'static str,
  value: Option<String>,
) -> Result<String> {
  let value = require_text(field, value)?;
  normalize_uri(field, &value)
}

pub(crate) fn optional_uri(
  field: &'static str,
  value: Option<String>,
) -> Result<Option<String>> {
  match value {
    Some(v) if !v.trim().is_empty() => normalize_uri(field, &v).map(Some),
    _ => Ok(None),
  }
}

/// A media type is either a bare `type/subtype` token, later expanded to its
/// IANA IRI, or a full URI.
pub(crate) fn optional_media_type(value: Option<String>) -> Result<Option<String>> {
  let Some(v) = optional_text(value) else {
    return Ok(None);
  };
  let v = v.trim();
  if v.contains("://") {
    return normalize_uri("media_type", v).map(Some);
  }
  let is_token = |part: &str| {
    !part.is_empty()
      && part
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "!#$&-_.+".contains(c))
  };
  match v.split_once('/') {
    Some((kind, subtype)) if is_token(kind) && is_token(subtype) => Ok(Some(v.to_string())),
    _ => Err(Error::invalid(
      "media_type",
      format!("{v:?} is neither a type/subtype media type nor a URI"),
    )),
  }
}

pub(crate) fn optional_text(value: Option<String>) -> Option<String> {
  value.filter(|v| !v.trim().is_empty())
}

/// Normalize every element of a URI list, preserving order.
pub(crate) fn uri_list(
  field: &'static str,
  values: Vec<String>,
) -> Result<Vec<String>> {
  values.iter().map(|v| normalize_uri(field, v)).collect()
}

pub(crate) fn require_uri_list(
  field: &'static str,
  values: Vec<String>,
) -> Result<Vec<String>> {
  if values.is_empty() {
    return Err(Error::invalid(field, "at least one value is required"));
  }
  uri_list(field, values)
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn language_code_is_prefixed() {
    assert_eq!(
      normalize_language("en").unwrap(),
      "http://id.loc.gov/vocabulary/iso639-1/en"
    );
    assert_eq!(
      normalize_language(" NL ").unwrap(),
      format!("{LANGUAGE_VOCABULARY}nl")
    );
  }

  #[test]
  fn qualified_language_uri_is_rejected() {
    let err =
      normalize_language("http://id.loc.gov/vocabulary/iso639-1/en").unwrap_err();
    assert!(err.is_validation());
    assert!(err.to_string().contains("URI"));
  }

  #[test]
  fn malformed_language_codes_are_rejected() {
    for bad in ["", "eng", "e", "e1"] {
      assert!(normalize_language(bad).is_err(), "{bad:?} accepted");
    }
  }

  #[test]
  fn version_defaults_to_one() {
    assert_eq!(normalize_version(None), "1");
    assert_eq!(normalize_version(Some("")), "1");
    assert_eq!(normalize_version(Some("   ")), "1");
    assert_eq!(normalize_version(Some("2.3")), "2.3");
  }

  #[test]
  fn non_string_version_values_are_dropped() {
    assert_eq!(version_from_value(Some(&json!(2))), None);
    assert_eq!(version_from_value(Some(&json!(true))), None);
    assert_eq!(version_from_value(None), None);
    assert_eq!(version_from_value(Some(&json!("2.3"))), Some("2.3".into()));
  }

  #[test]
  fn uri_checks() {
    assert!(require_uri("publisher", Some("https://example.org/p".into())).is_ok());
    assert!(require_uri("publisher", Some("not a uri".into())).is_err());
    assert!(require_uri("publisher", None).is_err());
    assert_eq!(optional_uri("logo", Some("  ".into())).unwrap(), None);
    assert!(require_uri_list("theme", vec![]).is_err());
  }

  #[test]
  fn uris_are_stored_percent_encoded() {
    assert_eq!(
      require_uri("publisher", Some("https://example.org/my org".into())).unwrap(),
      "https://example.org/my%20org"
    );
    assert_eq!(
      require_uri(
        "publisher",
        Some("https://example.org/x>,<https://evil.example/y".into())
      )
      .unwrap(),
      "https://example.org/x%3E,%3Chttps://evil.example/y"
    );
    assert_eq!(
      uri_list("theme", vec![" http://a.example/t\"a\" ".into()]).unwrap(),
      ["http://a.example/t%22a%22"]
    );
  }

  #[test]
  fn media_types() {
    assert_eq!(
      optional_media_type(Some("text/csv".into())).unwrap().as_deref(),
      Some("text/csv")
    );
    assert_eq!(
      optional_media_type(Some("application/ld+json".into())).unwrap().as_deref(),
      Some("application/ld+json")
    );
    assert_eq!(optional_media_type(Some(" ".into())).unwrap(), None);
    for bad in ["text/csv>,<https://evil.example/y", "csv", "text/ csv", "a/b/c"] {
      assert!(optional_media_type(Some(bad.into())).is_err(), "{bad:?} accepted");
    }
  }

  #[test]
  fn stored_uris_never_hold_iri_forbidden_characters() {
    for raw in [
      "https://example.org/a|b",
      "https://example.org/a^b",
      "https://example.org/?q={x}",
      "https://example.org/`tick`",
    ] {
      match optional_uri("logo", Some(raw.into())) {
        Ok(Some(v)) => assert!(
          !v.contains(IRI_FORBIDDEN),
          "{raw:?} stored as {v:?}"
        ),
        Ok(None) => panic!("{raw:?} dropped"),
        Err(e) => assert!(e.is_validation()),
      }
    }
  }
}
