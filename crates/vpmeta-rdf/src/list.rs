//! Rendering of list-valued fields into Turtle object lists.
//!
//! A list becomes a comma-separated object list (`<a>, <b>` or `"a", "b"`)
//! that a template drops in after a predicate. An empty list renders as the
//! empty string, which templates treat as "no values".

/// Escape `s` for use inside a double-quoted Turtle string literal.
pub fn escape_literal(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  for c in s.chars() {
    match c {
      '\\' => out.push_str("\\\\"),
      '"' => out.push_str("\\\""),
      '\n' => out.push_str("\\n"),
      '\r' => out.push_str("\\r"),
      '\t' => out.push_str("\\t"),
      c => out.push(c),
    }
  }
  out
}

/// `<a>, <b>, <c>`
pub fn uri_list<S: AsRef<str>>(uris: &[S]) -> String {
  uris
    .iter()
    .map(|u| format!("<{}>", u.as_ref()))
    .collect::<Vec<_>>()
    .join(", ")
}

/// `"a", "b", "c"`, each value escaped.
pub fn literal_list<S: AsRef<str>>(values: &[S]) -> String {
  values
    .iter()
    .map(|v| format!("\"{}\"", escape_literal(v.as_ref())))
    .collect::<Vec<_>>()
    .join(", ")
}

/// Keep only the first value of a list the registry schema accepts once.
///
/// Access rights and landing pages are multi-valued in the input but
/// single-valued in the registry's metadata schema.
pub(crate) fn first_only<'a>(field: &str, values: &'a [String]) -> &'a [String] {
  if values.len() > 1 {
    tracing::warn!(
      field,
      dropped = values.len() - 1,
      "only the first {field} value is published due to a metadata schema discrepancy"
    );
  }
  &values[..values.len().min(1)]
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_lists_render_empty() {
    let none: [&str; 0] = [];
    assert_eq!(uri_list(&none), "");
    assert_eq!(literal_list(&none), "");
  }

  #[test]
  fn uri_list_has_no_stray_commas() {
    assert_eq!(
      uri_list(&["http://a.example", "http://b.example"]),
      "<http://a.example>, <http://b.example>"
    );
    assert_eq!(uri_list(&["http://a.example"]), "<http://a.example>");
  }

  #[test]
  fn three_keywords() {
    let rendered = literal_list(&["rare", "disease", "registry"]);
    assert_eq!(rendered, r#""rare", "disease", "registry""#);
    assert!(!rendered.starts_with(','));
    assert!(!rendered.ends_with(','));
    assert_eq!(rendered.matches(", ").count(), 2);
  }

  #[test]
  fn literals_are_escaped() {
    assert_eq!(
      literal_list(&["say \"hi\"", "a\\b\nc"]),
      r#""say \"hi\"", "a\\b\nc""#
    );
  }

  #[test]
  fn first_only_truncates() {
    let values = vec!["http://1".to_string(), "http://2".to_string()];
    assert_eq!(first_only("access_rights", &values), ["http://1"]);
    assert!(first_only("access_rights", &[]).is_empty());
  }
}
