//! Distributions: concrete, accessible forms of a dataset. Like
//! organisations they stand on their own and do not reuse the resource base
//! fields.

use crate::{
  Result,
  normalize::{
    normalize_version, optional_media_type, optional_uri, require_text,
    require_uri, uri_list,
  },
};

#[derive(Debug, Clone, Default)]
pub struct DistributionFields {
  pub parent_url:     Option<String>,
  pub license:        Option<String>,
  pub title:          Option<String>,
  pub description:    Option<String>,
  pub publisher:      Option<String>,
  pub version:        Option<String>,
  pub access_rights:  Vec<String>,
  pub has_policy:     Vec<String>,
  pub media_type:     Option<String>,
  /// Datasets this distribution belongs to.
  pub is_part_of:     Vec<String>,
  pub access_url:     Option<String>,
  pub download_url:   Option<String>,
  pub access_service: Option<String>,
  pub conforms_to:    Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distribution {
  parent_url:     String,
  license:        String,
  title:          String,
  description:    String,
  publisher:      String,
  version:        String,
  access_rights:  Vec<String>,
  has_policy:     Vec<String>,
  media_type:     Option<String>,
  is_part_of:     Vec<String>,
  access_url:     Option<String>,
  download_url:   Option<String>,
  access_service: Option<String>,
  conforms_to:    Option<String>,
}

impl Distribution {
  pub fn new(fields: DistributionFields) -> Result<Self> {
    Ok(Self {
      parent_url:     require_uri("parent_url", fields.parent_url)?,
      license:        require_uri("license", fields.license)?,
      title:          require_text("title", fields.title)?,
      description:    require_text("description", fields.description)?,
      publisher:      require_uri("publisher", fields.publisher)?,
      version:        normalize_version(fields.version.as_deref()),
      access_rights:  uri_list("access_rights", fields.access_rights)?,
      has_policy:     uri_list("has_policy", fields.has_policy)?,
      // Media types are IANA tokens or URIs; kept as given.
      media_type:     optional_media_type(fields.media_type)?,
      is_part_of:     uri_list("is_part_of", fields.is_part_of)?,
      access_url:     optional_uri("access_url", fields.access_url)?,
      download_url:   optional_uri("download_url", fields.download_url)?,
      access_service: optional_uri("access_service", fields.access_service)?,
      conforms_to:    optional_uri("conforms_to", fields.conforms_to)?,
    })
  }

  pub fn parent_url(&self) -> &str { &self.parent_url }

  pub fn license(&self) -> &str { &self.license }

  pub fn title(&self) -> &str { &self.title }

  pub fn description(&self) -> &str { &self.description }

  pub fn publisher(&self) -> &str { &self.publisher }

  pub fn version(&self) -> &str { &self.version }

  pub fn access_rights(&self) -> &[String] { &self.access_rights }

  pub fn has_policy(&self) -> &[String] { &self.has_policy }

  pub fn media_type(&self) -> Option<&str> { self.media_type.as_deref() }

  pub fn is_part_of(&self) -> &[String] { &self.is_part_of }

  pub fn access_url(&self) -> Option<&str> { self.access_url.as_deref() }

  pub fn download_url(&self) -> Option<&str> { self.download_url.as_deref() }

  pub fn access_service(&self) -> Option<&str> { self.access_service.as_deref() }

  pub fn conforms_to(&self) -> Option<&str> { self.conforms_to.as_deref() }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::Error;

  fn fields() -> DistributionFields {
    DistributionFields {
      parent_url: Some("https://fdp.example.org/dataset/1".into()),
      license: Some("https://creativecommons.org/licenses/by/4.0/".into()),
      title: Some("CSV export".into()),
      description: Some("Quarterly export".into()),
      publisher: Some("https://example.org/org/umc".into()),
      media_type: Some("text/csv".into()),
      ..DistributionFields::default()
    }
  }

  #[test]
  fn version_is_defaulted() {
    let d = Distribution::new(fields()).unwrap();
    assert_eq!(d.version(), "1");
    assert_eq!(d.media_type(), Some("text/csv"));
  }

  #[test]
  fn license_is_mandatory() {
    let mut f = fields();
    f.license = None;
    match Distribution::new(f) {
      Err(Error::Validation { field, .. }) => assert_eq!(field, "license"),
      other => panic!("expected validation error, got {other:?}"),
    }
  }

  #[test]
  fn media_type_cannot_smuggle_iri_syntax() {
    let mut f = fields();
    f.media_type = Some("text/csv>,<https://evil.example/y".into());
    match Distribution::new(f) {
      Err(Error::Validation { field, .. }) => assert_eq!(field, "media_type"),
      other => panic!("expected validation error, got {other:?}"),
    }
  }

  #[test]
  fn download_url_must_be_a_uri() {
    let mut f = fields();
    f.download_url = Some("exports/data.csv".into());
    assert!(Distribution::new(f).is_err());
  }
}
