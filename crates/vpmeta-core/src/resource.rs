//! The generic resource record and its specializations.
//!
//! Every biobank, dataset, data service and patient registry shares the same
//! base field set ([`ResourceFields`]). What differs per type lives in a
//! [`ResourceKind`] variant layered on top; a kind never reinterprets a base
//! field.

use chrono::NaiveDate;

use crate::{
  Result,
  normalize::{
    normalize_language, normalize_version, optional_text, optional_uri,
    require_text, require_uri, require_uri_list, uri_list,
  },
};

// ─── Input ───────────────────────────────────────────────────────────────────

/// Unvalidated input for [`Resource::new`].
///
/// Mandatory fields are `Option`s so that a record source can hand over
/// exactly what it read; [`Resource::new`] decides what is missing.
#[derive(Debug, Clone, Default)]
pub struct ResourceFields {
  /// URL of the catalog this resource belongs to.
  pub parent_url:    Option<String>,
  pub license:       Option<String>,
  pub title:         Option<String>,
  pub description:   Option<String>,
  pub theme:         Vec<String>,
  pub publisher:     Option<String>,
  pub contact_point: Option<String>,
  /// Two-letter ISO 639-1 code, e.g. `"en"`.
  pub language:      Option<String>,
  pub personal_data: Option<bool>,
  pub conforms_to:   Option<String>,
  /// Connection of the resource to the virtual platform.
  pub vp_connection: Option<String>,
  pub keyword:       Vec<String>,
  pub logo:          Option<String>,
  /// ODRL policies.
  pub has_policy:    Vec<String>,
  pub identifier:    Option<String>,
  pub issued:        Option<NaiveDate>,
  pub modified:      Option<NaiveDate>,
  pub version:       Option<String>,
  pub access_rights: Vec<String>,
  pub landing_page:  Vec<String>,
}

// ─── Specializations ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Biobank {
  pub population_coverage: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
  /// URLs of the distribution records of this dataset.
  pub distribution: Vec<String>,
}

/// A patient registry is a dataset with a population coverage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientRegistry {
  pub population_coverage: Option<String>,
  pub distribution:        Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataService {
  /// EDAM operation describing what the service does.
  pub operation_type:       Option<String>,
  pub serves_dataset:       Vec<String>,
  pub endpoint_url:         Option<String>,
  pub endpoint_description: Vec<String>,
}

/// The closed set of resource specializations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceKind {
  Biobank(Biobank),
  PatientRegistry(PatientRegistry),
  Dataset(Dataset),
  DataService(DataService),
}

impl ResourceKind {
  /// Registry collection path segment for this kind.
  pub fn resource_type(&self) -> &'static str {
    match self {
      Self::Biobank(_) => "biobank",
      Self::PatientRegistry(_) => "patientregistry",
      Self::Dataset(_) => "dataset",
      Self::DataService(_) => "dataservice",
    }
  }

  fn validate(self) -> Result<Self> {
    Ok(match self {
      Self::Biobank(b) => Self::Biobank(Biobank {
        population_coverage: optional_text(b.population_coverage),
      }),
      Self::PatientRegistry(p) => Self::PatientRegistry(PatientRegistry {
        population_coverage: optional_text(p.population_coverage),
        distribution:        uri_list("distribution", p.distribution)?,
      }),
      Self::Dataset(d) => Self::Dataset(Dataset {
        distribution: uri_list("distribution", d.distribution)?,
      }),
      Self::DataService(s) => Self::DataService(DataService {
        operation_type:       optional_uri("operation_type", s.operation_type)?,
        serves_dataset:       uri_list("serves_dataset", s.serves_dataset)?,
        endpoint_url:         optional_uri("endpoint_url", s.endpoint_url)?,
        endpoint_description: uri_list(
          "endpoint_description",
          s.endpoint_description,
        )?,
      }),
    })
  }
}

// ─── Resource ────────────────────────────────────────────────────────────────

/// A validated resource record. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
  parent_url:    String,
  license:       Option<String>,
  title:         String,
  description:   String,
  theme:         Vec<String>,
  publisher:     String,
  contact_point: String,
  language:      String,
  personal_data: bool,
  conforms_to:   Option<String>,
  vp_connection: Option<String>,
  keyword:       Vec<String>,
  logo:          Option<String>,
  has_policy:    Vec<String>,
  identifier:    Option<String>,
  issued:        Option<NaiveDate>,
  modified:      Option<NaiveDate>,
  version:       String,
  access_rights: Vec<String>,
  landing_page:  Vec<String>,
  kind:          ResourceKind,
}

impl Resource {
  /// Validate `fields` and `kind` into a resource.
  ///
  /// Fails with [`crate::Error::Validation`] naming the first offending
  /// field. The language code is expanded to its vocabulary URI and a
  /// missing version is set to `"1"`.
  pub fn new(fields: ResourceFields, kind: ResourceKind) -> Result<Self> {
    let language = normalize_language(
      &require_text("language", fields.language)?,
    )?;
    let personal_data = fields
      .personal_data
      .ok_or_else(|| crate::Error::missing("personal_data"))?;

    Ok(Self {
      parent_url: require_uri("parent_url", fields.parent_url)?,
      license: optional_uri("license", fields.license)?,
      title: require_text("title", fields.title)?,
      description: require_text("description", fields.description)?,
      theme: require_uri_list("theme", fields.theme)?,
      publisher: require_uri("publisher", fields.publisher)?,
      contact_point: require_uri("contact_point", fields.contact_point)?,
      language,
      personal_data,
      conforms_to: optional_uri("conforms_to", fields.conforms_to)?,
      vp_connection: optional_uri("vp_connection", fields.vp_connection)?,
      keyword: fields.keyword,
      logo: optional_uri("logo", fields.logo)?,
      has_policy: uri_list("has_policy", fields.has_policy)?,
      identifier: optional_text(fields.identifier),
      issued: fields.issued,
      modified: fields.modified,
      version: normalize_version(fields.version.as_deref()),
      access_rights: uri_list("access_rights", fields.access_rights)?,
      landing_page: uri_list("landing_page", fields.landing_page)?,
      kind: kind.validate()?,
    })
  }

  pub fn parent_url(&self) -> &str { &self.parent_url }

  pub fn license(&self) -> Option<&str> { self.license.as_deref() }

  pub fn title(&self) -> &str { &self.title }

  pub fn description(&self) -> &str { &self.description }

  pub fn theme(&self) -> &[String] { &self.theme }

  pub fn publisher(&self) -> &str { &self.publisher }

  pub fn contact_point(&self) -> &str { &self.contact_point }

  /// The full language URI, never the bare code.
  pub fn language(&self) -> &str { &self.language }

  pub fn personal_data(&self) -> bool { self.personal_data }

  pub fn conforms_to(&self) -> Option<&str> { self.conforms_to.as_deref() }

  pub fn vp_connection(&self) -> Option<&str> { self.vp_connection.as_deref() }

  pub fn keyword(&self) -> &[String] { &self.keyword }

  pub fn logo(&self) -> Option<&str> { self.logo.as_deref() }

  pub fn has_policy(&self) -> &[String] { &self.has_policy }

  pub fn identifier(&self) -> Option<&str> { self.identifier.as_deref() }

  pub fn issued(&self) -> Option<NaiveDate> { self.issued }

  pub fn modified(&self) -> Option<NaiveDate> { self.modified }

  pub fn version(&self) -> &str { &self.version }

  /// All access-rights URIs in input order. Serializers only emit the first.
  pub fn access_rights(&self) -> &[String] { &self.access_rights }

  /// All landing-page URIs in input order. Serializers only emit the first.
  pub fn landing_page(&self) -> &[String] { &self.landing_page }

  pub fn kind(&self) -> &ResourceKind { &self.kind }
}
