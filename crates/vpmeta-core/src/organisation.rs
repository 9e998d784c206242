//! Organisations: a root record type of its own, not a resource
//! specialization. It carries a much smaller field set.

use crate::{
  Result,
  normalize::{optional_text, optional_uri, require_text, require_uri, require_uri_list},
};

#[derive(Debug, Clone, Default)]
pub struct OrganisationFields {
  /// Catalog URL; must already exist in the registry.
  pub parent_url:    Option<String>,
  pub title:         Option<String>,
  pub description:   Option<String>,
  pub landing_pages: Vec<String>,
  pub logo:          Option<String>,
  /// Free-text label of the organisation's location.
  pub location:      Option<String>,
  pub identifier:    Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Organisation {
  parent_url:    String,
  title:         String,
  description:   String,
  landing_pages: Vec<String>,
  logo:          Option<String>,
  location:      Option<String>,
  identifier:    Option<String>,
}

impl Organisation {
  pub fn new(fields: OrganisationFields) -> Result<Self> {
    Ok(Self {
      parent_url:    require_uri("parent_url", fields.parent_url)?,
      title:         require_text("title", fields.title)?,
      description:   require_text("description", fields.description)?,
      landing_pages: require_uri_list("landing_pages", fields.landing_pages)?,
      logo:          optional_uri("logo", fields.logo)?,
      location:      optional_text(fields.location),
      identifier:    optional_text(fields.identifier),
    })
  }

  pub fn parent_url(&self) -> &str { &self.parent_url }

  pub fn title(&self) -> &str { &self.title }

  pub fn description(&self) -> &str { &self.description }

  pub fn landing_pages(&self) -> &[String] { &self.landing_pages }

  pub fn logo(&self) -> Option<&str> { self.logo.as_deref() }

  pub fn location(&self) -> Option<&str> { self.location.as_deref() }

  pub fn identifier(&self) -> Option<&str> { self.identifier.as_deref() }
}
