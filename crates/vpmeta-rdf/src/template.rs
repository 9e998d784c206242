//! Named Turtle templates and the rendering capability the builder consumes.
//!
//! Templates use handlebars syntax. `{{key}}` substitutions are escaped for a
//! double-quoted Turtle literal; `{{{key}}}` inserts IRIs and pre-rendered
//! object lists verbatim. Rendering runs in strict mode, so a placeholder
//! whose key is absent from the mapping is an error rather than an empty
//! string.

use std::{
  fmt,
  path::{Path, PathBuf},
};

use handlebars::Handlebars;
use serde_json::{Map, Value};

use crate::{error::TemplateError, list::escape_literal};

/// Flat key → value mapping handed to a template.
pub type Mapping = Map<String, Value>;

// ─── Template names ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateName {
  Resource,
  Biobank,
  PatientRegistry,
  Dataset,
  DataService,
  Distribution,
  Organisation,
}

impl TemplateName {
  pub const ALL: [TemplateName; 7] = [
    Self::Resource,
    Self::Biobank,
    Self::PatientRegistry,
    Self::Dataset,
    Self::DataService,
    Self::Distribution,
    Self::Organisation,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Resource => "resource",
      Self::Biobank => "biobank",
      Self::PatientRegistry => "patientregistry",
      Self::Dataset => "dataset",
      Self::DataService => "dataservice",
      Self::Distribution => "distribution",
      Self::Organisation => "organisation",
    }
  }

  /// File name looked up by [`TemplateSet::from_dir`].
  pub fn file_name(self) -> String { format!("{}.ttl.hbs", self.as_str()) }

  fn embedded_source(self) -> &'static str {
    match self {
      Self::Resource => include_str!("../templates/resource.ttl.hbs"),
      Self::Biobank => include_str!("../templates/biobank.ttl.hbs"),
      Self::PatientRegistry => include_str!("../templates/patientregistry.ttl.hbs"),
      Self::Dataset => include_str!("../templates/dataset.ttl.hbs"),
      Self::DataService => include_str!("../templates/dataservice.ttl.hbs"),
      Self::Distribution => include_str!("../templates/distribution.ttl.hbs"),
      Self::Organisation => include_str!("../templates/organisation.ttl.hbs"),
    }
  }
}

impl fmt::Display for TemplateName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

// ─── Renderer ────────────────────────────────────────────────────────────────

/// Render a named template against a flat mapping.
pub trait Renderer: Send + Sync {
  fn render(
    &self,
    template: TemplateName,
    mapping: &Mapping,
  ) -> Result<String, TemplateError>;
}

/// The handlebars-backed set of all templates.
pub struct TemplateSet {
  registry: Handlebars<'static>,
}

impl TemplateSet {
  /// Templates compiled into this crate.
  pub fn embedded() -> Result<Self, TemplateError> {
    let mut set = Self::empty();
    for name in TemplateName::ALL {
      set.register(name, name.embedded_source())?;
    }
    Ok(set)
  }

  /// Load `<name>.ttl.hbs` for every template name from `dir`.
  pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, TemplateError> {
    let dir = dir.as_ref();
    let mut set = Self::empty();
    for name in TemplateName::ALL {
      let path = dir.join(name.file_name());
      let source = read_template(name, &path)?;
      set.register(name, &source)?;
    }
    tracing::debug!(dir = %dir.display(), "loaded templates");
    Ok(set)
  }

  fn empty() -> Self {
    let mut registry = Handlebars::new();
    registry.set_strict_mode(true);
    registry.register_escape_fn(escape_literal);
    Self { registry }
  }

  fn register(&mut self, name: TemplateName, source: &str) -> Result<(), TemplateError> {
    self
      .registry
      .register_template_string(name.as_str(), source)
      .map_err(|e| TemplateError::Compile {
        name,
        reason: e.to_string(),
      })
  }
}

impl Renderer for TemplateSet {
  fn render(
    &self,
    template: TemplateName,
    mapping: &Mapping,
  ) -> Result<String, TemplateError> {
    self
      .registry
      .render(template.as_str(), mapping)
      .map_err(|e| TemplateError::Render {
        name:   template,
        reason: e.to_string(),
      })
  }
}

fn read_template(name: TemplateName, path: &Path) -> Result<String, TemplateError> {
  std::fs::read_to_string(path).map_err(|source| {
    if source.kind() == std::io::ErrorKind::NotFound {
      TemplateError::Missing {
        name,
        path: PathBuf::from(path),
      }
    } else {
      TemplateError::Io {
        name,
        path: PathBuf::from(path),
        source,
      }
    }
  })
}
