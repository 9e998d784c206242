//! Error types for the vpmeta-rdf graph builder.

use std::path::PathBuf;

use thiserror::Error;

use crate::template::TemplateName;

/// Template loading or rendering failed.
#[derive(Debug, Error)]
pub enum TemplateError {
  #[error("template {name} not found at {}", path.display())]
  Missing { name: TemplateName, path: PathBuf },

  #[error("template {name} could not be read from {}: {source}", path.display())]
  Io {
    name:   TemplateName,
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("template {name} does not compile: {reason}")]
  Compile { name: TemplateName, reason: String },

  #[error("rendering template {name} failed: {reason}")]
  Render { name: TemplateName, reason: String },
}

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Template(#[from] TemplateError),

  /// The rendered text is not valid Turtle; points at a template or escaping
  /// defect.
  #[error("output of template {template} is not valid Turtle: {reason}")]
  GraphParse {
    template: TemplateName,
    reason:   String,
  },

  #[error("invalid base IRI {iri:?}: {reason}")]
  InvalidBaseIri { iri: String, reason: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
