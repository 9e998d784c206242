//! Turtle graph builder for vpmeta records.
//!
//! Renders a [`vpmeta_core::Record`] through named templates (a base
//! fragment plus type-specific fragments), parses every fragment back with
//! `oxrdfio`, and merges the triples into one [`oxrdf::Graph`]. Pure
//! synchronous; no HTTP dependencies.
//!
//! # Quick start
//!
//! ```no_run
//! use vpmeta_core::{FieldSet, Record, RecordType};
//! use vpmeta_rdf::GraphBuilder;
//!
//! let fields = FieldSet::new()
//!   .with("parent_url", "https://fdp.example.org/catalog/1")
//!   .with("title", "Example UMC")
//!   .with("description", "University medical centre")
//!   .with("landing_pages", "https://umc.example.org");
//! let record = Record::from_fields(RecordType::Organisation, &fields).unwrap();
//! let document = GraphBuilder::embedded().unwrap().build(&record).unwrap();
//! println!("{}", document.text);
//! ```

mod builder;
pub mod error;
pub mod fragments;
pub mod list;
pub mod template;

pub use builder::{DRAFT_BASE_IRI, GraphBuilder, RdfDocument};
pub use error::{Error, Result, TemplateError};
pub use template::{Mapping, Renderer, TemplateName, TemplateSet};
use vpmeta_core::Record;

/// Build `record` with the embedded templates.
pub fn build(record: &Record) -> Result<RdfDocument> {
  GraphBuilder::embedded()?.build(record)
}

// ─── Round-trip tests ────────────────────────────────────────────────────────
