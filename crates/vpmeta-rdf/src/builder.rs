//! Render, parse back, and merge the fragments of a record into one graph.

use oxrdf::{Graph, NamedNode, NamedOrBlankNodeRef, Quad, TermRef, Triple};
use oxrdfio::{RdfFormat, RdfParser};
use vpmeta_core::Record;

use crate::{
  error::{Error, Result},
  fragments::fragments,
  template::{Renderer, TemplateName, TemplateSet},
};

/// IRI the relative subject `<>` resolves to while checking a document
/// locally. The registry assigns the real identity on submission.
pub const DRAFT_BASE_IRI: &str = "http://localhost/vpmeta/draft";

const DCT_TITLE: &str = "http://purl.org/dc/terms/title";

// ─── Document ────────────────────────────────────────────────────────────────

/// A rendered record: the Turtle text to submit and its parsed graph.
#[derive(Debug, Clone)]
pub struct RdfDocument {
  /// Turtle text, all fragments in order. Subjects are relative (`<>`).
  pub text:    String,
  /// Union of the triples of every fragment.
  pub graph:   Graph,
  /// What `<>` resolved to while parsing.
  pub subject: NamedNode,
}

impl RdfDocument {
  /// The `dct:title` literal bound to the document subject.
  pub fn title(&self) -> Option<&str> {
    self.literals_of(DCT_TITLE).next()
  }

  /// Literal objects of `predicate` on the document subject.
  pub fn literals_of<'a>(
    &'a self,
    predicate: &'a str,
  ) -> impl Iterator<Item = &'a str> + 'a {
    self
      .graph
      .iter()
      .filter(move |t| t.predicate.as_str() == predicate && self.is_subject(t.subject))
      .filter_map(|t| match t.object {
        TermRef::Literal(l) => Some(l.value()),
        _ => None,
      })
  }

  /// IRI objects of `predicate` on the document subject.
  pub fn iris_of<'a>(
    &'a self,
    predicate: &'a str,
  ) -> impl Iterator<Item = &'a str> + 'a {
    self
      .graph
      .iter()
      .filter(move |t| t.predicate.as_str() == predicate && self.is_subject(t.subject))
      .filter_map(|t| match t.object {
        TermRef::NamedNode(n) => Some(n.as_str()),
        _ => None,
      })
  }

  fn is_subject(&self, subject: NamedOrBlankNodeRef<'_>) -> bool {
    matches!(subject, NamedOrBlankNodeRef::NamedNode(n) if n == self.subject.as_ref())
  }
}

// ─── Builder ─────────────────────────────────────────────────────────────────

/// Builds [`RdfDocument`]s from records with a [`Renderer`].
pub struct GraphBuilder<R = TemplateSet> {
  renderer: R,
  base_iri: NamedNode,
}

impl GraphBuilder<TemplateSet> {
  /// A builder over the embedded templates.
  pub fn embedded() -> Result<Self> {
    Ok(Self::new(TemplateSet::embedded()?))
  }
}

impl<R: Renderer> GraphBuilder<R> {
  pub fn new(renderer: R) -> Self {
    Self {
      renderer,
      base_iri: NamedNode::new_unchecked(DRAFT_BASE_IRI),
    }
  }

  /// Resolve relative IRIs against `iri` instead of [`DRAFT_BASE_IRI`].
  pub fn with_base_iri(mut self, iri: &str) -> Result<Self> {
    self.base_iri = NamedNode::new(iri).map_err(|e| Error::InvalidBaseIri {
      iri:    iri.to_string(),
      reason: e.to_string(),
    })?;
    Ok(self)
  }

  /// Render every fragment of `record`, parse each one back as Turtle, and
  /// merge the triples.
  ///
  /// Fails with [`Error::Template`] when a template is missing or a
  /// placeholder is unbound, and with [`Error::GraphParse`] when the rendered
  /// text does not parse, so broken output never reaches the registry.
  pub fn build(&self, record: &Record) -> Result<RdfDocument> {
    let mut text = String::new();
    let mut graph = Graph::new();

    for fragment in fragments(record) {
      let body = self.renderer.render(fragment.template, &fragment.mapping)?;
      tracing::debug!(template = %fragment.template, "rendered fragment:\n{body}");

      for triple in parse_turtle(&body, self.base_iri.as_str(), fragment.template)? {
        graph.insert(&triple);
      }

      if !text.is_empty() {
        text.push('\n');
      }
      text.push_str(&body);
    }

    tracing::debug!(
      resource_type = record.resource_type(),
      triples = graph.len(),
      "built graph"
    );

    Ok(RdfDocument {
      text,
      graph,
      subject: self.base_iri.clone(),
    })
  }
}

fn parse_turtle(input: &str, base: &str, template: TemplateName) -> Result<Vec<Triple>> {
  let parse_error = |reason: String| Error::GraphParse { template, reason };

  let parser = RdfParser::from_format(RdfFormat::Turtle)
    .with_base_iri(base)
    .map_err(|e| parse_error(format!("invalid base IRI: {e}")))?;

  let quads: Vec<Quad> = parser
    .for_reader(input.as_bytes())
    .collect::<Result<_, _>>()
    .map_err(|e| parse_error(e.to_string()))?;

  Ok(
    quads
      .into_iter()
      .map(|q| Triple {
        subject:   q.subject,
        predicate: q.predicate,
        object:    q.object,
      })
      .collect(),
  )
}
