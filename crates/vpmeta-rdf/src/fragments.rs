//! Per-record fragment plan: which templates a record renders and the
//! mapping each one receives.

use serde_json::{Value, json};
use vpmeta_core::{
  Distribution, Organisation, Record, Resource, ResourceKind,
};

use crate::{
  list::{first_only, literal_list, uri_list},
  template::{Mapping, TemplateName},
};

/// Registry prefix for bare IANA media types such as `text/csv`.
pub const MEDIA_TYPE_BASE: &str = "https://www.iana.org/assignments/media-types/";

/// One template to render and its mapping.
#[derive(Debug, Clone)]
pub struct Fragment {
  pub template: TemplateName,
  pub mapping:  Mapping,
}

impl Fragment {
  fn new(template: TemplateName, value: Value) -> Self {
    let mapping = match value {
      Value::Object(m) => m,
      _ => Mapping::new(),
    };
    Self { template, mapping }
  }
}

/// The fragments for `record`, base fragment first.
pub fn fragments(record: &Record) -> Vec<Fragment> {
  match record {
    Record::Organisation(o) => vec![organisation(o)],
    Record::Distribution(d) => vec![distribution(d)],
    Record::Resource(r) => {
      let mut out = vec![resource(r)];
      match r.kind() {
        ResourceKind::Biobank(b) => out.push(Fragment::new(
          TemplateName::Biobank,
          json!({ "population_coverage": b.population_coverage }),
        )),
        ResourceKind::Dataset(d) => out.push(dataset(&d.distribution)),
        ResourceKind::PatientRegistry(p) => {
          out.push(dataset(&p.distribution));
          out.push(Fragment::new(
            TemplateName::PatientRegistry,
            json!({ "population_coverage": p.population_coverage }),
          ));
        }
        ResourceKind::DataService(s) => out.push(Fragment::new(
          TemplateName::DataService,
          json!({
            "operation_type":       s.operation_type,
            "serves_dataset":       uri_list(&s.serves_dataset),
            "endpoint_url":         s.endpoint_url,
            "endpoint_description": uri_list(&s.endpoint_description),
          }),
        )),
      }
      out
    }
  }
}

fn resource(r: &Resource) -> Fragment {
  Fragment::new(
    TemplateName::Resource,
    json!({
      "parent_url":    r.parent_url(),
      "license":       r.license(),
      "title":         r.title(),
      "description":   r.description(),
      "theme":         uri_list(r.theme()),
      "publisher":     r.publisher(),
      "contact_point": r.contact_point(),
      "language":      r.language(),
      "personal_data": r.personal_data(),
      "conforms_to":   r.conforms_to(),
      "vp_connection": r.vp_connection(),
      "keyword":       literal_list(r.keyword()),
      "logo":          r.logo(),
      "has_policy":    uri_list(r.has_policy()),
      "identifier":    r.identifier(),
      "issued":        r.issued().map(|d| d.format("%Y-%m-%d").to_string()),
      "modified":      r.modified().map(|d| d.format("%Y-%m-%d").to_string()),
      "version":       r.version(),
      "access_rights": uri_list(first_only("access_rights", r.access_rights())),
      "landing_page":  uri_list(first_only("landing_page", r.landing_page())),
    }),
  )
}

fn dataset(distribution: &[String]) -> Fragment {
  Fragment::new(
    TemplateName::Dataset,
    json!({ "distribution": uri_list(distribution) }),
  )
}

fn distribution(d: &Distribution) -> Fragment {
  Fragment::new(
    TemplateName::Distribution,
    json!({
      "parent_url":     d.parent_url(),
      "license":        d.license(),
      "title":          d.title(),
      "description":    d.description(),
      "publisher":      d.publisher(),
      "version":        d.version(),
      "access_rights":  uri_list(first_only("access_rights", d.access_rights())),
      "has_policy":     uri_list(d.has_policy()),
      "media_type":     d.media_type().map(media_type_iri),
      "is_part_of":     uri_list(d.is_part_of()),
      "access_url":     d.access_url(),
      "download_url":   d.download_url(),
      "access_service": d.access_service(),
      "conforms_to":    d.conforms_to(),
    }),
  )
}

fn organisation(o: &Organisation) -> Fragment {
  Fragment::new(
    TemplateName::Organisation,
    json!({
      "parent_url":    o.parent_url(),
      "title":         o.title(),
      "description":   o.description(),
      "landing_pages": uri_list(o.landing_pages()),
      "logo":          o.logo(),
      "location":      o.location(),
      "identifier":    o.identifier(),
    }),
  )
}

/// `text/csv` → IANA IRI; values that already are IRIs pass through.
fn media_type_iri(media_type: &str) -> String {
  if media_type.contains("://") {
    media_type.to_string()
  } else {
    format!("{MEDIA_TYPE_BASE}{media_type}")
  }
}
