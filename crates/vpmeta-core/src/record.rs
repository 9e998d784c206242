//! [`Record`], the closed union of everything that can be published.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  distribution::{Distribution, DistributionFields},
  fields::FieldSet,
  organisation::{Organisation, OrganisationFields},
  resource::{
    Biobank, DataService, Dataset, PatientRegistry, Resource, ResourceFields,
    ResourceKind,
  },
};

/// Record type discriminant, as written in record files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordType {
  Organisation,
  Biobank,
  PatientRegistry,
  Dataset,
  Distribution,
  DataService,
}

impl RecordType {
  pub const ALL: [RecordType; 6] = [
    Self::Organisation,
    Self::Biobank,
    Self::PatientRegistry,
    Self::Dataset,
    Self::Distribution,
    Self::DataService,
  ];

  /// Registry collection path segment. Must match the serde names above.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Organisation => "organisation",
      Self::Biobank => "biobank",
      Self::PatientRegistry => "patientregistry",
      Self::Dataset => "dataset",
      Self::Distribution => "distribution",
      Self::DataService => "dataservice",
    }
  }
}

impl fmt::Display for RecordType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for RecordType {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    Self::ALL
      .into_iter()
      .find(|t| t.as_str().eq_ignore_ascii_case(s))
      .ok_or_else(|| Error::UnknownRecordType(s.to_string()))
  }
}

/// A validated record of any type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
  Organisation(Organisation),
  Distribution(Distribution),
  Resource(Resource),
}

impl Record {
  /// Validate a raw field set as a record of type `record_type`.
  pub fn from_fields(record_type: RecordType, fields: &FieldSet) -> Result<Self> {
    match record_type {
      RecordType::Organisation => Ok(Self::Organisation(Organisation::new(
        OrganisationFields::try_from(fields)?,
      )?)),
      RecordType::Distribution => Ok(Self::Distribution(Distribution::new(
        DistributionFields::try_from(fields)?,
      )?)),
      _ => {
        let base = ResourceFields::try_from(fields)?;
        let kind = kind_from_fields(record_type, fields)?;
        Ok(Self::Resource(Resource::new(base, kind)?))
      }
    }
  }

  pub fn record_type(&self) -> RecordType {
    match self {
      Self::Organisation(_) => RecordType::Organisation,
      Self::Distribution(_) => RecordType::Distribution,
      Self::Resource(r) => match r.kind() {
        ResourceKind::Biobank(_) => RecordType::Biobank,
        ResourceKind::PatientRegistry(_) => RecordType::PatientRegistry,
        ResourceKind::Dataset(_) => RecordType::Dataset,
        ResourceKind::DataService(_) => RecordType::DataService,
      },
    }
  }

  /// Registry collection path segment this record is created under.
  pub fn resource_type(&self) -> &'static str { self.record_type().as_str() }

  pub fn title(&self) -> &str {
    match self {
      Self::Organisation(o) => o.title(),
      Self::Distribution(d) => d.title(),
      Self::Resource(r) => r.title(),
    }
  }
}

impl From<Resource> for Record {
  fn from(r: Resource) -> Self { Self::Resource(r) }
}

impl From<Organisation> for Record {
  fn from(o: Organisation) -> Self { Self::Organisation(o) }
}

impl From<Distribution> for Record {
  fn from(d: Distribution) -> Self { Self::Distribution(d) }
}

fn kind_from_fields(
  record_type: RecordType,
  f: &FieldSet,
) -> Result<ResourceKind> {
  Ok(match record_type {
    RecordType::Biobank => ResourceKind::Biobank(Biobank {
      population_coverage: f.text("population_coverage")?,
    }),
    RecordType::PatientRegistry => ResourceKind::PatientRegistry(PatientRegistry {
      population_coverage: f.text("population_coverage")?,
      distribution:        f.list("distribution")?,
    }),
    RecordType::Dataset => ResourceKind::Dataset(Dataset {
      distribution: f.list("distribution")?,
    }),
    RecordType::DataService => ResourceKind::DataService(DataService {
      operation_type:       f.text("operation_type")?,
      serves_dataset:       f.list("serves_dataset")?,
      endpoint_url:         f.text("endpoint_url")?,
      endpoint_description: f.list("endpoint_description")?,
    }),
    RecordType::Organisation | RecordType::Distribution => {
      return Err(Error::UnknownRecordType(format!(
        "{record_type} is not a resource specialization"
      )));
    }
  })
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn dataset_fields() -> FieldSet {
    FieldSet::new()
      .with("parent_url", "https://fdp.example.org/catalog/abc")
      .with("title", "Registry extract")
      .with("description", "Pseudonymised extract")
      .with("theme", "http://www.orpha.net/ORDO/Orphanet_558|http://www.orpha.net/ORDO/Orphanet_1")
      .with("publisher", "https://example.org/org/umc")
      .with("contact_point", "mailto:data@example.org")
      .with("language", "en")
      .with("personal_data", false)
      .with("distribution", "https://fdp.example.org/distribution/1")
  }

  #[test]
  fn record_type_names_round_trip() {
    for t in RecordType::ALL {
      assert_eq!(t.as_str().parse::<RecordType>().unwrap(), t);
      let json = serde_json::to_value(t).unwrap();
      assert_eq!(json, json!(t.as_str()));
    }
    assert!("catalog".parse::<RecordType>().is_err());
  }

  #[test]
  fn dataset_from_fields() {
    let record = Record::from_fields(RecordType::Dataset, &dataset_fields()).unwrap();
    assert_eq!(record.resource_type(), "dataset");
    assert_eq!(record.title(), "Registry extract");
    let Record::Resource(r) = &record else {
      panic!("expected a resource")
    };
    assert_eq!(r.theme().len(), 2);
    assert_eq!(
      r.kind(),
      &ResourceKind::Dataset(Dataset {
        distribution: vec!["https://fdp.example.org/distribution/1".into()],
      })
    );
  }

  #[test]
  fn same_fields_as_patient_registry() {
    let fields = dataset_fields().with("population_coverage", "Netherlands");
    let record = Record::from_fields(RecordType::PatientRegistry, &fields).unwrap();
    assert_eq!(record.record_type(), RecordType::PatientRegistry);
  }

  #[test]
  fn personal_data_of_wrong_kind() {
    let fields = dataset_fields().with("personal_data", "no");
    let err = Record::from_fields(RecordType::Dataset, &fields).unwrap_err();
    assert!(err.is_validation());
  }

  #[test]
  fn missing_theme_fails() {
    let mut fields = dataset_fields();
    fields.insert("theme", serde_json::Value::Null);
    let err = Record::from_fields(RecordType::Biobank, &fields).unwrap_err();
    assert!(matches!(err, Error::Validation { field: "theme", .. }));
  }

  #[test]
  fn organisation_from_fields() {
    let fields = FieldSet::new()
      .with("parent_url", "https://fdp.example.org/catalog/abc")
      .with("title", "Example UMC")
      .with("description", "University medical centre")
      .with("landing_pages", json!(["https://umc.example.org"]));
    let record = Record::from_fields(RecordType::Organisation, &fields).unwrap();
    assert_eq!(record.resource_type(), "organisation");
  }
}
