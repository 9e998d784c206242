//! Resource model for vpmeta.
//!
//! Holds and validates the records that get published to a FAIR Data Point:
//! organisations, distributions, and the resource specializations (biobank,
//! patient registry, dataset, data service). This crate has no HTTP or RDF
//! dependencies; serialization lives in `vpmeta-rdf`, the registry protocol in
//! `vpmeta-fdp`.

pub mod distribution;
pub mod error;
pub mod fields;
pub mod normalize;
pub mod organisation;
pub mod record;
pub mod resource;

pub use distribution::{Distribution, DistributionFields};
pub use error::{Error, Result};
pub use fields::FieldSet;
pub use organisation::{Organisation, OrganisationFields};
pub use record::{Record, RecordType};
pub use resource::{
  Biobank, DataService, Dataset, PatientRegistry, Resource, ResourceFields,
  ResourceKind,
};
