//! `udtmap` Core: value model and collaborator contracts for mapping
//! database composite types into generic records.

pub mod metadata;
pub mod raw;
pub mod record;
pub mod traits;
pub mod types;

pub use metadata::{AttributeMetadata, SCALAR_TYPE_NAMES};
pub use raw::{RawCollection, RawComposite, RawValue};
pub use record::{GenericRecord, MappedValue};
pub use traits::{CatalogConnection, CatalogRow, Executable};
pub use types::Scalar;
