//! Core data structures for the Blueprint metadata editor.
//!
//! - [`TypeRef`] and [`TypeHierarchy`]: stable type identities and "is-a" lookups
//! - [`TypeDescriptor`]: the declarative shape a metadata key applies to
//! - [`FieldType`]: the reflected shape of a live field
//! - [`MetadataMap`]: access to a field's (or owner's) metadata entries

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod colors;
pub mod descriptor;
pub mod field;
pub mod hierarchy;
pub mod metadata;
pub mod shape;
pub mod type_ref;
pub mod utils;

pub use colors::{Colors, Painted, Style};
pub use descriptor::{Category, ContainerKind, MemberReference, SubCategory, TypeDescriptor};
pub use field::{Field, FieldType};
pub use hierarchy::{TypeHierarchy, TypeTree};
pub use metadata::{Metadata, MetadataMap};
pub use shape::{ShapeParseError, parse_descriptor, parse_field_type};
pub use type_ref::{TypeRef, well_known};

#[cfg(test)]
mod colors_tests;
#[cfg(test)]
mod field_tests;
#[cfg(test)]
mod utils_tests;
