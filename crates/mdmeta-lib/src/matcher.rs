//! Descriptor-to-field matching.
//!
//! Matching runs in three steps:
//! 1. The container kinds must agree. Arrays and sets then compare their
//!    element; maps match their value against the descriptor's value type
//!    and compare their key.
//! 2. A wildcard matches any element.
//! 3. The category decides how the element is compared. Reference categories
//!    use "is-a" checks against the type hierarchy; everything else is
//!    compared structurally.
//!
//! Unresolved references never match.

use mdmeta_core::{
    Category, ContainerKind, FieldType, TypeDescriptor, TypeHierarchy, TypeRef, well_known,
};

pub struct Matcher<'a, H: TypeHierarchy + ?Sized> {
    types: &'a H,
}

impl<'a, H: TypeHierarchy + ?Sized> Matcher<'a, H> {
    pub fn new(types: &'a H) -> Self {
        Self { types }
    }

    pub fn matches(&self, desc: &TypeDescriptor, field: &FieldType) -> bool {
        let Some(element) = self.unwrap_container(desc, field) else {
            return false;
        };

        if desc.is_wildcard() {
            return true;
        }

        self.matches_element(desc, element)
    }

    /// The field shape compared against the descriptor's category, or `None`
    /// when the container kinds disagree.
    fn unwrap_container<'f>(
        &self,
        desc: &TypeDescriptor,
        field: &'f FieldType,
    ) -> Option<&'f FieldType> {
        match (desc.container(), field) {
            (ContainerKind::None, field) if !field.is_container() => Some(field),
            // A bare wildcard accepts containers as a whole.
            (ContainerKind::None, field) => desc.is_wildcard().then_some(field),
            (ContainerKind::Array, FieldType::Array(element))
            | (ContainerKind::Set, FieldType::Set(element)) => Some(element.as_ref()),
            (ContainerKind::Map, FieldType::Map(key, value)) => {
                let value_desc = desc.value_type()?;
                self.matches(value_desc, value).then_some(key.as_ref())
            }
            _ => None,
        }
    }

    fn matches_element(&self, desc: &TypeDescriptor, field: &FieldType) -> bool {
        let reference = desc.referenced_type();

        match desc.category() {
            Category::Struct => match field {
                FieldType::Struct(Some(ty)) => self.is_a(ty, reference),
                _ => false,
            },
            Category::Object => match field {
                FieldType::Object(Some(class)) | FieldType::SoftObject(Some(class)) => {
                    self.is_a(class, reference)
                }
                // A class reference is an object reference to a `Class`.
                FieldType::Class(Some(_)) | FieldType::SoftClass(Some(_)) => {
                    self.is_a(&well_known::CLASS, reference)
                }
                _ => false,
            },
            Category::SoftObject => match field {
                FieldType::SoftObject(Some(class)) => self.is_a(class, reference),
                FieldType::SoftClass(Some(_)) => self.is_a(&well_known::CLASS, reference),
                _ => false,
            },
            Category::Class => match field {
                FieldType::Class(Some(meta)) => self.is_a(meta, reference),
                _ => false,
            },
            Category::SoftClass => match field {
                FieldType::SoftClass(Some(meta)) => self.is_a(meta, reference),
                _ => false,
            },
            Category::Enum => Self::matches_enum(reference, field),
            Category::Byte if reference.is_some() => Self::matches_enum(reference, field),
            _ => Self::matches_exact(desc, field),
        }
    }

    /// No reference means any type.
    fn is_a(&self, ty: &TypeRef, reference: Option<&TypeRef>) -> bool {
        match reference {
            Some(parent) => self.types.is_child_of(ty, parent),
            None => true,
        }
    }

    fn matches_enum(reference: Option<&TypeRef>, field: &FieldType) -> bool {
        let Some(actual) = field.enum_type() else {
            return false;
        };
        // Only the `Enum` placeholder means any enum; no reference means none.
        match reference {
            None => false,
            Some(expected) if *expected == well_known::ENUM => true,
            Some(expected) => expected == actual,
        }
    }

    fn matches_exact(desc: &TypeDescriptor, field: &FieldType) -> bool {
        let Some(actual) = field.to_descriptor() else {
            return false;
        };
        actual.category() == desc.category()
            && actual.sub_category() == desc.sub_category()
            && actual.referenced_type() == desc.referenced_type()
            && actual.member_reference() == desc.member_reference()
    }
}
