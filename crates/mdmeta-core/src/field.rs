//! Reflected field shapes.
//!
//! [`FieldType`] is what the host reports for a live variable, parameter or
//! struct member. A `None` reference means the referenced class, struct or
//! enum could not be resolved; every query involving it fails closed.

use std::fmt;

use crate::descriptor::{Category, MemberReference, SubCategory, TypeDescriptor, fmt_member};
use crate::metadata::Metadata;
use crate::type_ref::TypeRef;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FieldType {
    Bool,
    /// Plain byte, or a byte backed by an enum.
    Byte(Option<TypeRef>),
    Int,
    Int64,
    Float,
    Double,
    String,
    Name,
    Text,
    Struct(Option<TypeRef>),
    Object(Option<TypeRef>),
    SoftObject(Option<TypeRef>),
    /// Class reference; carries the meta class.
    Class(Option<TypeRef>),
    SoftClass(Option<TypeRef>),
    Interface(Option<TypeRef>),
    Enum(Option<TypeRef>),
    Delegate(MemberReference),
    Array(Box<FieldType>),
    Set(Box<FieldType>),
    Map(Box<FieldType>, Box<FieldType>),
}

impl FieldType {
    pub fn array_of(inner: FieldType) -> Self {
        FieldType::Array(Box::new(inner))
    }

    pub fn set_of(inner: FieldType) -> Self {
        FieldType::Set(Box::new(inner))
    }

    pub fn map_of(key: FieldType, value: FieldType) -> Self {
        FieldType::Map(Box::new(key), Box::new(value))
    }

    pub fn is_container(&self) -> bool {
        matches!(
            self,
            FieldType::Array(_) | FieldType::Set(_) | FieldType::Map(..)
        )
    }

    /// The enum behind an enum field or an enum-backed byte.
    pub fn enum_type(&self) -> Option<&TypeRef> {
        match self {
            FieldType::Enum(ty) | FieldType::Byte(ty) => ty.as_ref(),
            _ => None,
        }
    }

    /// Converts the shape to a descriptor the way the graph schema would
    /// describe a pin for it.
    ///
    /// Returns `None` for unresolved references and for containers nested
    /// inside containers, neither of which a pin can express.
    pub fn to_descriptor(&self) -> Option<TypeDescriptor> {
        match self {
            FieldType::Array(inner) => Some(inner.scalar_descriptor()?.array()),
            FieldType::Set(inner) => Some(inner.scalar_descriptor()?.set()),
            FieldType::Map(key, value) => {
                let value = value.scalar_descriptor()?;
                Some(key.scalar_descriptor()?.map_of(value))
            }
            _ => self.scalar_descriptor(),
        }
    }

    fn scalar_descriptor(&self) -> Option<TypeDescriptor> {
        fn referencing(category: Category, ty: &Option<TypeRef>) -> Option<TypeDescriptor> {
            let ty = ty.clone()?;
            Some(TypeDescriptor::new(category).with_referenced_type(ty))
        }

        let desc = match self {
            FieldType::Bool => TypeDescriptor::new(Category::Bool),
            FieldType::Byte(None) => TypeDescriptor::new(Category::Byte),
            FieldType::Byte(ty) => referencing(Category::Byte, ty)?,
            FieldType::Int => TypeDescriptor::new(Category::Int),
            FieldType::Int64 => TypeDescriptor::new(Category::Int64),
            FieldType::Float => {
                TypeDescriptor::new(Category::Real).with_sub_category(SubCategory::Float)
            }
            FieldType::Double => {
                TypeDescriptor::new(Category::Real).with_sub_category(SubCategory::Double)
            }
            FieldType::String => TypeDescriptor::new(Category::String),
            FieldType::Name => TypeDescriptor::new(Category::Name),
            FieldType::Text => TypeDescriptor::new(Category::Text),
            FieldType::Struct(ty) => referencing(Category::Struct, ty)?,
            FieldType::Object(ty) => referencing(Category::Object, ty)?,
            FieldType::SoftObject(ty) => referencing(Category::SoftObject, ty)?,
            FieldType::Class(ty) => referencing(Category::Class, ty)?,
            FieldType::SoftClass(ty) => referencing(Category::SoftClass, ty)?,
            FieldType::Interface(ty) => referencing(Category::Interface, ty)?,
            FieldType::Enum(ty) => referencing(Category::Enum, ty)?,
            FieldType::Delegate(member) => {
                TypeDescriptor::new(Category::Delegate).with_member_reference(member.clone())
            }
            FieldType::Array(_) | FieldType::Set(_) | FieldType::Map(..) => return None,
        };
        Some(desc)
    }

    fn fmt_scalar(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn with_ref(f: &mut fmt::Formatter<'_>, name: &str, ty: &Option<TypeRef>) -> fmt::Result {
            match ty {
                Some(ty) => write!(f, "{}({})", name, ty.short_name()),
                None => write!(f, "{}(?)", name),
            }
        }

        match self {
            FieldType::Bool => f.write_str("bool"),
            FieldType::Byte(None) => f.write_str("byte"),
            FieldType::Byte(ty) => with_ref(f, "byte", ty),
            FieldType::Int => f.write_str("int"),
            FieldType::Int64 => f.write_str("int64"),
            FieldType::Float => f.write_str("float"),
            FieldType::Double => f.write_str("double"),
            FieldType::String => f.write_str("string"),
            FieldType::Name => f.write_str("name"),
            FieldType::Text => f.write_str("text"),
            FieldType::Struct(ty) => with_ref(f, "struct", ty),
            FieldType::Object(ty) => with_ref(f, "object", ty),
            FieldType::SoftObject(ty) => with_ref(f, "softobject", ty),
            FieldType::Class(ty) => with_ref(f, "class", ty),
            FieldType::SoftClass(ty) => with_ref(f, "softclass", ty),
            FieldType::Interface(ty) => with_ref(f, "interface", ty),
            FieldType::Enum(ty) => with_ref(f, "enum", ty),
            FieldType::Delegate(member) => write!(f, "delegate({})", fmt_member(member)),
            container => write!(f, "{}", container),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Array(inner) => {
                f.write_str("array<")?;
                inner.fmt_scalar(f)?;
                f.write_str(">")
            }
            FieldType::Set(inner) => {
                f.write_str("set<")?;
                inner.fmt_scalar(f)?;
                f.write_str(">")
            }
            FieldType::Map(key, value) => {
                f.write_str("map<")?;
                key.fmt_scalar(f)?;
                f.write_str(", ")?;
                value.fmt_scalar(f)?;
                f.write_str(">")
            }
            scalar => scalar.fmt_scalar(f),
        }
    }
}

/// A named field with its own metadata.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub ty: FieldType,
    pub metadata: Metadata,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            ty,
            metadata: Metadata::new(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key, value);
        self
    }
}
