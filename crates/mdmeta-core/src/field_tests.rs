use crate::descriptor::{Category, MemberReference, SubCategory, TypeDescriptor};
use crate::field::{Field, FieldType};
use crate::metadata::MetadataMap;
use crate::type_ref::{TypeRef, well_known};

#[test]
fn scalar_descriptors() {
    assert_eq!(
        FieldType::Int.to_descriptor(),
        Some(TypeDescriptor::new(Category::Int))
    );
    assert_eq!(
        FieldType::Float.to_descriptor(),
        Some(TypeDescriptor::new(Category::Real).with_sub_category(SubCategory::Float))
    );
    assert_eq!(
        FieldType::Double.to_descriptor(),
        Some(TypeDescriptor::new(Category::Real).with_sub_category(SubCategory::Double))
    );
    assert_eq!(
        FieldType::Struct(Some(well_known::COLOR)).to_descriptor(),
        Some(TypeDescriptor::struct_of(well_known::COLOR))
    );
}

#[test]
fn unresolved_references_have_no_descriptor() {
    assert_eq!(FieldType::Struct(None).to_descriptor(), None);
    assert_eq!(FieldType::Object(None).to_descriptor(), None);
    assert_eq!(FieldType::Enum(None).to_descriptor(), None);
    assert_eq!(FieldType::array_of(FieldType::Class(None)).to_descriptor(), None);
}

#[test]
fn plain_byte_is_not_enum_backed() {
    assert_eq!(FieldType::Byte(None).enum_type(), None);
    let color = TypeRef::from_static("/Game/Enums.EColor");
    assert_eq!(FieldType::Byte(Some(color.clone())).enum_type(), Some(&color));
    assert_eq!(FieldType::Enum(Some(color.clone())).enum_type(), Some(&color));
}

#[test]
fn container_descriptors() {
    let field = FieldType::map_of(FieldType::Name, FieldType::Float);
    let expected = TypeDescriptor::new(Category::Name)
        .map_of(TypeDescriptor::new(Category::Real).with_sub_category(SubCategory::Float));
    assert_eq!(field.to_descriptor(), Some(expected));

    let nested = FieldType::array_of(FieldType::array_of(FieldType::Int));
    assert_eq!(nested.to_descriptor(), None);
}

#[test]
fn delegate_descriptor_keeps_member() {
    let member = MemberReference::new(Some(well_known::WIDGET), "OnClicked");
    let desc = FieldType::Delegate(member.clone()).to_descriptor().unwrap();
    assert_eq!(desc.category(), Category::Delegate);
    assert_eq!(desc.member_reference(), Some(&member));
}

#[test]
fn display_shapes() {
    let shapes = [
        FieldType::Int,
        FieldType::Struct(Some(well_known::GAMEPLAY_TAG)),
        FieldType::Struct(None),
        FieldType::array_of(FieldType::Class(Some(well_known::WIDGET))),
        FieldType::map_of(FieldType::Int, FieldType::String),
        FieldType::Byte(None),
        FieldType::Delegate(MemberReference::new(Some(well_known::WIDGET), "OnClicked")),
    ];
    let rendered: Vec<String> = shapes.iter().map(ToString::to_string).collect();
    insta::assert_snapshot!(rendered.join("\n"), @r"
    int
    struct(GameplayTag)
    struct(?)
    array<class(Widget)>
    map<int, string>
    byte
    delegate(@Widget::OnClicked)
    ");
}

#[test]
fn field_builder() {
    let field = Field::new("Count", FieldType::Int).with_metadata("ClampMin", "0");
    assert_eq!(field.name, "Count");
    assert_eq!(field.metadata.get("ClampMin"), Some("0"));
}
