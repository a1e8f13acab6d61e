//! Built-in key rules.
//!
//! The keys the engine's details panel and Blueprint compiler understand out
//! of the box. Configuration starts from this list; users can edit, remove or
//! extend it.

use mdmeta_core::{Category, SubCategory, TypeDescriptor, TypeRef, well_known};

use crate::rule::{KeyRule, ValueKind};

const VALUE_RANGE: &str = "Value Range";

fn of(category: Category) -> TypeDescriptor {
    TypeDescriptor::new(category)
}

fn referencing(category: Category, ty: TypeRef) -> TypeDescriptor {
    TypeDescriptor::new(category).with_referenced_type(ty)
}

fn real(sub: SubCategory) -> TypeDescriptor {
    TypeDescriptor::new(Category::Real).with_sub_category(sub)
}

fn numeric_types() -> Vec<TypeDescriptor> {
    let mut types = integer_types();
    types.extend(float_types());
    types
}

fn integer_types() -> Vec<TypeDescriptor> {
    vec![of(Category::Int), of(Category::Int64)]
}

fn float_types() -> Vec<TypeDescriptor> {
    vec![real(SubCategory::Float), real(SubCategory::Double)]
}

fn enum_types() -> Vec<TypeDescriptor> {
    vec![
        referencing(Category::Enum, well_known::ENUM),
        referencing(Category::Byte, well_known::ENUM),
    ]
}

fn object_types() -> Vec<TypeDescriptor> {
    vec![
        referencing(Category::Object, well_known::OBJECT),
        referencing(Category::SoftObject, well_known::OBJECT),
        referencing(Category::Class, well_known::OBJECT),
        referencing(Category::SoftClass, well_known::OBJECT),
        TypeDescriptor::struct_of(well_known::SOFT_OBJECT_PATH),
        TypeDescriptor::struct_of(well_known::SOFT_CLASS_PATH),
    ]
}

fn soft_object_types() -> Vec<TypeDescriptor> {
    vec![
        referencing(Category::SoftObject, well_known::OBJECT),
        referencing(Category::SoftClass, well_known::OBJECT),
        TypeDescriptor::struct_of(well_known::SOFT_OBJECT_PATH),
        TypeDescriptor::struct_of(well_known::SOFT_CLASS_PATH),
    ]
}

fn class_types() -> Vec<TypeDescriptor> {
    vec![
        referencing(Category::Class, well_known::OBJECT),
        referencing(Category::SoftClass, well_known::OBJECT),
        TypeDescriptor::struct_of(well_known::SOFT_CLASS_PATH),
    ]
}

fn asset_types() -> Vec<TypeDescriptor> {
    let mut types = vec![TypeDescriptor::struct_of(well_known::PRIMARY_ASSET_ID)];
    types.extend(object_types());
    types
}

fn data_table_types() -> Vec<TypeDescriptor> {
    vec![
        TypeDescriptor::struct_of(well_known::DATA_TABLE_ROW_HANDLE),
        referencing(Category::Object, well_known::DATA_TABLE),
        referencing(Category::SoftObject, well_known::DATA_TABLE),
    ]
}

fn instanced_struct() -> TypeDescriptor {
    TypeDescriptor::struct_of(well_known::INSTANCED_STRUCT)
}

/// Any-property key not offered on parameters.
fn property(key: &str, kind: ValueKind, description: &str) -> KeyRule {
    KeyRule::new(key, kind, description).on_parameters(false)
}

/// UMG key offered on member variables of widget Blueprints only.
fn widget(key: &str, description: &str, category: &str) -> KeyRule {
    KeyRule::new(key, ValueKind::Flag, description)
        .in_category(category)
        .with_host(well_known::WIDGET_BLUEPRINT)
        .on_local_variables(false)
        .on_parameters(false)
}

/// The built-in rules, sorted by key.
pub fn default_rules() -> Vec<KeyRule> {
    use ValueKind::*;

    let mut rules = vec![
        // Any property
        property(
            "EditCondition",
            String,
            "Enter a condition to determine whether or not this property can be edited. Supports Bools and Enums.",
        ),
        property(
            "EditConditionHides",
            Flag,
            "If this property's EditCondition is false, it will be hidden.",
        )
        .with_required("EditCondition"),
        property(
            "DisplayAfter",
            String,
            "In the details panel, this property will be displayed after the property specified here.",
        ),
        property(
            "DisplayPriority",
            Integer,
            "The priority to display this property in the details panel, lower values are first.",
        ),
        property(
            "NoResetToDefault",
            Flag,
            "If set, this property will never show the 'Reset to Default' arrow button.",
        ),
        // Bool properties
        property(
            "InlineEditConditionToggle",
            Flag,
            "If this bool is an EditCondition for another property, it will be displayed inline.",
        )
        .with_type(of(Category::Bool)),
        // Numbers
        KeyRule::new(
            "NoSpinbox",
            Boolean,
            "Disables the click and drag functionality for setting the value of this property.",
        )
        .with_types(numeric_types()),
    ];

    // Integers and floats
    for (kind, types) in [(Integer, integer_types()), (Float, float_types())] {
        let slider_exponent = KeyRule::new(
            "SliderExponent",
            kind,
            "How fast the value should change while dragging to set the value.",
        )
        .with_types(types.clone());
        rules.push(match kind {
            Integer => slider_exponent.with_int_min(1),
            _ => slider_exponent.with_float_min(1.0),
        });

        rules.extend([
            KeyRule::new(
                "Delta",
                kind,
                "How much to change the value by when dragging.",
            )
            .with_types(types.clone()),
            KeyRule::new(
                "Multiple",
                kind,
                "Forces the property value to be a multiple of this value.",
            )
            .with_types(types.clone()),
            KeyRule::new(
                "ClampMin",
                kind,
                "Specifies the minimum value that may be entered for the property.",
            )
            .in_category(VALUE_RANGE)
            .with_types(types.clone()),
            KeyRule::new(
                "ClampMax",
                kind,
                "Specifies the maximum value that may be entered for the property.",
            )
            .in_category(VALUE_RANGE)
            .with_types(types.clone()),
            KeyRule::new(
                "UIMin",
                kind,
                "Specifies the lowest that the value slider should represent.",
            )
            .in_category(VALUE_RANGE)
            .with_types(types.clone()),
            KeyRule::new(
                "UIMax",
                kind,
                "Specifies the highest that the value slider should represent.",
            )
            .in_category(VALUE_RANGE)
            .with_types(types),
        ]);
    }

    rules.extend([
        KeyRule::new(
            "ArrayClamp",
            String,
            "Clamps the valid values that can be entered in the UI to be between 0 and the length of the array specified.",
        )
        .in_category(VALUE_RANGE)
        .with_types(integer_types())
        .on_parameters(false),
        // Non-localized strings
        KeyRule::new(
            "GetOptions",
            String,
            "Specify a function that returns a list of Strings or Names that are valid values for this property. Seems to only support C++ functions since BP functions don't return anything for UFunction::GetReturnProperty().",
        )
        .with_types([of(Category::String), of(Category::Name)]),
        // Containers and structs
        KeyRule::new(
            "NoElementDuplicate",
            Flag,
            "Indicates that the duplicate icon should not be shown for entries of this array in the property panel.",
        )
        .with_type(TypeDescriptor::wildcard().array()),
        KeyRule::new(
            "ForceInlineRow",
            Flag,
            "Force the Key and Value of a TMap to display in the same row.",
        )
        .with_type(TypeDescriptor::wildcard().map_of(TypeDescriptor::wildcard())),
        KeyRule::new(
            "TitleProperty",
            String,
            "Specify a child property or FText style format of child properties to use as the summary.",
        )
        .with_type(of(Category::Struct).array()),
        KeyRule::new(
            "ShowOnlyInnerProperties",
            Flag,
            "Removes the struct layer in the details panel, directly displaying the child properties of the struct.",
        )
        .with_type(of(Category::Struct))
        .on_parameters(false),
        // Enums
        KeyRule::new(
            "ValidEnumValues",
            String,
            "Restricts selection to a subset of the enum's values.",
        )
        .with_types(enum_types()),
        KeyRule::new(
            "InvalidEnumValues",
            String,
            "Prevents selecting a subset of the enum's values.",
        )
        .with_types(enum_types()),
        // Gameplay tags
        KeyRule::new(
            "Categories",
            TagSet,
            "Limit which gameplay tags may be selected to one or more specific root tags.",
        )
        .with_types([
            TypeDescriptor::struct_of(well_known::GAMEPLAY_TAG),
            TypeDescriptor::struct_of(well_known::GAMEPLAY_TAG_CONTAINER),
        ])
        .with_display_name("Tag Filter"),
        KeyRule::new(
            "AllowedTypes",
            String,
            "Limit which Primary Data Assets may be selected to one or more specific Primary Asset Types.",
        )
        .with_type(TypeDescriptor::struct_of(well_known::PRIMARY_ASSET_ID)),
        // Data tables
        KeyRule::new(
            "RowType",
            String,
            "Limit the selection to a specific data table row struct type.",
        )
        .with_types(data_table_types()),
        KeyRule::new(
            "RequiredAssetDataTags",
            String,
            "Limit the selection to data tables with matching asset data tags.",
        )
        .with_types(data_table_types()),
        // Colors
        KeyRule::new(
            "HideAlphaChannel",
            Flag,
            "Hide the alpha channel from the color picker.",
        )
        .with_types([
            TypeDescriptor::struct_of(well_known::LINEAR_COLOR),
            TypeDescriptor::struct_of(well_known::COLOR),
        ]),
        // Soft references
        KeyRule::new(
            "AssetBundles",
            String,
            "The name of the bundle to store the secondary asset in.",
        )
        .with_types(soft_object_types()),
        KeyRule::new(
            "Untracked",
            Flag,
            "Specify that the soft reference should not be tracked and therefore not automatically cooked or checked during delete or redirector fixup.",
        )
        .with_types(soft_object_types()),
        // Class references
        KeyRule::new(
            "AllowAbstract",
            Flag,
            "Include abstract classes in the class picker for this property.",
        )
        .with_types(class_types()),
        KeyRule::new(
            "ShowTreeView",
            Flag,
            "Show a tree of class inheritance instead of a list view for the class picker.",
        )
        .with_types(class_types()),
        KeyRule::new(
            "BlueprintBaseOnly",
            Flag,
            "Only allow selecting blueprint classes.",
        )
        .with_types(class_types()),
        KeyRule::new(
            "ExactClass",
            Flag,
            "Only allow selecting specifically from the list of allowed classes, no subclasses.",
        )
        .with_types(class_types())
        .with_required("AllowedClasses"),
        KeyRule::new(
            "MustImplement",
            String,
            "Only allow classes that inherit the specified interface.",
        )
        .with_types(class_types()),
        // UMG
        widget(
            "DesignerRebuild",
            "When this property changes, the widget preview will be rebuilt.",
            "UMG",
        ),
        widget(
            "BindWidget",
            "This property requires a widget be bound to it in any child Widget Blueprints.",
            "UMG|Bind Widget",
        )
        .with_object_type(well_known::WIDGET, false)
        .with_incompatible("BindWidgetOptional"),
        widget(
            "BindWidgetOptional",
            "This property allows a widget be bound to it in any child Widget Blueprints.",
            "UMG|Bind Widget",
        )
        .with_object_type(well_known::WIDGET, false)
        .with_incompatible("BindWidget"),
        widget(
            "BindWidgetAnim",
            "This property requires a widget animation be bound to it in any child Widget Blueprints.",
            "UMG|Bind Widget Anim",
        )
        .with_object_type(well_known::WIDGET_ANIMATION, false)
        .with_incompatible("BindWidgetAnimOptional"),
        widget(
            "BindWidgetAnimOptional",
            "This property allows a widget animation be bound to it in any child Widget Blueprints.",
            "UMG|Bind Widget Anim",
        )
        .with_object_type(well_known::WIDGET_ANIMATION, false)
        .with_incompatible("BindWidgetAnim"),
        // Functions
        KeyRule::new(
            "DefaultToSelf",
            String,
            "Specify which function parameter should default to \"self\".",
        )
        .functions_only(),
        // Assets
        KeyRule::new(
            "DisplayThumbnail",
            Boolean,
            "Whether or not to display the asset thumbnail.",
        )
        .with_types(asset_types()),
        KeyRule::new(
            "AllowedClasses",
            String,
            "Filter the selection to classes that inherit from specific classes or implement specific interfaces.",
        )
        .with_types(asset_types()),
        KeyRule::new(
            "DisallowedClasses",
            String,
            "Filter out classes that inherit from specific classes or implement specific interfaces from the selection.",
        )
        .with_types(asset_types()),
        // Structs
        KeyRule::new(
            "HiddenByDefault",
            Flag,
            "Pins in Make and Break nodes are hidden by default.",
        )
        .structs_only(),
        KeyRule::new(
            "DisableSplitPin",
            Flag,
            "Indicates that node pins of this struct type cannot be split.",
        )
        .structs_only(),
        // Instanced structs
        KeyRule::new(
            "BaseStruct",
            String,
            "The minimum allowable type holdable by this struct.",
        )
        .with_type(instanced_struct()),
        KeyRule::new(
            "ExcludeBaseStruct",
            Flag,
            "Only allow subclasses of the BaseStruct type.",
        )
        .with_type(instanced_struct())
        .with_required("BaseStruct"),
        KeyRule::new(
            "AllowedClasses",
            String,
            "Inclusive list of allowed struct classes.",
        )
        .with_type(instanced_struct())
        .with_display_name("Allowed Struct Classes"),
        KeyRule::new(
            "DisallowedClasses",
            String,
            "List of struct classes to hide from picker.",
        )
        .with_type(instanced_struct())
        .with_display_name("Disallowed Struct Classes"),
        KeyRule::new(
            "ShowTreeView",
            Flag,
            "Display the Struct Class picker as a tree view.",
        )
        .with_type(instanced_struct()),
        KeyRule::new(
            "StructTypeConst",
            Flag,
            "Struct class cannot be changed.",
        )
        .with_type(instanced_struct())
        .with_display_name("Struct Type is Constant"),
    ]);

    rules.sort_by(|a, b| a.key.cmp(&b.key));
    rules
}
