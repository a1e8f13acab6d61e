use indoc::indoc;

use mdmeta_core::{Category, Metadata, TypeDescriptor, well_known};

use crate::registry::FieldRole;
use crate::rule::{KeyRule, NumericRange, RuleId, Scope, ValueKind};

#[test]
fn defaults() {
    let rule = KeyRule::new("Delta", ValueKind::Integer, "How much to change the value.");

    assert_eq!(rule.supported_hosts.len(), 1);
    assert!(rule.supported_hosts.contains(&well_known::BLUEPRINT));
    assert_eq!(rule.supported_types.len(), 1);
    assert!(rule.supported_types.contains(&TypeDescriptor::wildcard()));
    assert_eq!(rule.scope, Scope::default());
    assert!(!rule.scope.functions);
    assert!(!rule.scope.structs);
    assert!(rule.scope.variables && rule.scope.local_variables && rule.scope.parameters);
    assert!(rule.required_key.is_none());
    assert!(rule.incompatible_keys.is_empty());
}

#[test]
fn scope_allows_roles() {
    let scope = Scope {
        variables: false,
        ..Scope::default()
    };
    assert!(!scope.allows(FieldRole::Variable));
    assert!(scope.allows(FieldRole::LocalVariable));
    assert!(scope.allows(FieldRole::Parameter));
    assert!(scope.allows(FieldRole::StructMember));
}

#[test]
fn functions_only_clears_field_scopes_and_types() {
    let rule = KeyRule::new("DefaultToSelf", ValueKind::String, "").functions_only();
    assert!(rule.scope.functions);
    assert!(!rule.scope.structs);
    assert!(!rule.scope.variables && !rule.scope.local_variables && !rule.scope.parameters);
    assert!(rule.supported_types.is_empty());

    let rule = KeyRule::new("HiddenByDefault", ValueKind::Flag, "").structs_only();
    assert!(rule.scope.structs);
    assert!(!rule.scope.functions);
    assert!(rule.supported_types.is_empty());
}

#[test]
fn object_and_class_builders() {
    let widget = KeyRule::new("BindWidget", ValueKind::Flag, "")
        .with_object_type(well_known::WIDGET, false);
    let types: Vec<String> = widget.supported_types.iter().map(|t| t.to_string()).collect();
    assert_eq!(types, ["object(Widget)"]);

    let soft = KeyRule::new("Asset", ValueKind::Flag, "")
        .with_object_type(well_known::DATA_TABLE, true);
    let types: Vec<String> = soft.supported_types.iter().map(|t| t.to_string()).collect();
    assert_eq!(types, ["softobject(DataTable)", "object(DataTable)"]);

    let class = KeyRule::new("MetaClass", ValueKind::Flag, "")
        .with_class_type(well_known::OBJECT, true);
    let types: Vec<String> = class.supported_types.iter().map(|t| t.to_string()).collect();
    assert_eq!(types, ["softclass(Object)", "class(Object)"]);
}

#[test]
fn identity_is_key_and_kind() {
    let int = KeyRule::new("ClampMin", ValueKind::Integer, "a");
    let float = KeyRule::new("ClampMin", ValueKind::Float, "a");
    let other_description = KeyRule::new("ClampMin", ValueKind::Integer, "b");

    assert_ne!(int.id(), float.id());
    assert_eq!(int.id(), other_description.id());
    assert_eq!(
        int.id(),
        RuleId {
            key: "ClampMin",
            kind: ValueKind::Integer
        }
    );
}

#[test]
fn numeric_range_is_gated_by_kind() {
    let int = KeyRule::new("SliderExponent", ValueKind::Integer, "").with_int_min(1);
    assert_eq!(
        int.int_range(),
        Some(NumericRange {
            min: 1,
            max: i32::MAX,
            slider: Some((0, 100)),
        })
    );
    assert_eq!(int.float_range(), None);

    let float = KeyRule::new("SliderExponent", ValueKind::Float, "")
        .with_float_min(1.0)
        .with_slider(false);
    let range = float.float_range().unwrap();
    assert_eq!(range.min, 1.0);
    assert_eq!(range.slider, None);
    assert!(range.contains(1.5));
    assert!(!range.contains(0.5));
    assert_eq!(float.int_range(), None);

    let flag = KeyRule::new("NoSpinbox", ValueKind::Flag, "").with_int_min(5);
    assert_eq!(flag.int_range(), None);
    assert_eq!(flag.float_range(), None);
}

#[test]
fn value_options_are_gated_by_kind() {
    let list = KeyRule::new("Mode", ValueKind::ValueList, "").with_values(["Fast", "Slow"]);
    assert_eq!(list.value_options(), Some(["Fast".to_string(), "Slow".to_string()].as_slice()));

    let string = KeyRule::new("Mode", ValueKind::String, "").with_values(["Fast"]);
    assert_eq!(string.value_options(), None);
}

#[test]
fn required_key_gates_availability() {
    let rule = KeyRule::new("EditConditionHides", ValueKind::Flag, "").with_required("EditCondition");
    let mut metadata = Metadata::new().with("EditCondition", "bEnabled");
    assert!(rule.is_available(&metadata));

    metadata = Metadata::new();
    assert!(!rule.is_available(&metadata));
}

#[test]
fn incompatible_key_gates_availability() {
    let rule = KeyRule::new("BindWidget", ValueKind::Flag, "")
        .with_incompatible("BindWidgetOptional")
        .add_incompatible("Transient");

    assert!(rule.is_available(&Metadata::new()));
    assert!(!rule.is_available(&Metadata::new().with("BindWidgetOptional", "")));
    assert!(!rule.is_available(&Metadata::new().with("Transient", "")));
}

#[test]
fn self_references_are_ignored() {
    let rule = KeyRule::new("Loop", ValueKind::Flag, "")
        .with_required("Loop")
        .with_incompatible("Loop");
    assert!(rule.is_available(&Metadata::new()));
    assert!(rule.is_available(&Metadata::new().with("Loop", "")));
}

#[test]
fn display_text_spaces_key() {
    let rule = KeyRule::new("ClampMin", ValueKind::Integer, "Minimum value.");
    assert_eq!(rule.display_text(), "Clamp Min");
    assert_eq!(rule.tooltip_text(), "Minimum value.");
    assert_eq!(rule.filter_text(), "ClampMin");
}

#[test]
fn display_name_override() {
    let rule = KeyRule::new(
        "Categories",
        ValueKind::TagSet,
        "Limit which gameplay tags may be selected.",
    )
    .with_display_name("Tag Filter");

    assert_eq!(rule.display_text(), "Tag Filter");
    insta::assert_snapshot!(rule.tooltip_text(), @r#"
    Limit which gameplay tags may be selected.

    Meta Data Key: "Categories"
    "#);
    assert_eq!(rule.filter_text(), "Categories Tag Filter");
}

#[test]
fn reachability() {
    assert!(KeyRule::new("A", ValueKind::Flag, "").is_reachable());
    assert!(KeyRule::new("F", ValueKind::Flag, "").functions_only().is_reachable());
    assert!(KeyRule::new("S", ValueKind::Flag, "").structs_only().is_reachable());
    assert!(!KeyRule::new("NoTypes", ValueKind::Flag, "").with_types(Vec::new()).is_reachable());

    let mut no_hosts = KeyRule::new("NoHosts", ValueKind::Flag, "");
    no_hosts.supported_hosts.clear();
    assert!(!no_hosts.is_reachable());

    let nowhere = KeyRule::new("Nowhere", ValueKind::Flag, "")
        .on_variables(false)
        .on_local_variables(false)
        .on_parameters(false);
    assert!(!nowhere.is_reachable());
}

#[test]
fn deserialize_fills_defaults() {
    let rule: KeyRule = serde_json::from_str(indoc! {r#"
        {
            "key": "ClampMin",
            "kind": "integer",
            "supported_types": [{"category": "int"}, {"category": "float"}],
            "scope": {"parameters": false}
        }
    "#})
    .unwrap();

    assert_eq!(rule.key, "ClampMin");
    assert_eq!(rule.kind, ValueKind::Integer);
    assert!(rule.supported_hosts.contains(&well_known::BLUEPRINT));
    assert!(rule.scope.variables);
    assert!(!rule.scope.parameters);
    assert_eq!(rule.min_int, i32::MIN);
    assert_eq!(rule.slider_max_int, 100);
    // Legacy categories are kept until a registry is built.
    let categories: Vec<Category> = rule.supported_types.iter().map(|t| t.category()).collect();
    assert_eq!(categories, [Category::Int, Category::Float]);
}

#[test]
fn serialize_skips_empty_optionals() {
    let rule = KeyRule::new("NoResetToDefault", ValueKind::Flag, "Hide the reset arrow.")
        .with_type(TypeDescriptor::new(Category::Bool))
        .on_parameters(false);
    let json = serde_json::to_value(&rule).unwrap();

    assert!(json.get("required_key").is_none());
    assert!(json.get("incompatible_keys").is_none());
    assert!(json.get("value_list").is_none());
    assert!(json.get("category").is_none());
    assert_eq!(json["kind"], "flag");
    assert_eq!(json["supported_types"], serde_json::json!([{"category": "bool"}]));
    assert_eq!(json["scope"]["parameters"], false);

    let back: KeyRule = serde_json::from_value(json).unwrap();
    assert_eq!(back, rule);
}

#[test]
fn value_kind_names() {
    for (kind, name) in [
        (ValueKind::Flag, "flag"),
        (ValueKind::TagSet, "tagset"),
        (ValueKind::ValueList, "valuelist"),
    ] {
        assert_eq!(kind.to_string(), name);
        assert_eq!(serde_json::to_value(kind).unwrap(), name);
    }
}
