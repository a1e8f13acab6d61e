use mdmeta_core::{FieldType, TypeTree, well_known};

use crate::config::EditorConfig;
use crate::registry::{FieldRole, RegistryOptions, RuleRegistry};
use crate::rule::ValueKind;
use crate::schema::default_rules;

fn registry() -> RuleRegistry {
    RuleRegistry::build(default_rules(), RegistryOptions::default()).unwrap()
}

fn keys_for(host: &mdmeta_core::TypeRef, field: FieldType, role: FieldRole) -> Vec<String> {
    let registry = registry();
    let types = TypeTree::engine_defaults();
    registry
        .field_rules(host, &field, role, &types)
        .into_iter()
        .map(|rule| format!("{}:{}", rule.key, rule.kind))
        .collect()
}

#[test]
fn defaults_are_sorted() {
    let rules = default_rules();
    assert!(rules.windows(2).all(|pair| pair[0].key <= pair[1].key));
}

#[test]
fn defaults_keep_per_kind_duplicates() {
    let rules = default_rules();
    let clamp_min: Vec<ValueKind> = rules
        .iter()
        .filter(|rule| rule.key == "ClampMin")
        .map(|rule| rule.kind)
        .collect();
    assert_eq!(clamp_min, [ValueKind::Integer, ValueKind::Float]);

    // Instanced struct pickers reuse the asset picker keys.
    assert_eq!(rules.iter().filter(|r| r.key == "AllowedClasses").count(), 2);
    assert_eq!(rules.iter().filter(|r| r.key == "ShowTreeView").count(), 2);
}

#[test]
fn defaults_pass_check() {
    let issues = EditorConfig::default().check();
    assert!(issues.is_empty(), "{issues:?}");
}

#[test]
fn int_variable() {
    let keys = keys_for(&well_known::BLUEPRINT, FieldType::Int, FieldRole::Variable);
    insta::assert_snapshot!(keys.join("\n"), @r"
    ArrayClamp:string
    ClampMax:integer
    ClampMin:integer
    Delta:integer
    DisplayAfter:string
    DisplayPriority:integer
    EditCondition:string
    EditConditionHides:flag
    Multiple:integer
    NoResetToDefault:flag
    NoSpinbox:boolean
    SliderExponent:integer
    UIMax:integer
    UIMin:integer
    ");
}

#[test]
fn float_parameter() {
    let keys = keys_for(&well_known::BLUEPRINT, FieldType::Float, FieldRole::Parameter);
    insta::assert_snapshot!(keys.join("\n"), @r"
    ClampMax:float
    ClampMin:float
    Delta:float
    Multiple:float
    NoSpinbox:boolean
    SliderExponent:float
    UIMax:float
    UIMin:float
    ");
}

#[test]
fn gameplay_tag_container() {
    let field = FieldType::Struct(Some(well_known::GAMEPLAY_TAG_CONTAINER));
    let keys = keys_for(&well_known::BLUEPRINT, field, FieldRole::LocalVariable);
    assert!(keys.contains(&"Categories:tagset".to_string()));
    assert!(keys.contains(&"ShowOnlyInnerProperties:flag".to_string()));
    assert!(!keys.contains(&"HideAlphaChannel:flag".to_string()));
}

#[test]
fn bind_widget_needs_widget_blueprint() {
    let field = FieldType::Object(Some(well_known::WIDGET));

    let on_actor = keys_for(&well_known::BLUEPRINT, field.clone(), FieldRole::Variable);
    assert!(!on_actor.iter().any(|key| key.starts_with("BindWidget")));

    let on_widget = keys_for(&well_known::WIDGET_BLUEPRINT, field.clone(), FieldRole::Variable);
    assert!(on_widget.contains(&"BindWidget:flag".to_string()));
    assert!(on_widget.contains(&"BindWidgetOptional:flag".to_string()));
    assert!(on_widget.contains(&"DesignerRebuild:flag".to_string()));
    assert!(!on_widget.contains(&"BindWidgetAnim:flag".to_string()));

    let as_local = keys_for(&well_known::WIDGET_BLUEPRINT, field, FieldRole::LocalVariable);
    assert!(!as_local.iter().any(|key| key.starts_with("BindWidget")));
}

#[test]
fn instanced_struct_pickers() {
    let field = FieldType::Struct(Some(well_known::INSTANCED_STRUCT));
    let registry = registry();
    let types = TypeTree::engine_defaults();
    let rules = registry.field_rules(&well_known::BLUEPRINT, &field, FieldRole::Variable, &types);

    let allowed: Vec<String> = rules
        .iter()
        .filter(|rule| rule.key == "AllowedClasses")
        .map(|rule| rule.display_text())
        .collect();
    assert_eq!(allowed, ["Allowed Struct Classes"]);
}

#[test]
fn class_pickers() {
    let field = FieldType::Class(Some(well_known::WIDGET));
    let keys = keys_for(&well_known::BLUEPRINT, field, FieldRole::Variable);
    for key in [
        "AllowAbstract:flag",
        "AllowedClasses:string",
        "BlueprintBaseOnly:flag",
        "ExactClass:flag",
        "MustImplement:string",
        "ShowTreeView:flag",
    ] {
        assert!(keys.contains(&key.to_string()), "missing {key}");
    }
}

#[test]
fn functions_and_structs() {
    let registry = registry();
    let types = TypeTree::engine_defaults();

    let functions: Vec<&str> = registry
        .function_rules(&well_known::BLUEPRINT, &types)
        .into_iter()
        .map(|rule| rule.key.as_str())
        .collect();
    assert_eq!(functions, ["DefaultToSelf"]);

    let structs: Vec<&str> = registry
        .struct_rules()
        .into_iter()
        .map(|rule| rule.key.as_str())
        .collect();
    assert_eq!(structs, ["DisableSplitPin", "HiddenByDefault"]);
}
