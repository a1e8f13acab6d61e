use mdmeta_core::{Category, Colors, TypeDescriptor, well_known};

use crate::dump::{dump, dump_rule};
use crate::registry::{RegistryOptions, RuleRegistry};
use crate::rule::{KeyRule, ValueKind};

fn registry() -> RuleRegistry {
    RuleRegistry::build(
        vec![
            KeyRule::new("ClampMin", ValueKind::Integer, "")
                .in_category("Value Range")
                .with_types([
                    TypeDescriptor::new(Category::Int),
                    TypeDescriptor::new(Category::Int64),
                ]),
            KeyRule::new("Categories", ValueKind::TagSet, "")
                .with_type(TypeDescriptor::struct_of(well_known::GAMEPLAY_TAG))
                .with_display_name("Tag Filter"),
            KeyRule::new("BindWidget", ValueKind::Flag, "")
                .in_category("UMG|Bind Widget")
                .with_host(well_known::WIDGET_BLUEPRINT)
                .with_object_type(well_known::WIDGET, false)
                .with_incompatible("BindWidgetOptional")
                .on_local_variables(false)
                .on_parameters(false),
            KeyRule::new("Delta", ValueKind::Float, "")
                .with_float_min(1.0)
                .with_float_max(10.0)
                .with_slider(false),
            KeyRule::new("DefaultToSelf", ValueKind::String, "").functions_only(),
            KeyRule::new("EditConditionHides", ValueKind::Flag, "").with_required("EditCondition"),
            KeyRule::new("Mode", ValueKind::ValueList, "").with_values(["Fast", "Slow"]),
        ],
        RegistryOptions::default(),
    )
    .unwrap()
}

#[test]
fn dump_registry() {
    insta::assert_snapshot!(dump(&registry(), Colors::OFF), @r#"
    BindWidget: flag [UMG|Bind Widget]
      types: object(Widget)
      hosts: WidgetBlueprint
      scope: variable
      excludes: BindWidgetOptional
    Categories: tagset "Tag Filter"
      types: struct(GameplayTag)
      hosts: Blueprint
      scope: variable local param
    ClampMin: integer [Value Range]
      types: int, int64
      hosts: Blueprint
      scope: variable local param
      range: -2147483648..=2147483647 slider 0..=100
    DefaultToSelf: string
      hosts: Blueprint
      scope: function
    Delta: float
      types: *
      hosts: Blueprint
      scope: variable local param
      range: 1.0..=10.0
    EditConditionHides: flag
      types: *
      hosts: Blueprint
      scope: variable local param
      requires: EditCondition
    Mode: valuelist
      types: *
      hosts: Blueprint
      scope: variable local param
      values: Fast, Slow
    "#);
}

#[test]
fn dump_colored() {
    let mut out = String::new();
    let rule = KeyRule::new("NoSpinbox", ValueKind::Boolean, "")
        .in_category("Numbers")
        .with_required("UIMin");
    dump_rule(&mut out, &rule, Colors::ON).unwrap();

    let first = out.lines().next().unwrap();
    assert_eq!(
        first,
        "\x1b[34mNoSpinbox\x1b[0m: \x1b[32mboolean\x1b[0m \x1b[35m[Numbers]\x1b[0m"
    );
    assert!(out.contains("\x1b[2mscope:\x1b[0m \x1b[36mvariable local param\x1b[0m"));
    assert!(out.contains("\x1b[2mrequires:\x1b[0m \x1b[33mUIMin\x1b[0m"));
}
