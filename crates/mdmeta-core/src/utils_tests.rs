use crate::utils::{name_to_display_string, sanitize_float};

#[test]
fn display_string_splits_words() {
    assert_eq!(name_to_display_string("ClampMin"), "Clamp Min");
    assert_eq!(name_to_display_string("EditConditionHides"), "Edit Condition Hides");
    assert_eq!(name_to_display_string("Categories"), "Categories");
}

#[test]
fn display_string_keeps_acronyms() {
    assert_eq!(name_to_display_string("UIMin"), "UI Min");
    assert_eq!(name_to_display_string("UMG"), "UMG");
}

#[test]
fn display_string_from_snake_and_camel() {
    assert_eq!(name_to_display_string("edit_condition"), "Edit Condition");
    assert_eq!(name_to_display_string("slider_exponent"), "Slider Exponent");
    assert_eq!(name_to_display_string("getOptions"), "Get Options");
}

#[test]
fn display_string_digits() {
    assert_eq!(name_to_display_string("Int64"), "Int 64");
}

#[test]
fn sanitize_float_keeps_fraction() {
    assert_eq!(sanitize_float(0.0), "0.0");
    assert_eq!(sanitize_float(-3.0), "-3.0");
    assert_eq!(sanitize_float(2.5), "2.5");
    assert_eq!(sanitize_float(0.1), "0.1");
}
