/// Convert an identifier to a spaced, user-facing label.
///
/// Splits at lower-to-upper transitions, at the end of an acronym, before a
/// digit run and at underscores. Each word starts uppercase.
///
/// # Examples
/// ```
/// use mdmeta_core::utils::name_to_display_string;
/// assert_eq!(name_to_display_string("ClampMin"), "Clamp Min");
/// assert_eq!(name_to_display_string("UIMin"), "UI Min");
/// assert_eq!(name_to_display_string("edit_condition"), "Edit Condition");
/// ```
pub fn name_to_display_string(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut result = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' || c == ' ' {
            if !result.is_empty() && !result.ends_with(' ') {
                result.push(' ');
            }
            continue;
        }

        if i > 0 && !result.is_empty() && !result.ends_with(' ') {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            let boundary = (c.is_ascii_uppercase() && prev.is_ascii_lowercase())
                || (c.is_ascii_uppercase() && prev.is_ascii_uppercase() && next_is_lower)
                || (c.is_ascii_digit() && prev.is_ascii_alphabetic());
            if boundary {
                result.push(' ');
            }
        }

        if result.is_empty() || result.ends_with(' ') {
            result.push(c.to_ascii_uppercase());
        } else {
            result.push(c);
        }
    }
    result
}

/// Format a float the way metadata values store them: shortest round-trip
/// form, always with a fractional part.
///
/// # Examples
/// ```
/// use mdmeta_core::utils::sanitize_float;
/// assert_eq!(sanitize_float(1.0), "1.0");
/// assert_eq!(sanitize_float(0.25), "0.25");
/// ```
pub fn sanitize_float(value: f32) -> String {
    let mut s = value.to_string();
    if value.is_finite() && !s.contains('.') {
        s.push_str(".0");
    }
    s
}
