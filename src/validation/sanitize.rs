// Pure normalization functions applied before field checks

/// Strip leading and trailing whitespace
pub fn trim(value: &str) -> String {
    value.trim().to_string()
}

fn entity(ch: char) -> Option<&'static str> {
    match ch {
        '&' => Some("&amp;"),
        '"' => Some("&quot;"),
        '\'' => Some("&#x27;"),
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '/' => Some("&#x2F;"),
        '\\' => Some("&#x5C;"),
        '`' => Some("&#96;"),
        _ => None,
    }
}

fn replace_entities(value: &str, keep_ampersand: bool) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match entity(ch) {
            Some(_) if keep_ampersand && ch == '&' => out.push(ch),
            Some(replacement) => out.push_str(replacement),
            None => out.push(ch),
        }
    }
    out
}

/// Replace HTML-significant characters with entities
pub fn escape(value: &str) -> String {
    replace_entities(value, false)
}

/// Output-side escape for values that may already hold entities.
///
/// Leaves `&` alone, so text produced by [`escape`] passes through unchanged
/// while raw markup is still neutralized.
pub fn escape_markup(value: &str) -> String {
    replace_entities(value, true)
}

/// Canonical email form used for storage and lookups
pub fn normalize_email(value: &str) -> String {
    value.to_lowercase()
}
