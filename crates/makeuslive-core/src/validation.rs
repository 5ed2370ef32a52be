//! Validation helpers shared by the form engine and the API layer.

use chrono::NaiveDate;

/// Maximum slug length for content entities and form definitions.
pub const MAX_SLUG_LENGTH: usize = 100;

/// Validate a URL slug: lowercase alphanumerics and hyphens, no leading or
/// trailing hyphen, 1-100 chars.
pub fn validate_slug(slug: &str) -> Result<(), String> {
    if slug.is_empty() || slug.len() > MAX_SLUG_LENGTH {
        return Err(format!(
            "Slug must be 1-{} characters long",
            MAX_SLUG_LENGTH
        ));
    }
    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err("Slug may only contain lowercase letters, digits, and hyphens".to_string());
    }
    if slug.starts_with('-') || slug.ends_with('-') {
        return Err("Slug may not start or end with a hyphen".to_string());
    }
    Ok(())
}

/// Syntactic email check: one `@`, non-empty local part, domain with a dot,
/// no whitespace. Deliverability is not verified.
pub fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = value.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

/// Lenient phone check: digits plus spacing/formatting characters, at least
/// five digits total.
pub fn is_valid_phone(value: &str) -> bool {
    let mut digits = 0usize;
    for c in value.chars() {
        match c {
            '0'..='9' => digits += 1,
            ' ' | '+' | '(' | ')' | '-' | '.' => {}
            _ => return false,
        }
    }
    digits >= 5
}

/// ISO date check (`YYYY-MM-DD`).
pub fn is_valid_date(value: &str) -> bool {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_accepts_lowercase_and_hyphens() {
        assert!(validate_slug("our-process").is_ok());
        assert!(validate_slug("2024-retrospective").is_ok());
    }

    #[test]
    fn slug_rejects_bad_shapes() {
        assert!(validate_slug("").is_err());
        assert!(validate_slug("Has-Caps").is_err());
        assert!(validate_slug("spaces here").is_err());
        assert!(validate_slug("-leading").is_err());
        assert!(validate_slug("trailing-").is_err());
        assert!(validate_slug(&"a".repeat(101)).is_err());
    }

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("hello@makeuslive.com"));
        assert!(is_valid_email("a.b+tag@sub.example.org"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("user@nodot"));
        assert!(!is_valid_email("user name@example.com"));
    }

    #[test]
    fn phone_shapes() {
        assert!(is_valid_phone("+33 6 12 34 56 78"));
        assert!(is_valid_phone("(555) 123-4567"));
        assert!(!is_valid_phone("123"));
        assert!(!is_valid_phone("call me maybe"));
    }

    #[test]
    fn date_shapes() {
        assert!(is_valid_date("2024-02-29"));
        assert!(!is_valid_date("2023-02-29"));
        assert!(!is_valid_date("29/02/2024"));
    }
}
