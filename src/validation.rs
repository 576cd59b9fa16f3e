use crate::error::{KindredError, KindredResult};

/// Validates that a string is not blank (empty or whitespace-only).
/// Returns the trimmed string on success.
pub fn non_blank(value: &str, field: &str) -> KindredResult<String> {
    let trimmed = value.trim().to_string();
    if trimmed.is_empty() {
        Err(KindredError::BlankField {
            field: field.to_string(),
        })
    } else {
        Ok(trimmed)
    }
}

/// Validates an email address loosely: one `@` with something on each side.
/// Returns the trimmed address on success.
pub fn email(value: &str, field: &str) -> KindredResult<String> {
    let trimmed = non_blank(value, field)?;
    match trimmed.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(trimmed)
        }
        _ => Err(KindredError::InvalidField {
            field: field.to_string(),
            reason: "expected name@domain".into(),
        }),
    }
}

/// Validates an optional website. Bare hosts get an `https://` prefix.
pub fn optional_website(value: Option<&str>, field: &str) -> KindredResult<Option<String>> {
    let Some(site) = trim_optional(value) else {
        return Ok(None);
    };
    if site.contains(char::is_whitespace) {
        return Err(KindredError::InvalidField {
            field: field.to_string(),
            reason: "must not contain spaces".into(),
        });
    }
    if site.starts_with("http://") || site.starts_with("https://") {
        Ok(Some(site))
    } else {
        Ok(Some(format!("https://{}", site)))
    }
}

/// Trims an optional string, returning None if blank.
pub fn trim_optional(value: Option<&str>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_blank_trims_whitespace() {
        assert_eq!(non_blank("  hello  ", "name").unwrap(), "hello");
    }

    #[test]
    fn non_blank_rejects_whitespace_only() {
        assert!(non_blank("   ", "name").is_err());
    }

    #[test]
    fn email_accepts_plain_address() {
        assert_eq!(email(" alice@example.com ", "email").unwrap(), "alice@example.com");
    }

    #[test]
    fn email_rejects_missing_parts() {
        assert!(email("alice", "email").is_err());
        assert!(email("@example.com", "email").is_err());
        assert!(email("alice@", "email").is_err());
        assert!(email("a@b@c", "email").is_err());
    }

    #[test]
    fn website_adds_scheme() {
        assert_eq!(
            optional_website(Some("example.com"), "website").unwrap(),
            Some("https://example.com".to_string())
        );
        assert_eq!(
            optional_website(Some("http://x.org"), "website").unwrap(),
            Some("http://x.org".to_string())
        );
    }

    #[test]
    fn website_blank_is_none() {
        assert_eq!(optional_website(Some("  "), "website").unwrap(), None);
        assert!(optional_website(Some("a b.com"), "website").is_err());
    }

    #[test]
    fn trim_optional_returns_none_for_blank() {
        assert_eq!(trim_optional(Some("   ")), None);
        assert_eq!(trim_optional(Some(" hi ")), Some("hi".to_string()));
    }
}
