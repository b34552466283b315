//! Email address utilities

use once_cell::sync::Lazy;
use regex::Regex;

// local@domain.tld, no whitespace, exactly one '@'
static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Trim surrounding whitespace and lowercase the address
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Check the basic `local@domain.tld` shape; not a full RFC 5322 parser
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Mask an email address for display (e.g., r***@example.com)
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let first: String = local.chars().take(1).collect();
            format!("{}***@{}", first, domain)
        }
        _ => "****".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("ravi@example.com"));
        assert!(is_valid_email("ravi.kumar+tasks@mail.extrahand.in"));
        assert!(!is_valid_email("ravi@example"));
        assert!(!is_valid_email("ravi.example.com"));
        assert!(!is_valid_email("ravi@@example.com"));
        assert!(!is_valid_email("ravi @example.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Ravi@Example.COM "), "ravi@example.com");
    }

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("ravi@example.com"), "r***@example.com");
        assert_eq!(mask_email("not-an-email"), "****");
        assert_eq!(mask_email("@example.com"), "****");
    }
}
