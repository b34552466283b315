//! Phone number utilities

use once_cell::sync::Lazy;
use regex::Regex;

// Indian mobile numbers: 10 digits, leading 6-9
static INDIAN_MOBILE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[6-9][0-9]{9}$").expect("valid Indian mobile regex"));

/// Length of an Indian mobile number without country code
pub const INDIAN_MOBILE_LENGTH: usize = 10;

/// Normalize a phone number by removing common formatting characters
pub fn normalize_phone_number(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Keep only ASCII digits, at most ten of them, as a phone input field does
pub fn sanitize_phone_input(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(INDIAN_MOBILE_LENGTH)
        .collect()
}

/// Check if `phone` is exactly a 10-digit Indian mobile number
///
/// The input is checked as given: formatting characters, a country code or
/// surrounding whitespace make it invalid.
pub fn is_valid_indian_mobile(phone: &str) -> bool {
    INDIAN_MOBILE_REGEX.is_match(phone)
}

/// Format a valid Indian mobile number with its country code (+91 98765 43210)
pub fn format_indian_mobile(phone: &str) -> Option<String> {
    if is_valid_indian_mobile(phone) {
        Some(format!("+91 {} {}", &phone[0..5], &phone[5..10]))
    } else {
        None
    }
}

/// Mask a phone number for display (e.g., 987****3210)
pub fn mask_phone_number(phone: &str) -> String {
    let normalized = normalize_phone_number(phone);
    if normalized.len() >= 7 {
        format!(
            "{}****{}",
            &normalized[0..3],
            &normalized[normalized.len() - 4..]
        )
    } else {
        "****".to_string()
    }
}
