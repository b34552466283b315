//! Identity document number utilities (PAN, Aadhaar)

use once_cell::sync::Lazy;
use regex::Regex;

// 5 letters, 4 digits, 1 letter
static PAN_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{5}[0-9]{4}[A-Z]{1}$").expect("valid PAN regex"));

// 12 digits, leading 2-9
static AADHAAR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[2-9][0-9]{11}$").expect("valid Aadhaar regex"));

/// Uppercase a PAN as typed; no other normalization is applied
pub fn normalize_pan(pan: &str) -> String {
    pan.to_uppercase()
}

/// Check a PAN after uppercasing it
pub fn is_valid_pan(pan: &str) -> bool {
    PAN_REGEX.is_match(&normalize_pan(pan))
}

/// Mask a PAN for display (e.g., ******234F)
pub fn mask_pan(pan: &str) -> String {
    let pan = normalize_pan(pan);
    let chars: Vec<char> = pan.chars().collect();
    if chars.len() == 10 {
        let tail: String = chars[6..].iter().collect();
        format!("******{}", tail)
    } else {
        "****".to_string()
    }
}

/// Strip the spaces and hyphens users type between Aadhaar digit groups
pub fn normalize_aadhaar(aadhaar: &str) -> String {
    aadhaar
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect()
}

/// Check a 12-digit Aadhaar number (grouping characters allowed)
pub fn is_valid_aadhaar(aadhaar: &str) -> bool {
    AADHAAR_REGEX.is_match(&normalize_aadhaar(aadhaar))
}

/// Mask an Aadhaar number for display (e.g., XXXX XXXX 9012)
pub fn mask_aadhaar(aadhaar: &str) -> String {
    let digits = normalize_aadhaar(aadhaar);
    if digits.len() == 12 && digits.is_ascii() {
        format!("XXXX XXXX {}", &digits[8..])
    } else {
        "XXXX XXXX XXXX".to_string()
    }
}
