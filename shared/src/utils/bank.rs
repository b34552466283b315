//! Bank account utilities

use once_cell::sync::Lazy;
use regex::Regex;

static ACCOUNT_NUMBER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{9,18}$").expect("valid account number regex"));

// 4 bank letters, a literal 0, 6 branch characters
static IFSC_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{4}0[A-Z0-9]{6}$").expect("valid IFSC regex"));

/// Strip whitespace from an account number
pub fn normalize_account_number(account: &str) -> String {
    account.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Check a 9 to 18 digit bank account number
pub fn is_valid_account_number(account: &str) -> bool {
    ACCOUNT_NUMBER_REGEX.is_match(&normalize_account_number(account))
}

/// Trim and uppercase an IFSC code
pub fn normalize_ifsc(ifsc: &str) -> String {
    ifsc.trim().to_ascii_uppercase()
}

/// Check an IFSC code after normalization
pub fn is_valid_ifsc(ifsc: &str) -> bool {
    IFSC_REGEX.is_match(&normalize_ifsc(ifsc))
}

/// Mask an account number for display (e.g., XXXXXX1234)
pub fn mask_account_number(account: &str) -> String {
    let digits = normalize_account_number(account);
    if digits.len() > 4 && digits.is_ascii() {
        format!("{}{}", "X".repeat(digits.len() - 4), &digits[digits.len() - 4..])
    } else {
        "XXXX".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_account_number() {
        assert!(is_valid_account_number("123456789"));
        assert!(is_valid_account_number("1234 5678 9012 3456"));
        assert!(!is_valid_account_number("12345678")); // too short
        assert!(!is_valid_account_number("1234567890123456789")); // too long
        assert!(!is_valid_account_number("12345678A"));
    }

    #[test]
    fn test_is_valid_ifsc() {
        assert!(is_valid_ifsc("SBIN0001234"));
        assert!(is_valid_ifsc(" hdfc0abc123 "));
        assert!(!is_valid_ifsc("SBIN1001234")); // fifth char must be 0
        assert!(!is_valid_ifsc("SBI00001234"));
        assert!(!is_valid_ifsc("SBIN000123"));
    }

    #[test]
    fn test_mask_account_number() {
        assert_eq!(mask_account_number("123456789012"), "XXXXXXXX9012");
        assert_eq!(mask_account_number("123"), "XXXX");
    }
}
