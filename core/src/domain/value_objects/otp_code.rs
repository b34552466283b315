//! One-time code entered by the user.

use crate::errors::ValidationError;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// A code of exactly six ASCII digits
#[derive(Clone, PartialEq, Eq)]
pub struct OtpCode(String);

impl OtpCode {
    /// Parses a code, rejecting anything but six ASCII digits
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        if input.len() == CODE_LENGTH && input.chars().all(|c| c.is_ascii_digit()) {
            Ok(Self(input.to_string()))
        } else {
            Err(ValidationError::InvalidCode)
        }
    }

    /// Keeps only ASCII digits, at most six, as the code field does
    pub fn sanitize_input(input: &str) -> String {
        input
            .chars()
            .filter(|c| c.is_ascii_digit())
            .take(CODE_LENGTH)
            .collect()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for OtpCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("OtpCode(******)")
    }
}
