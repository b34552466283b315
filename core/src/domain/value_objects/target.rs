//! The value a user asks to verify, with its channel-specific fields.

use xh_shared::utils::{bank, email, identity, phone};

use crate::domain::entities::VerificationChannel;
use crate::errors::ValidationError;

/// Channel-specific target of a verification attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationTarget {
    Phone {
        number: String,
    },
    Email {
        address: String,
        /// Whether the address becomes the user's primary contact
        is_primary: bool,
    },
    Pan {
        number: String,
        name: String,
    },
    Aadhaar {
        number: String,
        name: String,
    },
    Bank {
        account_number: String,
        ifsc: String,
        holder_name: String,
    },
}

impl VerificationTarget {
    pub fn phone(number: impl Into<String>) -> Self {
        Self::Phone {
            number: number.into(),
        }
    }

    pub fn email(address: impl Into<String>, is_primary: bool) -> Self {
        Self::Email {
            address: address.into(),
            is_primary,
        }
    }

    pub fn pan(number: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Pan {
            number: number.into(),
            name: name.into(),
        }
    }

    pub fn aadhaar(number: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Aadhaar {
            number: number.into(),
            name: name.into(),
        }
    }

    pub fn bank(
        account_number: impl Into<String>,
        ifsc: impl Into<String>,
        holder_name: impl Into<String>,
    ) -> Self {
        Self::Bank {
            account_number: account_number.into(),
            ifsc: ifsc.into(),
            holder_name: holder_name.into(),
        }
    }

    pub fn channel(&self) -> VerificationChannel {
        match self {
            Self::Phone { .. } => VerificationChannel::Phone,
            Self::Email { .. } => VerificationChannel::Email,
            Self::Pan { .. } => VerificationChannel::Pan,
            Self::Aadhaar { .. } => VerificationChannel::Aadhaar,
            Self::Bank { .. } => VerificationChannel::Bank,
        }
    }

    /// The primary value being verified
    pub fn value(&self) -> String {
        match self {
            Self::Phone { number } => number.clone(),
            Self::Email { address, .. } => address.clone(),
            Self::Pan { number, .. } | Self::Aadhaar { number, .. } => number.clone(),
            Self::Bank { account_number, .. } => account_number.clone(),
        }
    }

    /// The primary value masked for display and logs
    pub fn masked(&self) -> String {
        match self {
            Self::Phone { number } => phone::mask_phone_number(number),
            Self::Email { address, .. } => email::mask_email(address),
            Self::Pan { number, .. } => identity::mask_pan(number),
            Self::Aadhaar { number, .. } => identity::mask_aadhaar(number),
            Self::Bank { account_number, .. } => bank::mask_account_number(account_number),
        }
    }

    /// Validates the format and returns the normalized target
    ///
    /// Phone numbers are checked exactly as typed. Emails are trimmed, PANs
    /// uppercased, Aadhaar and account numbers stripped of grouping characters
    /// and IFSC codes uppercased. Declared names are trimmed and required.
    pub fn validated(&self) -> Result<Self, ValidationError> {
        match self {
            Self::Phone { number } => {
                if phone::is_valid_indian_mobile(number) {
                    Ok(self.clone())
                } else {
                    Err(ValidationError::InvalidPhone)
                }
            }
            Self::Email {
                address,
                is_primary,
            } => {
                let address = address.trim();
                if email::is_valid_email(address) {
                    Ok(Self::email(address, *is_primary))
                } else {
                    Err(ValidationError::InvalidEmail)
                }
            }
            Self::Pan { number, name } => {
                if !identity::is_valid_pan(number) {
                    return Err(ValidationError::InvalidPan);
                }
                let name = Self::declared_name(name, VerificationChannel::Pan)?;
                Ok(Self::pan(identity::normalize_pan(number), name))
            }
            Self::Aadhaar { number, name } => {
                if !identity::is_valid_aadhaar(number) {
                    return Err(ValidationError::InvalidAadhaar);
                }
                let name = Self::declared_name(name, VerificationChannel::Aadhaar)?;
                Ok(Self::aadhaar(identity::normalize_aadhaar(number), name))
            }
            Self::Bank {
                account_number,
                ifsc,
                holder_name,
            } => {
                if !bank::is_valid_account_number(account_number) {
                    return Err(ValidationError::InvalidAccountNumber);
                }
                if !bank::is_valid_ifsc(ifsc) {
                    return Err(ValidationError::InvalidIfsc);
                }
                let holder_name = Self::declared_name(holder_name, VerificationChannel::Bank)?;
                Ok(Self::bank(
                    bank::normalize_account_number(account_number),
                    bank::normalize_ifsc(ifsc),
                    holder_name,
                ))
            }
        }
    }

    fn declared_name(name: &str, channel: VerificationChannel) -> Result<String, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            Err(ValidationError::MissingName {
                document: channel.document_name(),
            })
        } else {
            Ok(name.to_string())
        }
    }
}
