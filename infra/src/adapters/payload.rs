//! Channel specific request and response bodies

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use xh_core::{VerificationStatus, VerificationTarget};

/// Body of `POST {channel}/initiate`
pub(crate) fn initiate_body(target: &VerificationTarget) -> Value {
    match target {
        VerificationTarget::Phone { number } => json!({ "phoneNumber": number }),
        VerificationTarget::Email {
            address,
            is_primary,
        } => json!({ "email": address, "isPrimary": is_primary }),
        VerificationTarget::Pan { number, name } => json!({ "panNumber": number, "name": name }),
        VerificationTarget::Aadhaar { number, name } => {
            json!({ "aadhaarNumber": number, "name": name })
        }
        VerificationTarget::Bank {
            account_number,
            ifsc,
            holder_name,
        } => json!({
            "accountNumber": account_number,
            "ifsc": ifsc,
            "accountHolderName": holder_name,
        }),
    }
}

/// Text fields sent next to the uploaded document
pub(crate) fn document_fields(target: &VerificationTarget) -> Vec<(&'static str, String)> {
    match target {
        VerificationTarget::Phone { number } => vec![("phoneNumber", number.clone())],
        VerificationTarget::Email { address, .. } => vec![("email", address.clone())],
        VerificationTarget::Pan { number, name } => {
            vec![("panNumber", number.clone()), ("name", name.clone())]
        }
        VerificationTarget::Aadhaar { number, name } => {
            vec![("aadhaarNumber", number.clone()), ("name", name.clone())]
        }
        VerificationTarget::Bank {
            account_number,
            ifsc,
            holder_name,
        } => vec![
            ("accountNumber", account_number.clone()),
            ("ifsc", ifsc.clone()),
            ("accountHolderName", holder_name.clone()),
        ],
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ConfirmRequest<'a> {
    pub verification_id: &'a str,
    pub code: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ResendRequest<'a> {
    pub verification_id: &'a str,
}

/// `data` of an upload response
#[derive(Debug, Default, Deserialize)]
pub(crate) struct UploadData {
    #[serde(default)]
    pub status: Option<VerificationStatus>,
}

/// `data` of a status response
#[derive(Debug, Deserialize)]
pub(crate) struct StatusData {
    pub status: VerificationStatus,
}
