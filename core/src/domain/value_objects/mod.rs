//! Value objects validated at construction or before use.

pub mod document;
pub mod otp_code;
pub mod responses;
pub mod target;

pub use document::DocumentUpload;
pub use otp_code::{OtpCode, CODE_LENGTH};
pub use responses::{ConfirmResponse, InitiateResponse, UploadResponse};
pub use target::VerificationTarget;
