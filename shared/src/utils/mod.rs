//! Format validators and display helpers for verification targets

pub mod bank;
pub mod email;
pub mod identity;
pub mod phone;

// Re-export commonly used utilities
pub use bank::*;
pub use email::*;
pub use identity::*;
pub use phone::*;
