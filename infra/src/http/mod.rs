//! HTTP access to the backend verification API

mod client;

pub use client::ApiClient;
