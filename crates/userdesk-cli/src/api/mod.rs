//! API client module
//!
//! Typed HTTP access to the users backend.

pub mod client;
pub mod endpoints;
pub mod error;
pub mod normalize;
pub mod payload;
pub mod tap;
pub mod types;

pub use client::ApiClient;
pub use error::{ApiError, ServerErrorDetail};
pub use payload::{Attachment, ProfileUpdate, RequestBody, RequestDescriptor};
pub use types::*;
