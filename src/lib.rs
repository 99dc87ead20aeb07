//! Rust client for the Cloud One Conformity report-configurations API.
//! Lists report configurations, resolves calendar dates into relative
//! day offsets and patches the date filter of selected configurations.

pub mod client;
pub mod dates;
pub mod error;
pub mod models;
pub mod session;

pub use client::{Client, DEFAULT_REGION};
pub use dates::{offsets_between, resolve_offsets};
pub use error::ApiError;
pub use models::{DateRangeFilter, ReportConfiguration, UpdatePayload};
