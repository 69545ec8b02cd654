//! Local HTTP API for the mobile frontend.
//!
//! Routes live under `/api/`; handlers validate inputs, then delegate to
//! the domain repositories. Errors come back as structured JSON.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod types;
