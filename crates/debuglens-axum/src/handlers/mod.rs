//! HTTP handlers.
//!
//! Handlers parse the request, call the analysis service, and map the
//! result. They hold no state of their own.

pub mod analyze;
pub mod system;
