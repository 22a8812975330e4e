//! inFakt API access layer.
//!
//! No tool performs a network call except through [`ApiClient`]; remote
//! failures leave this module only as [`ApiError`].

mod client;
mod error;

pub use client::{ApiClient, AUTH_HEADER, QueryPairs};
pub use error::{ApiError, ErrorCategory};
