//! Error Handling utilities
//!
//! This module provides the crate error type and the HTTP status mapping used by the service client.

pub mod error;
pub mod mapper;

// Re-export commonly used types and functions
pub use error::*;
pub use mapper::HttpErrorMapper;
