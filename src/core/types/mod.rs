//! Core type definition module
//!
//! Wire and domain types exchanged with the ingestion service.

pub mod batch_info;
pub mod credentials;
pub mod csvgen;
pub mod license;
pub mod rows;
pub mod status;
pub mod submission;

// Re-export all public types
pub use batch_info::*;
pub use credentials::*;
pub use csvgen::*;
pub use license::*;
pub use rows::*;
pub use status::*;
pub use submission::*;
