//! Validation trait definition
//!
//! Every configuration section implements this so `Config::validate` can walk them in order.

/// Validation trait for configuration sections
pub trait Validate {
    /// Check the section, returning a message naming the offending field
    fn validate(&self) -> Result<(), String>;
}
