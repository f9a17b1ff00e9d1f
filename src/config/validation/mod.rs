//! Configuration validation
//!
//! This module provides validation logic for all configuration structures.
//!
//! - `trait_def`: Core Validate trait definition
//! - `url_validators`: Base URL checks
//! - `console_validators`: Validators for ConsoleConfig and its sections
//! - `tests`: Test suite for all validators

mod console_validators;
mod trait_def;
mod url_validators;

pub use trait_def::Validate;
pub use url_validators::validate_base_url;
