//! Unit tests for configuration loading and precedence.
//!
//! - `helpers`: Shared test utilities
//! - `precedence`: Layer precedence tests
//! - `cli_layer`: Command-line layer construction
//! - `field_resolution`: Token, format, and priority resolution
//! - `sources`: Configuration file discovery and loading

mod helpers;
