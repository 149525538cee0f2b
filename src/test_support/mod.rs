//! Test fixtures for Bazelify unit tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use bazelify::test_support::fixtures::{write_description, SAMPLE_DESCRIPTION};
//!
//! #[test]
//! fn test_example() {
//!     let tmp = tempfile::TempDir::new().unwrap();
//!     write_description(tmp.path(), SAMPLE_DESCRIPTION);
//!     // Run the generator against tmp.path()...
//! }
//! ```

pub mod fixtures;

pub use fixtures::*;
