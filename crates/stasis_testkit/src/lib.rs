//! # Stasis Testkit
//!
//! Test utilities for Stasis.
//!
//! This crate provides:
//! - Fixtures that build stores in known states
//! - Property-based test generators using proptest
//! - A naive reference model and differential checks against it
//! - Stress testing utilities
//!
//! ## Usage
//!
//! ```rust
//! use stasis_testkit::prelude::*;
//!
//! let store = nested_store(8, 2);
//! assert_eq!(store.depth(), 2);
//! assert_eq!(store.get("key0"), Ok("value0@2"));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod integration;
pub mod model;
pub mod stress;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::integration::*;
    pub use crate::model::*;
    pub use crate::stress::*;
}

pub use fixtures::*;
pub use generators::*;
pub use integration::*;
pub use model::*;
pub use stress::*;
