//! Shared test utilities for the site-content test suite.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let record = raw(&[("author", "Jun"), ("text", "hi"), ("timestamp", TS)]);
//! let comment = normalize(&record).unwrap();
//! ```

use std::collections::HashMap;

/// A valid timestamp for records whose timestamp is not under test.
pub const TS: &str = "2024-01-01T00:00:00Z";

/// Build a raw comment record from key/value pairs.
pub fn raw(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
