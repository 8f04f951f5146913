//! Property resolution against a live host document.
//!
//! Catalog entries name properties by candidate keys; the host names them however its version and
//! locale do. Everything here maps one to the other and reports a miss as `None`, never as an error.

/// Style, property, and keyframe lookups.
pub mod resolver;
