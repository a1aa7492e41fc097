//! Request middleware.
//!
//! Purpose: cross-cutting request lifecycle concerns that are not tied to a
//! particular route, currently request tracing and logging.

pub mod trace;

pub use trace::Trace;
