//! Database-backed test support.

pub(crate) mod helpers;

pub use context::TestContext;
