//! Shared test fixtures for the CRM insights workspace.
//!
//! Provides JSON builders shaped like Attio API payloads and helpers that
//! mount them on a `wiremock` server:
//! - notes list pages chained through `page[after]` cursors
//! - company record lookups
//!
//! Each test starts its own `MockServer`; nothing here is shared between tests.

mod fixtures;

pub use fixtures::*;
