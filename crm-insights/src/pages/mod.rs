//! One module per front-end page. Every entry point takes the shared
//! [`crate::App`] plus the caller's session and returns what to display.

pub mod crm_chat;
pub mod dashboard;
pub mod enrichment;
pub mod sales_coach;
