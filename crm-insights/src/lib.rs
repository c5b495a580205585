//! # CRM insights
//!
//! Reads meeting notes from the Attio CRM and turns them into views for a
//! notes dashboard and a sales-coaching assistant, next to a plain CRM chat
//! and a company research tool backed by a chat-completion API.
//!
//! ```text
//! fetch_all_notes ──► flatten_notes ──► filter_by_date ──► CompanyResolver ──► View
//! ```

pub mod app;
pub mod attio;
pub mod chat;
pub mod config;
pub mod error;
pub mod filter;
pub mod knowledge;
pub mod notes;
pub mod pages;
pub mod pagination;
pub mod resolver;
pub mod session;

pub use app::{Action, App, Transition, View};
pub use attio::{AttioClient, CrmClient, NotesPage, PageSize};
pub use chat::{ChatMessage, ChatModel, OpenAiChat, Role};
pub use config::AppConfig;
pub use error::{InsightsError, InsightsResult};
pub use filter::DateRange;
pub use knowledge::KnowledgeBase;
pub use notes::{NoteRow, ParentObject};
pub use resolver::{CompanyNames, CompanyResolver};
pub use session::SessionContext;
