//! # Chat Module
//!
//! Session state, lookup tables, the response router, slash commands and
//! markdown views.

pub mod command;
pub mod markdown;
pub mod router;
pub mod session;
pub mod tables;

pub use command::Command;
pub use router::{Reply, ResponseRouter, APOLOGY_MESSAGE};
pub use session::{ConversationRecord, MoodPoint, Session};
pub use tables::{RecommendationEntry, RecommendationTable, ResponseTable};
