//! Narrative rationale providers.
//!
//! - [`http`] — client for the external text-generation service
//! - [`scripted`] — deterministic providers for tests and offline runs

pub mod http;
pub mod scripted;

pub use http::HttpNarrative;
pub use scripted::{FailingNarrative, ScriptedNarrative};
