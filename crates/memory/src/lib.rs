//! Memory subsystem for Aftercare.
//!
//! Three stores with different lifetimes:
//! - [`session`] — transient per-patient context, process-lifetime, bounded
//! - [`file_store`] / [`in_memory`] — durable per-patient long-term records
//! - [`escalation`] — append-only escalation/action log with outcome tracking

pub mod escalation;
pub mod file_store;
pub mod in_memory;
pub mod session;

pub use escalation::EscalationLog;
pub use file_store::FileStore;
pub use in_memory::InMemoryStore;
pub use session::{SessionMemory, SessionRegistry, Turn};
