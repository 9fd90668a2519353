//! The agent pipeline: monitor, analyzer, escalator.
//!
//! Each agent is a thin orchestration layer over the pure decision tools,
//! wired to its collaborators through [`AgentContext`].

pub mod analyzer;
pub mod context;
pub mod escalator;
pub mod monitor;

#[cfg(test)]
pub(crate) mod test_support;

pub use analyzer::{analyze, AnalysisResult};
pub use context::AgentContext;
pub use escalator::{decide_and_act, EscalationResult};
pub use monitor::{process, MonitoringResult};
