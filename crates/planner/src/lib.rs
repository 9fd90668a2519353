//! Daily planning and engagement simulation for Aftercare.
//!
//! - [`parse`] — discharge-plan free-text parsing ("Name - frequency")
//! - [`schedule`] — expands a discharge plan into one day's task schedule
//! - [`engagement`] — stochastic task-completion simulation behind an
//!   injectable sampler

pub mod engagement;
pub mod parse;
pub mod schedule;

pub use engagement::{
    simulate, EngagementProfile, EngagementSampler, RngSampler, ScriptedSampler,
};
pub use parse::{parse_entries, parse_entry, Frequency, PlanItem};
pub use schedule::{create_plan, create_plan_on};
