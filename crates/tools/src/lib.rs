//! Decision-rule tools for Aftercare.
//!
//! The scoring, stratification, and recommendation tools are pure
//! functions over value objects: the same inputs always produce the same
//! decision. State (score history, alert counts) is supplied by the
//! caller from the memory subsystem. The guideline store loads its data
//! once and retrieves purely after that; impact projection is pure
//! arithmetic over run aggregates.

pub mod guidelines;
pub mod impact;
pub mod recommender;
pub mod reminders;
pub mod scorer;
pub mod stratifier;

pub use guidelines::GuidelineStore;
pub use impact::{patient_impact, population_impact, PatientImpact, PopulationImpact};
pub use recommender::recommend;
pub use reminders::{draft_reminders, Reminder};
pub use scorer::score;
pub use stratifier::stratify;
