pub mod log;
pub mod patients;
pub mod run;
