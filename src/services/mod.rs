pub mod history;
pub mod schedule;
