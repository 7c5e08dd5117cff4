pub mod activity;
pub mod flag;
pub mod submission;
