pub mod formula;
pub mod submission;
