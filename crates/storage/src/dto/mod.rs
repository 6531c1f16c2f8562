pub mod common;
pub mod formula;
pub mod score;
pub mod submission;

mod validation;
