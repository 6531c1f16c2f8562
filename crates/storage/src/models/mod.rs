pub mod formula;
pub mod submission;

pub use formula::FormulaRecord;
pub use submission::Submission;
