pub mod evaluator;
pub mod report;

pub use evaluator::{normalize_dataset, Evaluator, Mode};
pub use report::{EvaluationReport, ResultRecord};
