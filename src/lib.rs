pub mod codec;
pub mod data;
pub mod evaluate;
pub mod learner;
pub mod config;
pub mod error;

pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod optim;
pub mod train;

// Convenience re-exports
pub use codec::{Digit, normalize_digit, denormalize_digit, digits_of};
pub use data::{Row, FormattedRow, ParallelVectors, generate, format, format_single_input, to_parallel_vectors};
pub use evaluate::{Evaluator, EvaluationReport, ResultRecord, Mode};
pub use learner::{Learner, NetworkLearner};
pub use config::SortConfig;
pub use error::{SortError, Result};
pub use network::network::Network;
pub use train::{TrainConfig, TrainSummary};
