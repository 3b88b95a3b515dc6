pub mod formatter;
pub mod generator;
pub mod row;

pub use formatter::{format, format_single_input, to_parallel_vectors};
pub use generator::{generate, generate_formatted, generate_with, random_fixed_length_integer};
pub use row::{FormattedRow, ParallelVectors, Row};
