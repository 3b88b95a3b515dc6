pub mod digit;

pub use digit::{
    denormalize_digit, denormalize_vector, digits_of, digits_to_string, normalize_digit,
    normalize_digits, Digit,
};
