//! Parsing helpers for loosely formatted values found in request parameters.

pub mod date;
pub mod number;
pub mod string;

pub use date::{parse_date_parts, parse_str_date, parse_str_datetime};
pub use number::{format_amount, str_int};
pub use string::{clean, clean_white};
