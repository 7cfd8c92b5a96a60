use std::error::Error;
use std::fmt;

/// InputValueError is used if some simulation option or parameter does not fulfill the posed
/// requirements, e.g., by exceeding the allowed number of laps.
#[derive(Debug, Clone)]
pub struct InputValueError;

impl fmt::Display for InputValueError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Invalid input value")
    }
}

impl Error for InputValueError {}

/// format_mins_secs converts a number of seconds into the format M:SS. Seconds are zero-padded,
/// minutes are not, and there is no hour component (3600s results in 60:00).
pub fn format_mins_secs(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// mean returns the arithmetic mean of the values in x or None if x is empty.
pub fn mean<T: Into<f64> + Copy>(x: &[T]) -> Option<f64> {
    if x.is_empty() {
        return None;
    }

    let sum: f64 = x.iter().map(|&val| val.into()).sum();
    Some(sum / x.len() as f64)
}
