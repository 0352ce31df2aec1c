//! Error taxonomy.
//!
//! Every failure in this crate is a local precondition violation. Nothing is
//! retried; operations return [`GeoTspError`] to the caller immediately with
//! enough context (tour index, offending value) to diagnose the problem.

/// Errors produced by the solver and its input/output layers.
#[derive(Debug, thiserror::Error)]
pub enum GeoTspError {
    #[error("InvalidTourLength: tour={tour}, length={length}, minimum={minimum}")]
    InvalidTourLength {
        tour: usize,
        length: usize,
        minimum: usize,
    },
    #[error("InvalidPopulationSize: size={size}, minimum={minimum}")]
    InvalidPopulationSize { size: usize, minimum: usize },
    #[error("InvalidProbabilityRange: {value} is outside [0, 1]")]
    InvalidProbabilityRange { value: f64 },
    #[error("IndexOutOfRange: {context}: index={index}, bound={bound}")]
    IndexOutOfRange {
        context: &'static str,
        index: usize,
        bound: usize,
    },
    #[error("DuplicateFitnessIndex: population index {index} is scored more than once")]
    DuplicateFitnessIndex { index: usize },
    #[error("NumericDomain: {context}: value={value}")]
    NumericDomain { context: &'static str, value: f64 },
    #[error("InvalidTour: tour {tour} is not a permutation of its location indices")]
    InvalidTour { tour: usize },
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("Location input contains no records")]
    NoLocations,
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("IoError: {0}")]
    Io(#[from] std::io::Error),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, GeoTspError>;
