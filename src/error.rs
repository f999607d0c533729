use std::fmt;

/// Reasons a letter distribution cannot be built
#[derive(Debug, Clone, PartialEq)]
pub enum DistributionError {
    /// The text contained no letter of the alphabet
    EmptyCorpus,
    EmptyAlphabet,
    LengthMismatch { letters: usize, weights: usize },
    InvalidWeight { letter: char, weight: f64 },
    /// Weights were valid but summed to zero
    ZeroTotal,
}

impl fmt::Display for DistributionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistributionError::EmptyCorpus => {
                write!(f, "corpus contains no letters of the alphabet")
            }
            DistributionError::EmptyAlphabet => write!(f, "alphabet is empty"),
            DistributionError::LengthMismatch { letters, weights } => write!(
                f,
                "alphabet has {letters} letters but {weights} weights were given"
            ),
            DistributionError::InvalidWeight { letter, weight } => {
                write!(f, "invalid weight {weight} for letter '{letter}'")
            }
            DistributionError::ZeroTotal => write!(f, "letter weights sum to zero"),
        }
    }
}

impl std::error::Error for DistributionError {}

/// Reasons a character cannot be sampled
#[derive(Debug, Clone, PartialEq)]
pub enum SamplingError {
    TooManyAttributes { requested: usize, available: usize },
    /// Fewer attributes carry a positive weight than were requested
    NotEnoughWeightedAttributes { requested: usize, weighted: usize },
    InvalidWeights,
}

impl fmt::Display for SamplingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SamplingError::TooManyAttributes {
                requested,
                available,
            } => write!(
                f,
                "cannot draw {requested} distinct attributes from {available}"
            ),
            SamplingError::NotEnoughWeightedAttributes {
                requested,
                weighted,
            } => write!(
                f,
                "cannot draw {requested} distinct attributes, only {weighted} have a non-zero weight"
            ),
            SamplingError::InvalidWeights => {
                write!(f, "sampling weights must be finite, non-negative and not all zero")
            }
        }
    }
}

impl std::error::Error for SamplingError {}

/// Crate level error
#[derive(Debug)]
pub enum Error {
    Distribution(DistributionError),
    Sampling(SamplingError),
    Io(std::io::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Distribution(e) => write!(f, "letter distribution: {e}"),
            Error::Sampling(e) => write!(f, "character sampling: {e}"),
            Error::Io(e) => write!(f, "io: {e}"),
            Error::Csv(e) => write!(f, "csv: {e}"),
            Error::Json(e) => write!(f, "json: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Distribution(e) => Some(e),
            Error::Sampling(e) => Some(e),
            Error::Io(e) => Some(e),
            Error::Csv(e) => Some(e),
            Error::Json(e) => Some(e),
        }
    }
}

impl From<DistributionError> for Error {
    fn from(e: DistributionError) -> Self {
        Error::Distribution(e)
    }
}

impl From<SamplingError> for Error {
    fn from(e: SamplingError) -> Self {
        Error::Sampling(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Self {
        Error::Csv(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
