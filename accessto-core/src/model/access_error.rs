#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum AccessError {
    #[error("matrix '{name}' has invalid shape: {message}")]
    InvalidShape { name: String, message: String },
    #[error("matrix '{name}' has duplicate origin id {id}")]
    DuplicateOrigin { name: String, id: i64 },
    #[error("matrix '{name}' has duplicate destination id {id}")]
    DuplicateDestination { name: String, id: i64 },
    #[error("matrix '{name}' has more than one entry for origin {origin} and destination {destination}")]
    DuplicatePair {
        name: String,
        origin: i64,
        destination: i64,
    },
    #[error("matrix '{name}' has value {value} for origin {origin} and destination {destination}, all values in a cost or impedance matrix should be real numbers >= 0")]
    NegativeValue {
        name: String,
        origin: i64,
        destination: i64,
        value: f64,
    },
    #[error("weight vector has duplicate id {0}")]
    DuplicateWeight(i64),
    #[error("weight for id {id} should be a real number >= 0, found {value}")]
    InvalidWeight { id: i64, value: f64 },
    #[error("invalid impedance function parameter: {0}")]
    InvalidImpedanceParameter(String),
    #[error("invalid `normalize` parameter '{0}', expected one of 'none', 'median', 'average' or 'maximum'")]
    InvalidNormalization(String),
    #[error("parameter `n` should be an integer >= 2, found {0}")]
    InvalidNthOpportunity(usize),
    #[error("parameter `n` is {n} but there are only {available} opportunities to rank")]
    NthOpportunityOutOfRange { n: usize, available: usize },
}
