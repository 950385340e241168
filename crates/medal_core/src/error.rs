use thiserror::Error;

#[derive(Error, Debug)]
pub enum PredictError {
    #[error("Malformed history: expected {expected} periods, found {found}")]
    MalformedHistory { expected: usize, found: usize },

    #[error("Invalid observation schedule: {0}")]
    InvalidSchedule(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PredictError {
    /// True when the caller handed us input that breaks the API contract,
    /// as opposed to an environment failure.
    pub fn is_contract_violation(&self) -> bool {
        match self {
            PredictError::MalformedHistory { .. } => true,
            PredictError::InvalidSchedule(_) => true,
            PredictError::InvalidConfig(_) => true,
            PredictError::ConfigParse(_) => false,
            PredictError::Io(_) => false,
            PredictError::Serialization(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, PredictError>;
