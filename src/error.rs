use thiserror::Error;
use crate::vocabulary::EventCode;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TheoryError {
    #[error("event code {code} is outside the vocabulary of {num_classes} classes")]
    EventOutOfRange { code: EventCode, num_classes: usize },

    #[error("composition already holds {length} events; reset before stepping again")]
    EpisodeFinished { length: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type TheoryResult<T> = Result<T, TheoryError>;
