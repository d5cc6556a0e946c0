use thiserror::Error;

/// Full name could not be split into a first and last name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("Please enter your full name (first and last).")]
    Incomplete,
}

/// A required form field was left empty; the form is not submitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

/// Why a lookup produced no match list.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("lookup request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("lookup response was not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("lookup cancelled")]
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MountError {
    #[error("host page has no container element with id {0:?}")]
    ContainerMissing(String),
}
