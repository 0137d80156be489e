//! Error taxonomy shared by every engine component.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while computing charts and techniques
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChartError {
    #[error("Ephemeris unavailable for {body}: {detail}")]
    EphemerisUnavailable { body: String, detail: String },
    #[error("Unknown body: {0}")]
    UnknownBody(String),
    #[error("Invalid house system: {system}. Valid systems: {valid:?}")]
    InvalidHouseSystem { system: String, valid: Vec<String> },
    #[error("House calculation failed for {system}: {detail}")]
    HouseCalc { system: String, detail: String },
    #[error("Unresolvable dependency ({detail}): {names:?}")]
    UnresolvableDependency { detail: String, names: Vec<String> },
    #[error("No {event} found: {detail}")]
    EventNotFound { event: String, detail: String },
    #[error("Malformed input: {0}")]
    MalformedInput(String),
}

/// Machine-readable kind of a [`ChartError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    EphemerisUnavailable,
    UnknownBody,
    InvalidHouseSystem,
    HouseCalcError,
    UnresolvableDependency,
    EventNotFound,
    MalformedInput,
}

impl ChartError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ChartError::EphemerisUnavailable { .. } => ErrorKind::EphemerisUnavailable,
            ChartError::UnknownBody(_) => ErrorKind::UnknownBody,
            ChartError::InvalidHouseSystem { .. } => ErrorKind::InvalidHouseSystem,
            ChartError::HouseCalc { .. } => ErrorKind::HouseCalcError,
            ChartError::UnresolvableDependency { .. } => ErrorKind::UnresolvableDependency,
            ChartError::EventNotFound { .. } => ErrorKind::EventNotFound,
            ChartError::MalformedInput(_) => ErrorKind::MalformedInput,
        }
    }

    pub(crate) fn house_calc(system: impl Into<String>, detail: impl Into<String>) -> Self {
        ChartError::HouseCalc {
            system: system.into(),
            detail: detail.into(),
        }
    }

    pub(crate) fn unavailable(body: impl Into<String>, detail: impl Into<String>) -> Self {
        ChartError::EphemerisUnavailable {
            body: body.into(),
            detail: detail.into(),
        }
    }
}

pub type ChartResult<T> = Result<T, ChartError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        let err = ChartError::house_calc("Placidus", "circumpolar");
        assert_eq!(err.kind(), ErrorKind::HouseCalcError);
        assert!(err.to_string().contains("Placidus"));

        let err = ChartError::UnknownBody("vulcan".to_string());
        assert_eq!(err.kind(), ErrorKind::UnknownBody);
        assert_eq!(err.to_string(), "Unknown body: vulcan");
    }
}
