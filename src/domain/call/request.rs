//! Inbound call requests

use crate::domain::shared::value_objects::{CallNumber, CounterLabel};
use crate::domain::shared::{DomainError, Result};
use serde::{Deserialize, Serialize};

/// Raw `{number, counter}` payload as submitted by staff
///
/// Fields are optional so that a missing field is reported as a validation
/// error rather than a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CallRequest {
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub counter: Option<String>,
}

impl CallRequest {
    pub fn new(number: impl Into<String>, counter: impl Into<String>) -> Self {
        Self {
            number: Some(number.into()),
            counter: Some(counter.into()),
        }
    }

    /// Check both fields and produce a call the history store accepts
    pub fn validate(&self) -> Result<ValidatedCall> {
        let (number, counter) = match (self.number.as_deref(), self.counter.as_deref()) {
            (Some(number), Some(counter)) => (number, counter),
            _ => return Err(DomainError::validation("Missing number or counter")),
        };

        Ok(ValidatedCall {
            number: CallNumber::parse(number)?,
            counter: CounterLabel::parse(counter)?,
        })
    }
}

/// A call whose fields passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedCall {
    pub number: CallNumber,
    pub counter: CounterLabel,
}
