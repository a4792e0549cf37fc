//! Shared value objects used across the board

use super::error::{DomainError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest accepted number or counter label, in characters
pub const MAX_FIELD_CHARS: usize = 50;

fn bounded_text(field: &str, raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(format!("{} is required", field)));
    }
    if trimmed.chars().count() > MAX_FIELD_CHARS {
        return Err(DomainError::validation(format!(
            "{} must be at most {} characters",
            field, MAX_FIELD_CHARS
        )));
    }
    Ok(trimmed.to_string())
}

/// Number being called, e.g. a ticket number
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallNumber(String);

impl CallNumber {
    pub fn parse(raw: &str) -> Result<Self> {
        bounded_text("number", raw).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CallNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Label of the serving station the number is called to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CounterLabel(String);

impl CounterLabel {
    pub fn parse(raw: &str) -> Result<Self> {
        bounded_text("counter", raw).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CounterLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
