//! Call entities

use crate::domain::shared::value_objects::{CallNumber, CounterLabel};
use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// One "please proceed to counter" announcement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Call {
    number: CallNumber,
    counter: CounterLabel,
    /// When the call was accepted (serialized as RFC 3339)
    timestamp: DateTime<Utc>,
}

impl Call {
    pub fn new(number: CallNumber, counter: CounterLabel, timestamp: DateTime<Utc>) -> Self {
        Self {
            number,
            counter,
            timestamp,
        }
    }

    pub fn number(&self) -> &CallNumber {
        &self.number
    }

    pub fn counter(&self) -> &CounterLabel {
        &self.counter
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Point-in-time view of the board: the call on screen plus older calls
///
/// `current` serializes as `{}` while nothing has been called yet, which is
/// what the display page expects.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CurrentState {
    #[serde(serialize_with = "serialize_current")]
    pub current: Option<Call>,
    pub history: Vec<Call>,
}

impl CurrentState {
    /// Split a most-recent-first list into current + history
    pub fn from_calls<I>(calls: I) -> Self
    where
        I: IntoIterator<Item = Call>,
    {
        let mut calls = calls.into_iter();
        let current = calls.next();
        Self {
            current,
            history: calls.collect(),
        }
    }

    /// Total number of calls in the snapshot
    pub fn len(&self) -> usize {
        self.history.len() + usize::from(self.current.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }
}

fn serialize_current<S>(current: &Option<Call>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match current {
        Some(call) => call.serialize(serializer),
        None => serializer.serialize_map(Some(0))?.end(),
    }
}
