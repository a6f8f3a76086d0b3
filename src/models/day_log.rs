use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayComment {
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// The diary entry of a single day, keyed by its UTC midnight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayLog {
    pub id: String,
    pub date: DateTime<Utc>,
    pub stars: f64,
    pub comments: Vec<DayComment>,
}

/// Outcome of appending a comment to the log of a day
#[derive(Debug, Clone, PartialEq)]
pub enum DayLogWrite {
    Created(DayLog),
    Appended(DayLog),
}

impl DayLogWrite {
    pub fn log(&self) -> &DayLog {
        match self {
            DayLogWrite::Created(x) | DayLogWrite::Appended(x) => x,
        }
    }
}
