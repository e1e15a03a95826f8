use serde::{Deserialize, Serialize};
use std::fmt;

/// Backend primary key.
pub type Id = u64;

/// A money value as the backend sends it.
///
/// Decimal columns come back as strings (`"49.99"`) while freshly computed
/// values come back as numbers, so both are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    /// A JSON number
    Number(f64),
    /// A numeric string
    Text(String),
}

impl Amount {
    /// The numeric value, if the text form parses.
    pub fn value(&self) -> Option<f64> {
        match self {
            Amount::Number(n) => Some(*n),
            Amount::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Amount::Number(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::Number(n) => write!(f, "{n:.2}"),
            Amount::Text(s) => f.write_str(s),
        }
    }
}

/// `{ "message": "..." }` acknowledgement returned by deletes and logout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Server-provided text
    pub message: String,
}
