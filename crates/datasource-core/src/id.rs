//! Record identifier handling.
//!
//! Every record carries exactly one reserved field, [`ID_FIELD`], whose value
//! is generated by the owning datasource. Callers never choose identifiers.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Name of the reserved identifier field present on every record.
pub const ID_FIELD: &str = "id";

/// Generates a new random identifier (UUID v4, hyphenated).
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Rejects identifiers that are empty or consist only of whitespace.
pub fn validate_id(id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(CoreError::invalid_id(id));
    }
    Ok(())
}

/// Strategy used by a datasource to mint identifiers for new records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    /// Random UUID v4 strings.
    #[default]
    Uuid,
    /// Monotonically increasing decimal counter starting at 1.
    Sequence,
}

impl std::fmt::Display for IdStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Uuid => write!(f, "uuid"),
            Self::Sequence => write!(f, "sequence"),
        }
    }
}

/// Stateful identifier source owned by a single datasource instance.
///
/// A sequence generator never hands out the same value twice during its
/// lifetime, even if the record that received it is later removed.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    strategy: IdStrategy,
    next_sequence: u64,
}

impl IdGenerator {
    pub fn new(strategy: IdStrategy) -> Self {
        Self {
            strategy,
            next_sequence: 1,
        }
    }

    pub fn strategy(&self) -> IdStrategy {
        self.strategy
    }

    /// Returns the next identifier.
    pub fn next_id(&mut self) -> String {
        match self.strategy {
            IdStrategy::Uuid => generate_id(),
            IdStrategy::Sequence => {
                let id = self.next_sequence;
                self.next_sequence += 1;
                id.to_string()
            }
        }
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new(IdStrategy::default())
    }
}
