//! Filter types for datasource search and count operations.
//!
//! A [`Filter`] is a conjunction of [`FilterClause`]s over top-level record
//! fields. How clauses are evaluated is up to each backend; clauses on the
//! identifier field never narrow a search or count.

use datasource_core::ID_FIELD;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single selection criterion on one record field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum FilterClause {
    /// Field is present and equal to the value (e.g. `name = "a"`)
    Exact { field: String, value: Value },
    /// Case-insensitive substring match on string values
    Contains { field: String, value: String },
    /// Case-insensitive prefix match on string values
    Prefix { field: String, value: String },
    /// Numeric value within inclusive bounds
    NumberRange {
        field: String,
        min: Option<f64>,
        max: Option<f64>,
    },
    /// Field is present, whatever its value
    Exists { field: String },
}

impl FilterClause {
    /// Returns the record field this clause inspects.
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::Exact { field, .. }
            | Self::Contains { field, .. }
            | Self::Prefix { field, .. }
            | Self::NumberRange { field, .. }
            | Self::Exists { field } => field,
        }
    }

    /// Returns true if this clause targets the reserved identifier field.
    #[must_use]
    pub fn is_identifier_clause(&self) -> bool {
        self.field() == ID_FIELD
    }
}

/// Conjunction of filter clauses. An empty filter selects every live record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    #[serde(default)]
    clauses: Vec<FilterClause>,
}

impl Filter {
    /// Creates a new empty `Filter`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an arbitrary clause.
    #[must_use]
    pub fn with_clause(mut self, clause: FilterClause) -> Self {
        self.clauses.push(clause);
        self
    }

    /// Adds an exact equality clause.
    #[must_use]
    pub fn with_exact(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with_clause(FilterClause::Exact {
            field: field.into(),
            value: value.into(),
        })
    }

    /// Adds a substring clause.
    #[must_use]
    pub fn with_contains(self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.with_clause(FilterClause::Contains {
            field: field.into(),
            value: value.into(),
        })
    }

    /// Adds a prefix clause.
    #[must_use]
    pub fn with_prefix(self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.with_clause(FilterClause::Prefix {
            field: field.into(),
            value: value.into(),
        })
    }

    /// Adds a numeric range clause.
    #[must_use]
    pub fn with_number_range(
        self,
        field: impl Into<String>,
        min: Option<f64>,
        max: Option<f64>,
    ) -> Self {
        self.with_clause(FilterClause::NumberRange {
            field: field.into(),
            min,
            max,
        })
    }

    /// Adds a field presence clause.
    #[must_use]
    pub fn with_exists(self, field: impl Into<String>) -> Self {
        self.with_clause(FilterClause::Exists {
            field: field.into(),
        })
    }

    /// Returns the clauses in insertion order.
    #[must_use]
    pub fn clauses(&self) -> &[FilterClause] {
        &self.clauses
    }

    /// Returns true if this filter has no clauses.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Returns true if any clause targets the identifier field.
    #[must_use]
    pub fn has_identifier_clause(&self) -> bool {
        self.clauses.iter().any(FilterClause::is_identifier_clause)
    }

    /// Returns a copy of this filter with all identifier clauses removed.
    #[must_use]
    pub fn without_identifier(&self) -> Self {
        Self {
            clauses: self
                .clauses
                .iter()
                .filter(|clause| !clause.is_identifier_clause())
                .cloned()
                .collect(),
        }
    }
}

/// Every entry of a plain JSON object becomes an exact equality clause,
/// so `{"name": "a"}` selects records whose `name` is `"a"`.
impl From<Map<String, Value>> for Filter {
    fn from(object: Map<String, Value>) -> Self {
        object
            .into_iter()
            .fold(Self::new(), |filter, (field, value)| {
                filter.with_exact(field, value)
            })
    }
}

impl FromIterator<FilterClause> for Filter {
    fn from_iter<I: IntoIterator<Item = FilterClause>>(iter: I) -> Self {
        Self {
            clauses: iter.into_iter().collect(),
        }
    }
}
