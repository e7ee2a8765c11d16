use datasource_core::Record;
use datasource_storage::{Filter, FilterClause};
use serde_json::{Number, Value};

/// Evaluation of filters against stored records.
pub trait RecordMatcher {
    /// Check if a record satisfies this criterion
    fn matches(&self, record: &Record) -> bool;
}

impl RecordMatcher for Filter {
    /// All clauses must match; an empty filter matches every record.
    fn matches(&self, record: &Record) -> bool {
        self.clauses().iter().all(|clause| clause.matches(record))
    }
}

impl RecordMatcher for FilterClause {
    fn matches(&self, record: &Record) -> bool {
        let Some(field_value) = record.get_field(self.field()) else {
            return false;
        };

        match self {
            FilterClause::Exact { value, .. } => match_exact(field_value, value),
            FilterClause::Contains { value, .. } => {
                let needle = value.to_lowercase();
                search_value_recursive(field_value, &|s: &str| {
                    s.to_lowercase().contains(&needle)
                })
            }
            FilterClause::Prefix { value, .. } => {
                let needle = value.to_lowercase();
                search_value_recursive(field_value, &|s: &str| {
                    s.to_lowercase().starts_with(&needle)
                })
            }
            FilterClause::NumberRange { min, max, .. } => {
                match_number_range(field_value, *min, *max)
            }
            FilterClause::Exists { .. } => true,
        }
    }
}

fn match_exact(field_value: &Value, expected: &Value) -> bool {
    match (field_value, expected) {
        (Value::Number(a), Value::Number(b)) => match_number(a, b),
        _ => field_value == expected,
    }
}

/// Integers compare exactly; a float on either side compares as f64, so 1 equals 1.0.
fn match_number(a: &Number, b: &Number) -> bool {
    if a.is_f64() || b.is_f64() {
        return a.as_f64() == b.as_f64();
    }
    if let (Some(a), Some(b)) = (a.as_i64(), b.as_i64()) {
        return a == b;
    }
    if let (Some(a), Some(b)) = (a.as_u64(), b.as_u64()) {
        return a == b;
    }
    // a negative integer against one above i64::MAX
    false
}

fn match_number_range(field_value: &Value, min: Option<f64>, max: Option<f64>) -> bool {
    let number = match field_value {
        Value::Number(n) => match n.as_f64() {
            Some(n) => n,
            None => return false,
        },
        Value::String(s) => match s.parse::<f64>() {
            Ok(n) => n,
            Err(_) => return false,
        },
        _ => return false,
    };

    if let Some(min) = min
        && number < min
    {
        return false;
    }

    if let Some(max) = max
        && number > max
    {
        return false;
    }

    true
}

/// Recursively search through JSON values (arrays and objects) for string matches
fn search_value_recursive(value: &Value, matcher: &dyn Fn(&str) -> bool) -> bool {
    match value {
        Value::String(s) => matcher(s),
        Value::Array(arr) => arr.iter().any(|v| search_value_recursive(v, matcher)),
        Value::Object(obj) => obj.values().any(|v| search_value_recursive(v, matcher)),
        _ => false,
    }
}
