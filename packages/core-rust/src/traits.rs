use indexmap::IndexMap;

use crate::raw::RawValue;
use crate::types::Scalar;

/// One result row of a catalog query: named, typed columns.
///
/// Column names are normalized to upper case, so lookups are
/// case-insensitive the way catalog identifiers are.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogRow {
    columns: IndexMap<String, Scalar>,
}

impl CatalogRow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style column setter.
    #[must_use]
    pub fn with(mut self, column: &str, value: impl Into<Scalar>) -> Self {
        self.set(column, value);
        self
    }

    pub fn set(&mut self, column: &str, value: impl Into<Scalar>) {
        self.columns.insert(column.to_uppercase(), value.into());
    }

    /// Raw column value, or `None` if the column is absent.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&Scalar> {
        self.columns.get(&column.to_uppercase())
    }

    /// Column as text. `None` for absent, NULL or non-character columns.
    #[must_use]
    pub fn get_str(&self, column: &str) -> Option<&str> {
        self.get(column).and_then(Scalar::as_str)
    }

    /// Column as an integer. Accepts `Int`, integral `Float` and integral
    /// `Decimal` text.
    #[must_use]
    pub fn get_i64(&self, column: &str) -> Option<i64> {
        match self.get(column)? {
            Scalar::Int(v) => Some(*v),
            #[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
            Scalar::Float(v) if v.is_finite() && v.trunc() == *v => Some(*v as i64),
            Scalar::Decimal(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

/// Connection capable of running parameterized catalog queries.
///
/// Supplied by the host (pooling and connection lifecycle live outside this
/// workspace). Calls are blocking; any deadline is the connection's own.
///
/// Shared as `Arc<dyn CatalogConnection>` across threads.
pub trait CatalogConnection: Send + Sync {
    /// Run `sql` with positional string bind parameters and collect all rows.
    ///
    /// # Errors
    ///
    /// Returns the driver's error when the query cannot be prepared or run.
    fn query(&self, sql: &str, params: &[String]) -> anyhow::Result<Vec<CatalogRow>>;
}

/// Executable statement handle, typically a stored-procedure call with a
/// composite OUT parameter.
///
/// `execute` may be called more than once on the same handle (the mapper
/// re-executes once after refreshing stale metadata).
pub trait Executable {
    /// Run the statement.
    ///
    /// # Errors
    ///
    /// Returns the driver's error, including decode failures raised while
    /// materializing OUT values.
    fn execute(&mut self) -> anyhow::Result<()>;

    /// Positional OUT value (1-based, as drivers number parameters).
    ///
    /// # Errors
    ///
    /// Returns the driver's error if the index is not an OUT parameter or
    /// the value cannot be read.
    fn output(&self, index: usize) -> anyhow::Result<RawValue>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_lookup_is_case_insensitive() {
        let row = CatalogRow::new().with("attr_name", "ID").with("IS_COLLECTION", 0_i64);
        assert_eq!(row.get_str("ATTR_NAME"), Some("ID"));
        assert_eq!(row.get_i64("is_collection"), Some(0));
        assert!(row.get("MISSING").is_none());
    }

    #[test]
    fn row_integer_accepts_decimal_text() {
        let row = CatalogRow::new().with("N", Scalar::Decimal(" 3 ".into()));
        assert_eq!(row.get_i64("N"), Some(3));
        let row = CatalogRow::new().with("N", Scalar::Decimal("1.5".into()));
        assert_eq!(row.get_i64("N"), None);
    }

    #[test]
    fn row_integer_accepts_integral_float() {
        let row = CatalogRow::new().with("N", 1.0_f64);
        assert_eq!(row.get_i64("N"), Some(1));
        let row = CatalogRow::new().with("N", 0.5_f64);
        assert_eq!(row.get_i64("N"), None);
        let row = CatalogRow::new().with("N", f64::NAN);
        assert_eq!(row.get_i64("N"), None);
    }

    #[test]
    fn row_null_is_not_text() {
        let row = CatalogRow::new().with("ATTR_TYPE_NAME", Scalar::Null);
        assert!(row.get("ATTR_TYPE_NAME").is_some());
        assert_eq!(row.get_str("ATTR_TYPE_NAME"), None);
    }
}
