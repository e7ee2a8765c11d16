//! The datasource capability contract.

use datasource_core::Record;
use serde_json::Value;

use crate::error::DatasourceError;
use crate::filter::Filter;

/// The capability contract every concrete record store must fulfil.
///
/// Operations are synchronous and run to completion. Reads borrow the
/// datasource shared, writes borrow it exclusively, so one instance never
/// sees two concurrent writers. Callers that share an instance across
/// threads serialize access themselves (e.g. behind a `Mutex`).
///
/// The backing store is private state of the implementor and is reachable
/// only through these operations.
///
/// # Example
///
/// ```ignore
/// use datasource_storage::{Datasource, DatasourceError, Record};
///
/// fn rename(ds: &mut dyn Datasource, id: &str, name: &str) -> Result<Record, DatasourceError> {
///     ds.update(id, serde_json::json!({ "name": name }))
/// }
/// ```
pub trait Datasource: Send {
    /// Returns every live record matching `filter`.
    ///
    /// An absent or empty filter returns all live records. Clauses on the
    /// identifier field are disregarded; use [`Datasource::fetch_by_id`] for
    /// identifier lookups.
    fn search(&self, filter: Option<&Filter>) -> Result<Vec<Record>, DatasourceError>;

    /// Counts the live records matching `filter`.
    ///
    /// Always equals the length of [`Datasource::search`] for the same filter;
    /// identifier clauses never change the result.
    fn count(&self, filter: Option<&Filter>) -> Result<usize, DatasourceError> {
        let filter = filter.map(Filter::without_identifier);
        Ok(self.search(filter.as_ref())?.len())
    }

    /// Validates `record_info` and stores it as a new record.
    ///
    /// A fresh identifier is always generated; one supplied in `record_info`
    /// is discarded. Returns the full stored record.
    ///
    /// # Errors
    ///
    /// Returns `DatasourceError::InvalidRecord` if `record_info` is not a JSON object.
    fn create(&mut self, record_info: Value) -> Result<Record, DatasourceError>;

    /// Returns the live record with identifier `id`.
    ///
    /// # Errors
    ///
    /// Returns `DatasourceError::NotFound` if no such record exists.
    fn fetch_by_id(&self, id: &str) -> Result<Record, DatasourceError>;

    /// Merges `update_info` into the record with identifier `id`.
    ///
    /// The identifier field and any field the record does not already have
    /// are ignored. Returns the record as stored after the merge.
    ///
    /// # Errors
    ///
    /// Returns `DatasourceError::NotFound` if no such record exists.
    /// Returns `DatasourceError::InvalidRecord` if `update_info` is not a JSON object.
    fn update(&mut self, id: &str, update_info: Value) -> Result<Record, DatasourceError>;

    /// Removes the record with identifier `id` from live visibility.
    ///
    /// # Errors
    ///
    /// Returns `DatasourceError::NotFound` if no such record exists.
    fn delete(&mut self, id: &str) -> Result<bool, DatasourceError>;

    /// Returns the name of this backend for logging/debugging.
    fn backend_name(&self) -> &'static str;
}
