//! In-memory datasource backend.
//!
//! This crate provides an in-memory implementation of the `Datasource` trait
//! from `datasource-storage`, backed by an insertion-ordered map owned by the
//! datasource instance.
//!
//! # Example
//!
//! ```ignore
//! use datasource_memory::InMemoryDatasource;
//! use datasource_storage::Datasource;
//!
//! let mut datasource = InMemoryDatasource::new();
//!
//! let created = datasource.create(serde_json::json!({ "name": "a" }))?;
//! let fetched = datasource.fetch_by_id(created.id())?;
//! assert_eq!(created, fetched);
//! ```

pub mod factory;
pub mod query;
pub mod storage;

// Re-export the Datasource trait for convenience
pub use datasource_storage::{Datasource, DatasourceError, Filter, Record};

pub use factory::{
    DatasourceBackend, DatasourceConfig, MAX_INITIAL_CAPACITY, StorageOptions, create_datasource,
};
pub use query::RecordMatcher;
pub use storage::InMemoryDatasource;

/// Creates a new boxed in-memory datasource with default options.
pub fn create_memory_datasource() -> datasource_storage::DynDatasource {
    Box::new(InMemoryDatasource::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_memory_datasource_shortcut() {
        let mut datasource = create_memory_datasource();
        assert_eq!(datasource.backend_name(), "memory");

        let record = datasource.create(serde_json::json!({"a": 1})).unwrap();
        assert_eq!(datasource.search(None).unwrap(), vec![record]);
    }
}
