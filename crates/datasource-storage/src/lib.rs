//! # datasource-storage
//!
//! Storage abstraction for record datasources.
//!
//! This crate defines the contract that all datasource backends must implement.
//! It does not contain any implementations - those are provided by separate crates.
//!
//! ## Overview
//!
//! The main trait is [`Datasource`], which defines:
//! - search and count over a [`Filter`]
//! - create, fetch by identifier, update and delete
//!
//! ## Example
//!
//! ```ignore
//! use datasource_storage::{Datasource, DatasourceError, Filter, Record};
//!
//! fn active_users(ds: &dyn Datasource) -> Result<Vec<Record>, DatasourceError> {
//!     let filter = Filter::new().with_exact("active", true);
//!     ds.search(Some(&filter))
//! }
//! ```

mod error;
mod filter;
mod traits;

pub use datasource_core::{ID_FIELD, Record};
pub use error::{DatasourceError, ErrorCategory};
pub use filter::{Filter, FilterClause};
pub use traits::Datasource;

/// Type alias for a datasource result.
pub type DatasourceResult<T> = Result<T, DatasourceError>;

/// Type alias for a boxed datasource trait object.
pub type DynDatasource = Box<dyn Datasource>;

/// Prelude module for convenient imports.
///
/// ```ignore
/// use datasource_storage::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{DatasourceError, ErrorCategory};
    pub use crate::filter::{Filter, FilterClause};
    pub use crate::traits::Datasource;
    pub use crate::{DatasourceResult, DynDatasource};
    pub use datasource_core::{ID_FIELD, Record};
}
