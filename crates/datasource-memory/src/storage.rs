use datasource_core::{IdGenerator, Record};
use datasource_storage::{Datasource, DatasourceError, DatasourceResult, Filter};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::factory::{MAX_INITIAL_CAPACITY, StorageOptions};
use crate::query::RecordMatcher;

const BACKEND_NAME: &str = "memory";

/// In-memory datasource backed by an insertion-ordered map.
///
/// This implementation provides:
/// - Full CRUD operations over schema-flexible records
/// - Identifier generation per [`StorageOptions::id_strategy`]
/// - Filtered search and count, in creation order
/// - Hard deletes: a removed record is gone for good
///
/// The store is owned by the instance and dropped with it. Mutating
/// operations need `&mut self`; there is no internal locking.
#[derive(Debug)]
pub struct InMemoryDatasource {
    /// Live records keyed by identifier
    records: IndexMap<String, Record>,
    /// Identifier source for `create`
    ids: IdGenerator,
}

impl InMemoryDatasource {
    /// Creates a new in-memory datasource with default options.
    pub fn new() -> Self {
        Self::with_options(StorageOptions::default())
    }

    /// Creates a new in-memory datasource with the given options.
    ///
    /// `initial_capacity` is capped at [`MAX_INITIAL_CAPACITY`].
    pub fn with_options(options: StorageOptions) -> Self {
        let capacity = options
            .initial_capacity
            .unwrap_or_default()
            .min(MAX_INITIAL_CAPACITY);
        Self {
            records: IndexMap::with_capacity(capacity),
            ids: IdGenerator::new(options.id_strategy),
        }
    }

    /// Read access to the backing collection for this crate's own operations.
    pub(crate) fn store(&self) -> &IndexMap<String, Record> {
        &self.records
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.store().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store().is_empty()
    }

    /// Mints an identifier not currently in use.
    fn next_free_id(&mut self) -> String {
        loop {
            let id = self.ids.next_id();
            if !self.records.contains_key(&id) {
                return id;
            }
            warn!(%id, strategy = %self.ids.strategy(), "generated id collides with a live record, retrying");
        }
    }

    fn matching<'a>(
        &'a self,
        filter: Option<&'a Filter>,
    ) -> impl Iterator<Item = &'a Record> + 'a {
        self.store()
            .values()
            .filter(move |record| filter.is_none_or(|f| f.matches(record)))
    }
}

impl Default for InMemoryDatasource {
    fn default() -> Self {
        Self::new()
    }
}

/// Extracts the field map from caller input, rejecting anything but a JSON object.
fn into_object(value: Value, operation: &str) -> DatasourceResult<Map<String, Value>> {
    match value {
        Value::Object(fields) => Ok(fields),
        other => Err(DatasourceError::invalid_record(format!(
            "{operation} expects a JSON object, got {}",
            json_type_name(&other)
        ))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl Datasource for InMemoryDatasource {
    fn search(&self, filter: Option<&Filter>) -> DatasourceResult<Vec<Record>> {
        let filter = filter.map(Filter::without_identifier);
        Ok(self.matching(filter.as_ref()).cloned().collect())
    }

    fn count(&self, filter: Option<&Filter>) -> DatasourceResult<usize> {
        let filter = filter.map(Filter::without_identifier);
        Ok(self.matching(filter.as_ref()).count())
    }

    fn create(&mut self, record_info: Value) -> DatasourceResult<Record> {
        let fields = into_object(record_info, "create")?;
        let id = self.next_free_id();
        let record = Record::new(id, fields)?;

        self.records.insert(record.id().to_string(), record.clone());
        debug!(id = record.id(), backend = BACKEND_NAME, "record created");

        Ok(record)
    }

    fn fetch_by_id(&self, id: &str) -> DatasourceResult<Record> {
        self.store()
            .get(id)
            .cloned()
            .ok_or_else(|| DatasourceError::not_found(id))
    }

    fn update(&mut self, id: &str, update_info: Value) -> DatasourceResult<Record> {
        let mut updated = self.fetch_by_id(id)?;
        let changes = into_object(update_info, "update")?;

        // `updated` is an independent copy; the stored record changes only on insert below.
        let mut ignored = 0usize;
        for (field, value) in changes {
            if !updated.replace_field(&field, value) {
                ignored += 1;
            }
        }

        self.records.insert(id.to_string(), updated.clone());
        debug!(id, ignored, backend = BACKEND_NAME, "record updated");

        Ok(updated)
    }

    fn delete(&mut self, id: &str) -> DatasourceResult<bool> {
        match self.records.shift_remove(id) {
            Some(_) => {
                debug!(id, backend = BACKEND_NAME, "record deleted");
                Ok(true)
            }
            None => Err(DatasourceError::not_found(id)),
        }
    }

    fn backend_name(&self) -> &'static str {
        BACKEND_NAME
    }
}
