pub mod audit;
pub mod error;
pub mod id;
pub mod record;

pub use audit::{AuditDateTime, AuditRecord};
pub use error::{CoreError, Result};
pub use id::{ID_FIELD, IdGenerator, IdStrategy, generate_id, validate_id};
pub use record::Record;
