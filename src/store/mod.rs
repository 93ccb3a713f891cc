//! Student Record Store
//!
//! Durable mapping from student id to record. Ids are caller-supplied and unique;
//! insertion order is preserved across rewrites.

pub mod codec;
pub mod memory;
pub mod persistence;

use crate::error::StoreError;
use crate::types::{RecordPatch, StudentRecord};

pub use codec::{RosterFile, DEFAULT_NEXT_ID};
pub use memory::InMemoryRecordStore;
pub use persistence::FileRecordStore;

/// Record store interface
///
/// A failed operation leaves the stored set unchanged.
pub trait RecordStore: Send + Sync {
    /// All records in insertion order. Empty if nothing has been persisted.
    fn load_all(&self) -> Result<Vec<StudentRecord>, StoreError>;

    /// Append a record. Fails with `DuplicateId` if the id is already stored.
    fn add(&self, record: StudentRecord) -> Result<(), StoreError>;

    /// Overwrite the supplied fields of an existing record and return it.
    fn update(&self, id: &str, patch: &RecordPatch) -> Result<StudentRecord, StoreError>;

    /// Remove a record and return it; the rest keep their relative order.
    fn delete(&self, id: &str) -> Result<StudentRecord, StoreError>;

    /// Look up a record against the current persisted contents.
    fn find_by_id(&self, id: &str) -> Result<Option<StudentRecord>, StoreError>;
}
