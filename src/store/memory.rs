//! In-memory record store with the same contract as the file store.

use crate::error::StoreError;
use crate::store::RecordStore;
use crate::types::{RecordPatch, StudentRecord};
use parking_lot::RwLock;

#[derive(Default)]
pub struct InMemoryRecordStore {
    records: RwLock<Vec<StudentRecord>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<StudentRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }
}

impl RecordStore for InMemoryRecordStore {
    fn load_all(&self) -> Result<Vec<StudentRecord>, StoreError> {
        Ok(self.records.read().clone())
    }

    fn add(&self, record: StudentRecord) -> Result<(), StoreError> {
        let mut records = self.records.write();
        if records.iter().any(|r| r.id == record.id) {
            return Err(StoreError::DuplicateId(record.id));
        }
        records.push(record);
        Ok(())
    }

    fn update(&self, id: &str, patch: &RecordPatch) -> Result<StudentRecord, StoreError> {
        let mut records = self.records.write();
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        record.apply(patch);
        Ok(record.clone())
    }

    fn delete(&self, id: &str) -> Result<StudentRecord, StoreError> {
        let mut records = self.records.write();
        let index = records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        Ok(records.remove(index))
    }

    fn find_by_id(&self, id: &str) -> Result<Option<StudentRecord>, StoreError> {
        Ok(self.records.read().iter().find(|r| r.id == id).cloned())
    }
}
