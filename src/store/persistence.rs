//! Flat-file record store.
//!
//! Every mutation re-encodes the full roster and replaces the data file via
//! write-to-temp then rename, so readers observe either the previous or the new
//! contents and never a partial write. Whole-file rewrites bound this store to
//! classroom scale (tens to low hundreds of records); it is not a log.

use crate::error::StoreError;
use crate::store::codec::{self, RosterFile};
use crate::store::RecordStore;
use crate::types::{RecordPatch, StudentRecord};
use parking_lot::RwLock;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Record store backed by the line-oriented data file.
pub struct FileRecordStore {
    path: PathBuf,
    state: RwLock<RosterFile>,
}

impl FileRecordStore {
    /// Open the store at `path`, reading any existing contents.
    ///
    /// A missing file is an empty store; nothing is written until the first mutation.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let state = read_roster(&path)?;
        debug!(
            path = %path.display(),
            records = state.records.len(),
            "Opened record store"
        );
        Ok(Self {
            path,
            state: RwLock::new(state),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-read the data file, replacing the in-memory snapshot.
    pub fn reload(&self) -> Result<(), StoreError> {
        let fresh = read_roster(&self.path)?;
        *self.state.write() = fresh;
        Ok(())
    }

    /// Read the file, apply `mutate`, persist the result, then publish it.
    ///
    /// If `mutate` or the write fails the in-memory state is left as it was.
    fn commit<T>(
        &self,
        mutate: impl FnOnce(&mut RosterFile) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut state = self.state.write();
        let mut next = read_roster(&self.path)?;
        let out = mutate(&mut next)?;
        write_roster(&self.path, &next)?;
        *state = next;
        Ok(out)
    }
}

impl RecordStore for FileRecordStore {
    fn load_all(&self) -> Result<Vec<StudentRecord>, StoreError> {
        self.reload()?;
        Ok(self.state.read().records.clone())
    }

    fn add(&self, record: StudentRecord) -> Result<(), StoreError> {
        let id = record.id.clone();
        self.commit(|roster| {
            if roster.records.iter().any(|r| r.id == record.id) {
                return Err(StoreError::DuplicateId(record.id));
            }
            roster.records.push(record);
            Ok(())
        })?;
        info!(id = %id, "Added student record");
        Ok(())
    }

    fn update(&self, id: &str, patch: &RecordPatch) -> Result<StudentRecord, StoreError> {
        let updated = self.commit(|roster| {
            let record = roster
                .records
                .iter_mut()
                .find(|r| r.id == id)
                .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
            record.apply(patch);
            Ok(record.clone())
        })?;
        info!(id = %id, "Updated student record");
        Ok(updated)
    }

    fn delete(&self, id: &str) -> Result<StudentRecord, StoreError> {
        let removed = self.commit(|roster| {
            let index = roster
                .records
                .iter()
                .position(|r| r.id == id)
                .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
            Ok(roster.records.remove(index))
        })?;
        info!(id = %id, "Deleted student record");
        Ok(removed)
    }

    fn find_by_id(&self, id: &str) -> Result<Option<StudentRecord>, StoreError> {
        self.reload()?;
        Ok(self
            .state
            .read()
            .records
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }
}

fn read_roster(path: &Path) -> Result<RosterFile, StoreError> {
    match std::fs::read_to_string(path) {
        Ok(content) => codec::decode(&content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(RosterFile::default()),
        Err(e) => Err(StoreError::IoError(e)),
    }
}

/// Encode and atomically replace the data file.
fn write_roster(path: &Path, roster: &RosterFile) -> Result<(), StoreError> {
    // Encode first so an unencodable record never touches the disk.
    let content = codec::encode(roster)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let tmp_path = temp_path_for(path);
    let written = (|| -> std::io::Result<()> {
        let mut file = std::fs::File::create(&tmp_path)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
        std::fs::rename(&tmp_path, path)
    })();

    if let Err(e) = written {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(StoreError::IoError(e));
    }

    debug!(
        path = %path.display(),
        records = roster.records.len(),
        bytes = content.len(),
        "Rewrote data file"
    );
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
