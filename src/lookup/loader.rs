//! Loading of the voter roll, once per process.
//!
//! The loader never fails: a file that cannot be read gives an empty table
//! together with the message to show to the user. The result is cached until
//! [`DataLoader::invalidate`] is called.

use std::sync::{Arc, Mutex};

use crate::lookup::{io_common::describe_error, *};

/// The result of loading the voter roll.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct LoadedTable {
    pub table: VoterTable,
    /// Set when the file could not be loaded. The table is then empty.
    pub failure: Option<String>,
}

pub struct DataLoader {
    source: SourceSettings,
    columns: ColumnNames,
    cache: Mutex<Option<Arc<LoadedTable>>>,
}

impl DataLoader {
    pub fn new(source: SourceSettings, columns: ColumnNames) -> DataLoader {
        DataLoader {
            source,
            columns,
            cache: Mutex::new(None),
        }
    }

    /// Returns the voter table, reading the file on the first call only.
    ///
    /// The file is read while holding the cache lock, so that concurrent
    /// first calls read it once.
    pub fn load(&self) -> Arc<LoadedTable> {
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(loaded) = cache.as_ref() {
            debug!("load: using cached table ({} records)", loaded.table.len());
            return loaded.clone();
        }
        let loaded = Arc::new(self.read());
        *cache = Some(loaded.clone());
        loaded
    }

    /// Drops the cached table. The next call to `load` reads the file again.
    pub fn invalidate(&self) {
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        if cache.take().is_some() {
            info!("invalidate: dropped cached voter table");
        }
    }

    fn read(&self) -> LoadedTable {
        match read_voter_table(&self.source, &self.columns) {
            Ok(table) => LoadedTable {
                table,
                failure: None,
            },
            Err(e) => {
                let msg = describe_error(&e);
                warn!("Failed to load the voter file: {}", msg);
                LoadedTable {
                    table: VoterTable::empty(),
                    failure: Some(msg),
                }
            }
        }
    }
}
