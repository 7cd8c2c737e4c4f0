//! Shuffled verse order that survives restarts.
//!
//! A permutation of verse indices and a cursor into it are kept in a
//! key-value store. Each draw hands out the index under the cursor and
//! advances it. The permutation is regenerated when it is missing, cannot be
//! parsed, no longer matches the verse count, or has been used up.

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Store key holding the JSON array of indices
pub const ORDER_KEY: &str = "verseOrder";

/// Store key holding the cursor
pub const CURSOR_KEY: &str = "versePtr";

/// String key-value persistence
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> Result<()>;

    /// Set several keys together. Stores that persist should write them in
    /// one operation so readers never see half of the batch.
    fn set_many(&mut self, entries: Vec<(&str, String)>) -> Result<()> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// Store backed by a JSON object file, rewritten on every `set`
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open a store file. A missing or unreadable file starts empty.
    pub fn open(path: &Path) -> Result<Self> {
        let values = match fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "ignoring malformed store file");
                BTreeMap::new()
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(JsonFileStore {
            path: path.to_path_buf(),
            values,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.set_many(vec![(key, value)])
    }

    /// Rewrite the file once for the whole batch
    fn set_many(&mut self, entries: Vec<(&str, String)>) -> Result<()> {
        let mut values = self.values.clone();
        for (key, value) in entries {
            values.insert(key.to_string(), value);
        }
        let json = serde_json::to_string_pretty(&values)?;
        fs::write(&self.path, json)?;
        self.values = values;
        Ok(())
    }
}

/// Source of random numbers for shuffling
pub trait RandomSource {
    fn next_u32(&mut self) -> Result<u32>;
}

/// Random numbers from the operating system
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn next_u32(&mut self) -> Result<u32> {
        let mut buf = [0u8; 4];
        getrandom::getrandom(&mut buf).map_err(|e| Error::Random(e.to_string()))?;
        Ok(u32::from_le_bytes(buf))
    }
}

/// Fisher–Yates shuffle of `0..total`
pub fn shuffled_indices<R: RandomSource>(total: usize, rng: &mut R) -> Result<Vec<usize>> {
    let mut indices: Vec<usize> = (0..total).collect();
    for i in (1..total).rev() {
        let j = rng.next_u32()? as usize % (i + 1);
        indices.swap(i, j);
    }
    Ok(indices)
}

/// Draws verse indices in a persisted shuffled order
pub struct ShuffleDeck<S: KeyValueStore, R: RandomSource = OsRandom> {
    store: S,
    rng: R,
}

impl<S: KeyValueStore> ShuffleDeck<S> {
    /// Create a deck using the OS random source
    pub fn new(store: S) -> Self {
        ShuffleDeck { store, rng: OsRandom }
    }
}

impl<S: KeyValueStore, R: RandomSource> ShuffleDeck<S, R> {
    pub fn with_random(store: S, rng: R) -> Self {
        ShuffleDeck { store, rng }
    }

    /// Hand out the next index in `0..total`
    pub fn next_index(&mut self, total: usize) -> Result<usize> {
        if total == 0 {
            return Err(Error::EmptyVerseSet);
        }

        let (order, cursor) = match self.load_state(total) {
            Some(state) => state,
            None => {
                debug!(total, "regenerating shuffle order");
                (shuffled_indices(total, &mut self.rng)?, 0)
            }
        };

        let index = order[cursor];
        self.store.set_many(vec![
            (ORDER_KEY, serde_json::to_string(&order)?),
            (CURSOR_KEY, (cursor + 1).to_string()),
        ])?;
        Ok(index)
    }

    /// Stored order and cursor, if they are still usable for `total` verses
    fn load_state(&self, total: usize) -> Option<(Vec<usize>, usize)> {
        let raw = self.store.get(ORDER_KEY)?;
        let order: Vec<usize> = match serde_json::from_str(&raw) {
            Ok(order) => order,
            Err(e) => {
                warn!(error = %e, "stored shuffle order is malformed");
                return None;
            }
        };
        let cursor = self
            .store
            .get(CURSOR_KEY)
            .and_then(|c| c.trim().parse::<usize>().ok())
            .unwrap_or(0);

        let usable = order.len() == total && cursor < total && order.iter().all(|&i| i < total);
        usable.then_some((order, cursor))
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
