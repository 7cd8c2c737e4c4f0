//! Verse records and the store that holds them.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::shuffle::{KeyValueStore, RandomSource, ShuffleDeck};

/// A verse and where it comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    /// Verse text; may contain `<br>` markup
    pub content: String,
    /// Book, chapter and verse
    pub reference: String,
}

/// An ordered collection of verses
#[derive(Debug, Clone, Default)]
pub struct VerseStore {
    verses: Vec<Verse>,
}

impl VerseStore {
    pub fn new(verses: Vec<Verse>) -> Self {
        VerseStore { verses }
    }

    /// Parse a JSON array of verses
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(VerseStore::new(serde_json::from_str(json)?))
    }

    /// Load a JSON array of verses from a file
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn len(&self) -> usize {
        self.verses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verses.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Verse> {
        self.verses.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Verse> {
        self.verses.iter()
    }

    /// Draw the next verse from a shuffle deck
    pub fn next_verse<S, R>(&self, deck: &mut ShuffleDeck<S, R>) -> Result<&Verse>
    where
        S: KeyValueStore,
        R: RandomSource,
    {
        let index = deck.next_index(self.len())?;
        // the deck only hands out indices below len()
        Ok(&self.verses[index])
    }
}
