use crate::{Item, RngState};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryId(pub u32);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Entry {
    pub id: EntryId,
    /// Index into the active item list.
    pub source: usize,
    pub selected: bool,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deck {
    entries: Vec<Entry>,
}

impl Deck {
    pub fn from_items(items: &[Item]) -> Self {
        let entries = (0..items.len())
            .map(|source| Entry {
                id: EntryId(source as u32),
                source,
                selected: false,
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: EntryId) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn at(&self, position: usize) -> Option<&Entry> {
        self.entries.get(position)
    }

    pub fn position_of(&self, id: EntryId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    pub fn shuffle(&mut self, rng: &mut RngState) {
        rng.shuffle(&mut self.entries);
    }

    pub(crate) fn mark_selected(&mut self, id: EntryId) -> bool {
        match self.entries.iter_mut().find(|entry| entry.id == id) {
            Some(entry) => {
                entry.selected = true;
                true
            }
            None => false,
        }
    }

    pub fn sources(&self) -> Vec<usize> {
        self.entries.iter().map(|entry| entry.source).collect()
    }
}
