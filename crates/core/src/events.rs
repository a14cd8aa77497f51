use crate::{EntryId, PickMode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    DeckBuilt {
        mode: PickMode,
        entries: usize,
        max_selection: usize,
    },
    ShuffleStarted { steps: u8 },
    ShuffleStepped { step: u8, steps: u8 },
    ShuffleFinished,
    EntryRevealed {
        entry: EntryId,
        source: usize,
        name: String,
        emoji: String,
        picked: usize,
        max_selection: usize,
    },
    SelectionComplete { picks: Vec<String> },
    SessionReset { entries: usize },
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
