use crate::{
    Deck, Entry, EntryId, Event, EventBus, Item, PickMode, PickerConfig, RngState, SessionRules,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Shuffling,
    Shuffled,
    Complete,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("custom menu needs at least one item")]
    EmptyItems,
    #[error("cards must be shuffled first")]
    NotShuffled,
    #[error("shuffle still in progress")]
    ShuffleInProgress,
    #[error("unknown card {0}")]
    UnknownEntry(EntryId),
    #[error("no card in slot {0}")]
    UnknownSlot(usize),
    #[error("card {0} already picked")]
    AlreadySelected(EntryId),
    #[error("all {max} picks already made")]
    LimitReached { max: usize },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShuffleStep {
    pub step: u8,
    pub steps: u8,
}

impl ShuffleStep {
    pub fn is_last(&self) -> bool {
        self.step >= self.steps
    }
}

/// One play-through: the active items, their deck and the picks made so far.
#[derive(Debug, Clone)]
pub struct SelectionSession {
    mode: PickMode,
    rules: SessionRules,
    items: Vec<Item>,
    deck: Deck,
    phase: Phase,
    picks: Vec<EntryId>,
    steps_done: u8,
}

impl SelectionSession {
    pub fn new(mode: PickMode, rules: SessionRules) -> Self {
        Self {
            mode,
            rules,
            items: Vec::new(),
            deck: Deck::default(),
            phase: Phase::Idle,
            picks: Vec::new(),
            steps_done: 0,
        }
    }

    /// Creates a session for `mode` and deals `items` into a fresh deck.
    pub fn start(
        mode: PickMode,
        config: &PickerConfig,
        items: Vec<Item>,
        events: &mut EventBus,
    ) -> Result<Self, SessionError> {
        let mut session = Self::new(mode, config.rules_for(mode));
        session.build_deck(items, events)?;
        Ok(session)
    }

    /// Replaces the active items and returns to `Idle`.
    ///
    /// Custom mode rejects an empty list and keeps the current state.
    pub fn build_deck(
        &mut self,
        items: Vec<Item>,
        events: &mut EventBus,
    ) -> Result<(), SessionError> {
        if items.is_empty() && self.mode == PickMode::Custom {
            return Err(SessionError::EmptyItems);
        }
        self.items = items;
        self.redeal();
        events.push(Event::DeckBuilt {
            mode: self.mode,
            entries: self.deck.len(),
            max_selection: self.rules.max_selection,
        });
        Ok(())
    }

    pub fn reset(&mut self, events: &mut EventBus) {
        self.redeal();
        events.push(Event::SessionReset {
            entries: self.deck.len(),
        });
    }

    fn redeal(&mut self) {
        self.deck = Deck::from_items(&self.items);
        self.picks.clear();
        self.steps_done = 0;
        self.phase = Phase::Idle;
    }

    /// Enters `Shuffling`. Returns false outside `Idle`.
    pub fn begin_shuffle(&mut self, events: &mut EventBus) -> bool {
        if self.phase != Phase::Idle {
            return false;
        }
        self.phase = Phase::Shuffling;
        self.steps_done = 0;
        events.push(Event::ShuffleStarted {
            steps: self.rules.shuffle_steps,
        });
        true
    }

    /// Applies one animation step's permutation. The last step moves the
    /// session to `Shuffled`.
    pub fn shuffle_step(
        &mut self,
        rng: &mut RngState,
        events: &mut EventBus,
    ) -> Option<ShuffleStep> {
        if self.phase != Phase::Shuffling {
            return None;
        }
        self.deck.shuffle(rng);
        self.steps_done += 1;
        let step = ShuffleStep {
            step: self.steps_done,
            steps: self.rules.shuffle_steps,
        };
        events.push(Event::ShuffleStepped {
            step: step.step,
            steps: step.steps,
        });
        if step.is_last() {
            self.phase = Phase::Shuffled;
            events.push(Event::ShuffleFinished);
        }
        Some(step)
    }

    /// Runs every shuffle step at once. No-op outside `Idle`.
    pub fn shuffle(&mut self, rng: &mut RngState, events: &mut EventBus) -> bool {
        if !self.begin_shuffle(events) {
            return false;
        }
        while self.shuffle_step(rng, events).is_some() {}
        true
    }

    pub fn select(&mut self, id: EntryId, events: &mut EventBus) -> Result<Item, SessionError> {
        match self.phase {
            Phase::Idle => return Err(SessionError::NotShuffled),
            Phase::Shuffling => return Err(SessionError::ShuffleInProgress),
            Phase::Shuffled | Phase::Complete => {}
        }
        let entry = *self.deck.get(id).ok_or(SessionError::UnknownEntry(id))?;
        if entry.selected {
            return Err(SessionError::AlreadySelected(id));
        }
        if self.phase == Phase::Complete || self.picks.len() >= self.rules.max_selection {
            return Err(SessionError::LimitReached {
                max: self.rules.max_selection,
            });
        }
        let item = self.items[entry.source].clone();
        self.deck.mark_selected(id);
        self.picks.push(id);
        events.push(Event::EntryRevealed {
            entry: id,
            source: entry.source,
            name: item.name.clone(),
            emoji: item.emoji.clone(),
            picked: self.picks.len(),
            max_selection: self.rules.max_selection,
        });
        if self.picks.len() >= self.pick_target() {
            self.phase = Phase::Complete;
            events.push(Event::SelectionComplete {
                picks: self.revealed().iter().map(|item| item.label()).collect(),
            });
        }
        Ok(item)
    }

    /// Selects whatever entry currently sits in deck slot `position`.
    pub fn select_at(
        &mut self,
        position: usize,
        events: &mut EventBus,
    ) -> Result<Item, SessionError> {
        let id = self
            .deck
            .at(position)
            .map(|entry| entry.id)
            .ok_or(SessionError::UnknownSlot(position))?;
        self.select(id, events)
    }

    // A deck smaller than the limit completes once every card is turned.
    fn pick_target(&self) -> usize {
        self.rules.max_selection.min(self.deck.len())
    }

    pub fn mode(&self) -> PickMode {
        self.mode
    }

    pub fn rules(&self) -> SessionRules {
        self.rules
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn is_shuffling(&self) -> bool {
        self.phase == Phase::Shuffling
    }

    pub fn has_shuffled(&self) -> bool {
        matches!(self.phase, Phase::Shuffled | Phase::Complete)
    }

    pub fn shuffle_progress(&self) -> Option<ShuffleStep> {
        (self.phase == Phase::Shuffling).then_some(ShuffleStep {
            step: self.steps_done,
            steps: self.rules.shuffle_steps,
        })
    }

    pub fn is_selected(&self, id: EntryId) -> bool {
        self.deck.get(id).map(|entry| entry.selected).unwrap_or(false)
    }

    pub fn selected_count(&self) -> usize {
        self.picks.len()
    }

    pub fn max_selection(&self) -> usize {
        self.rules.max_selection
    }

    pub fn picks(&self) -> &[EntryId] {
        &self.picks
    }

    pub fn item_for(&self, entry: &Entry) -> Option<&Item> {
        self.items.get(entry.source)
    }

    /// Picked items in click order.
    pub fn revealed(&self) -> Vec<&Item> {
        self.picks
            .iter()
            .filter_map(|id| self.deck.get(*id))
            .filter_map(|entry| self.items.get(entry.source))
            .collect()
    }

    pub fn view(&self) -> SessionView {
        let cards = self
            .deck
            .entries()
            .iter()
            .enumerate()
            .map(|(slot, entry)| CardView {
                slot,
                id: entry.id,
                selected: entry.selected,
                item: entry
                    .selected
                    .then(|| self.items.get(entry.source).cloned())
                    .flatten(),
            })
            .collect();
        SessionView {
            mode: self.mode,
            phase: self.phase,
            max_selection: self.rules.max_selection,
            selected_count: self.picks.len(),
            shuffle: self.shuffle_progress(),
            cards,
            revealed: self.revealed().into_iter().cloned().collect(),
        }
    }
}

/// Snapshot handed to renderers. Unpicked cards keep their item hidden.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionView {
    pub mode: PickMode,
    pub phase: Phase,
    pub max_selection: usize,
    pub selected_count: usize,
    #[serde(default)]
    pub shuffle: Option<ShuffleStep>,
    pub cards: Vec<CardView>,
    pub revealed: Vec<Item>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CardView {
    pub slot: usize,
    pub id: EntryId,
    pub selected: bool,
    #[serde(default)]
    pub item: Option<Item>,
}
