//! Tabu memory.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Where a full tabu list writes its next entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TabuEviction {
    /// Once full, every insertion restarts the write cursor at slot 0, so
    /// the first slot is overwritten again and again while later slots keep
    /// their entries.
    #[default]
    FirstSlot,
    /// The write cursor wraps around the buffer: strict FIFO eviction.
    RoundRobin,
}

/// Fixed-capacity buffer of recently applied move descriptors.
#[derive(Debug, Clone)]
pub struct TabuList<M> {
    entries: Vec<M>,
    capacity: usize,
    cursor: usize,
    eviction: TabuEviction,
}

impl<M: PartialEq> TabuList<M> {
    pub fn new(capacity: usize, eviction: TabuEviction) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
            cursor: 0,
            eviction,
        }
    }

    /// Records `mv`, overwriting an entry when the list is full.
    ///
    /// A zero-capacity list stays empty.
    pub fn insert(&mut self, mv: M) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() < self.capacity {
            self.entries.push(mv);
            self.cursor += 1;
            return;
        }
        let slot = match self.eviction {
            TabuEviction::FirstSlot => 0,
            TabuEviction::RoundRobin => self.cursor % self.capacity,
        };
        self.entries[slot] = mv;
        self.cursor = slot + 1;
    }

    pub fn contains(&self, mv: &M) -> bool {
        self.entries.contains(mv)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &M> {
        self.entries.iter()
    }
}
