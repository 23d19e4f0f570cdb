use serde::{Deserialize, Serialize};
use std::{collections::VecDeque, fmt};

/// Generational handle for a game entity.
///
/// Ordering compares the slot index first, which gives broad-phase pair keys a
/// stable canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct EntityId {
    index: u32,
    generation: u32,
}

impl EntityId {
    pub const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    pub const fn from_index(index: u32) -> Self {
        Self::new(index, 0)
    }

    pub fn index(&self) -> usize {
        self.index as usize
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn is_null(&self) -> bool {
        self.index == u32::MAX
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new(u32::MAX, 0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

/// Generational arena that hands out stable ids and rejects stale ones.
pub struct Arena<T> {
    slots: Vec<Option<T>>,
    generations: Vec<u32>,
    free_list: VecDeque<u32>,
    live: usize,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Arena<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            generations: Vec::new(),
            free_list: VecDeque::new(),
            live: 0,
        }
    }

    pub fn insert(&mut self, item: T) -> EntityId {
        self.live += 1;
        if let Some(index) = self.free_list.pop_front() {
            let slot = index as usize;
            self.slots[slot] = Some(item);
            return EntityId::new(index, self.generations[slot]);
        }

        let index = self.slots.len() as u32;
        self.slots.push(Some(item));
        self.generations.push(0);
        EntityId::from_index(index)
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        if !self.contains(id) {
            return None;
        }
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut T> {
        if !self.contains(id) {
            return None;
        }
        self.slots.get_mut(id.index()).and_then(Option::as_mut)
    }

    /// Frees the slot and bumps its generation so outstanding ids go stale.
    pub fn remove(&mut self, id: EntityId) -> Option<T> {
        if !self.contains(id) {
            return None;
        }
        let slot = id.index();
        let item = self.slots[slot].take()?;
        self.generations[slot] = self.generations[slot].wrapping_add(1);
        self.free_list.push_back(slot as u32);
        self.live -= 1;
        Some(item)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.generations.get(id.index()).copied() == Some(id.generation())
            && self
                .slots
                .get(id.index())
                .is_some_and(|slot| slot.is_some())
    }

    /// Live entries in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &T)> + '_ {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.as_ref()
                .map(|item| (EntityId::new(index as u32, self.generations[index]), item))
        })
    }

    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.iter().map(|(id, _)| id)
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }
}
