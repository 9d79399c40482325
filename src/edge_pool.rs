//! Fixed-capacity storage for edges.
//!
//! [`EdgePool`] allocates every slot once at construction and never grows.
//! Live edges are threaded through a doubly-linked list in insertion order so
//! the most recently drawn connection to a port can be found by scanning from
//! the tail, and released slots go onto a free list for O(1) reuse.
//!
//! # Example
//!
//! ```ignore
//! use slint_graph_canvas::EdgePool;
//! use slint::Color;
//!
//! let mut edges = EdgePool::with_capacity(1024);
//! let id = edges.add(left_socket, right_socket, Color::from_rgb_u8(255, 255, 255));
//! assert_eq!(edges.find_last_touching(left_socket), Some(id));
//! edges.remove(id);
//! ```

use crate::canvas::ElementId;
use crate::error::EditorError;
use slint::Color;

/// Handle to an edge in an [`EdgePool`].
///
/// Handles carry the generation of their slot, so a handle to a removed edge
/// stays invalid even after the slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeId {
    index: u32,
    generation: u32,
}

impl EdgeId {
    /// Slot index inside the pool
    pub fn index(&self) -> usize {
        self.index as usize
    }
}

/// A committed connection between two endpoints.
///
/// Endpoints are weak references: the pool never keeps elements alive, and
/// the session removes edges before their endpoints are destroyed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub p0: ElementId,
    pub p1: ElementId,
    pub color: Color,
}

impl Edge {
    pub fn touches(&self, element: ElementId) -> bool {
        self.p0 == element || self.p1 == element
    }
}

#[derive(Debug, Clone)]
enum SlotEntry {
    Free {
        next_free: Option<u32>,
    },
    Live {
        edge: Edge,
        prev: Option<u32>,
        next: Option<u32>,
    },
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    entry: SlotEntry,
}

/// Slab of edges with an ordered registry of the live ones.
#[derive(Debug, Clone)]
pub struct EdgePool {
    slots: Vec<Slot>,
    free_head: Option<u32>,
    first: Option<u32>,
    last: Option<u32>,
    len: usize,
}

impl EdgePool {
    /// Create a pool with room for exactly `capacity` edges.
    pub fn with_capacity(capacity: usize) -> Self {
        let slots = (0..capacity)
            .map(|i| Slot {
                generation: 0,
                entry: SlotEntry::Free {
                    next_free: (i + 1 < capacity).then(|| (i + 1) as u32),
                },
            })
            .collect();

        Self {
            slots,
            free_head: (capacity > 0).then_some(0),
            first: None,
            last: None,
            len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of live edges.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append an edge at the tail, or report exhaustion.
    pub fn try_add(
        &mut self,
        p0: ElementId,
        p1: ElementId,
        color: Color,
    ) -> Result<EdgeId, EditorError> {
        let index = self.free_head.ok_or(EditorError::PoolExhausted {
            capacity: self.capacity(),
        })?;

        let slot = &mut self.slots[index as usize];
        self.free_head = match slot.entry {
            SlotEntry::Free { next_free } => next_free,
            SlotEntry::Live { .. } => unreachable!("free list points at a live slot"),
        };
        slot.entry = SlotEntry::Live {
            edge: Edge { p0, p1, color },
            prev: self.last,
            next: None,
        };
        let generation = slot.generation;

        match self.last {
            Some(tail) => self.set_next(tail, Some(index)),
            None => self.first = Some(index),
        }
        self.last = Some(index);
        self.len += 1;

        log::debug!("edge {index} added ({} live)", self.len);
        Ok(EdgeId { index, generation })
    }

    /// Append an edge at the tail.
    ///
    /// # Panics
    ///
    /// Panics when the pool is full. Capacity is a configuration choice and
    /// running out of it is a programming error.
    pub fn add(&mut self, p0: ElementId, p1: ElementId, color: Color) -> EdgeId {
        match self.try_add(p0, p1, color) {
            Ok(id) => id,
            Err(err) => panic!("{err}"),
        }
    }

    /// Unlink an edge and return its slot to the free list.
    ///
    /// Returns the removed edge, or `None` if the handle is stale.
    pub fn remove(&mut self, id: EdgeId) -> Option<Edge> {
        self.get(id)?;
        Some(self.release(id.index))
    }

    pub fn get(&self, id: EdgeId) -> Option<&Edge> {
        let slot = self.slots.get(id.index())?;
        match &slot.entry {
            SlotEntry::Live { edge, .. } if slot.generation == id.generation => Some(edge),
            _ => None,
        }
    }

    pub fn contains(&self, id: EdgeId) -> bool {
        self.get(id).is_some()
    }

    /// Most recently added live edge with either endpoint equal to `element`.
    pub fn find_last_touching(&self, element: ElementId) -> Option<EdgeId> {
        let mut cursor = self.last;
        while let Some(index) = cursor {
            let SlotEntry::Live { edge, prev, .. } = &self.slots[index as usize].entry else {
                break;
            };
            if edge.touches(element) {
                return Some(self.id_at(index));
            }
            cursor = *prev;
        }
        None
    }

    /// Remove every edge with an endpoint for which `owned` returns true.
    ///
    /// Returns the number of edges removed.
    pub fn remove_touching<F>(&mut self, mut owned: F) -> usize
    where
        F: FnMut(ElementId) -> bool,
    {
        let mut removed = 0;
        let mut cursor = self.first;
        while let Some(index) = cursor {
            let SlotEntry::Live { edge, next, .. } = &self.slots[index as usize].entry else {
                break;
            };
            let hit = owned(edge.p0) || owned(edge.p1);
            cursor = *next;
            if hit {
                self.release(index);
                removed += 1;
            }
        }
        removed
    }

    /// Number of live edges with either endpoint equal to `element`.
    pub fn count_touching(&self, element: ElementId) -> usize {
        self.iter().filter(|(_, edge)| edge.touches(element)).count()
    }

    /// Live edges in insertion order.
    pub fn iter(&self) -> EdgeIter<'_> {
        EdgeIter {
            pool: self,
            cursor: self.first,
        }
    }

    /// Release every live edge, keeping the allocated slots.
    pub fn clear(&mut self) {
        while let Some(index) = self.first {
            self.release(index);
        }
    }

    fn id_at(&self, index: u32) -> EdgeId {
        EdgeId {
            index,
            generation: self.slots[index as usize].generation,
        }
    }

    fn set_next(&mut self, index: u32, value: Option<u32>) {
        if let SlotEntry::Live { next, .. } = &mut self.slots[index as usize].entry {
            *next = value;
        }
    }

    fn set_prev(&mut self, index: u32, value: Option<u32>) {
        if let SlotEntry::Live { prev, .. } = &mut self.slots[index as usize].entry {
            *prev = value;
        }
    }

    /// Unlink a live slot. Callers guarantee `index` is live.
    fn release(&mut self, index: u32) -> Edge {
        let slot = &mut self.slots[index as usize];
        let entry = std::mem::replace(
            &mut slot.entry,
            SlotEntry::Free {
                next_free: self.free_head,
            },
        );
        slot.generation = slot.generation.wrapping_add(1);

        let SlotEntry::Live { edge, prev, next } = entry else {
            unreachable!("released a free slot");
        };

        match prev {
            Some(p) => self.set_next(p, next),
            None => self.first = next,
        }
        match next {
            Some(n) => self.set_prev(n, prev),
            None => self.last = prev,
        }
        self.free_head = Some(index);
        self.len -= 1;

        log::debug!("edge {index} removed ({} live)", self.len);
        edge
    }
}

/// Iterator over live edges in insertion order.
pub struct EdgeIter<'a> {
    pool: &'a EdgePool,
    cursor: Option<u32>,
}

impl<'a> Iterator for EdgeIter<'a> {
    type Item = (EdgeId, &'a Edge);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.cursor?;
        match &self.pool.slots[index as usize].entry {
            SlotEntry::Live { edge, next, .. } => {
                self.cursor = *next;
                Some((self.pool.id_at(index), edge))
            }
            SlotEntry::Free { .. } => {
                self.cursor = None;
                None
            }
        }
    }
}
