/// Tentative distance of a vertex during a query.
///
/// `Infinite` orders after every finite value, so the derived `Ord` gives the
/// min-heap its "unknown sorts last" semantics without reserving a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Distance {
    Finite(u64),
    Infinite,
}

impl Distance {
    /// Returns the finite value, or `None` while the distance is unknown
    pub fn finite(self) -> Option<u64> {
        match self {
            Distance::Finite(d) => Some(d),
            Distance::Infinite => None,
        }
    }

    pub fn is_infinite(self) -> bool {
        matches!(self, Distance::Infinite)
    }
}

impl From<u64> for Distance {
    fn from(d: u64) -> Self {
        Distance::Finite(d)
    }
}

/// A vertex together with its tentative distance and predecessor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeapEntry {
    pub vertex: usize,
    pub distance: Distance,
    pub predecessor: Option<usize>,
}

/// Binary min-heap over vertices `0..capacity` with decrease-key by vertex id.
///
/// Alongside the entry array it keeps a position table mapping each vertex to
/// its current slot (`None` once the vertex has been extracted or was never
/// inserted). All slot movement goes through a single `swap` primitive, which
/// updates both sides of the table, so the two can never drift apart.
///
/// Uses 0-indexed storage with parent = (i-1)/2, children = 2i+1, 2i+2.
#[derive(Debug, Clone)]
pub struct IndexedMinHeap {
    entries: Vec<HeapEntry>,
    positions: Vec<Option<usize>>,
}

impl IndexedMinHeap {
    /// Creates an empty heap able to hold vertices `0..capacity`
    pub fn new(capacity: usize) -> Self {
        IndexedMinHeap {
            entries: Vec::with_capacity(capacity),
            positions: vec![None; capacity],
        }
    }

    /// Creates a heap holding every vertex `0..vertex_count` at an infinite
    /// distance, except `source` which starts at zero at the root.
    ///
    /// # Panics
    ///
    /// Panics if `source >= vertex_count`.
    pub fn with_source(vertex_count: usize, source: usize) -> Self {
        assert!(source < vertex_count, "source {} out of range", source);

        let mut heap = IndexedMinHeap {
            entries: (0..vertex_count)
                .map(|vertex| HeapEntry {
                    vertex,
                    distance: Distance::Infinite,
                    predecessor: None,
                })
                .collect(),
            positions: (0..vertex_count).map(Some).collect(),
        };

        heap.entries[source].distance = Distance::Finite(0);
        heap.swap(source, 0);
        heap
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of vertex ids this heap can index
    pub fn capacity(&self) -> usize {
        self.positions.len()
    }

    /// Returns true if the vertex is currently stored in the heap
    pub fn contains(&self, vertex: usize) -> bool {
        self.position(vertex).is_some()
    }

    /// Current distance of a vertex still in the heap
    pub fn distance(&self, vertex: usize) -> Option<Distance> {
        self.position(vertex).map(|slot| self.entries[slot].distance)
    }

    /// Returns the entry with the smallest distance without removing it
    pub fn peek(&self) -> Option<&HeapEntry> {
        self.entries.first()
    }

    /// Inserts a vertex that is not yet present.
    ///
    /// Returns false if the vertex id is out of range or already stored.
    pub fn insert(&mut self, vertex: usize, distance: Distance) -> bool {
        if vertex >= self.positions.len() || self.positions[vertex].is_some() {
            return false;
        }

        let slot = self.entries.len();
        self.entries.push(HeapEntry {
            vertex,
            distance,
            predecessor: None,
        });
        self.positions[vertex] = Some(slot);
        self.sift_up(slot);
        true
    }

    /// Removes and returns the entry with the smallest distance
    pub fn extract_min(&mut self) -> Option<HeapEntry> {
        if self.entries.is_empty() {
            return None;
        }

        let last = self.entries.len() - 1;
        self.swap(0, last);
        let min = self.entries.pop()?;
        self.positions[min.vertex] = None;

        if !self.entries.is_empty() {
            self.sift_down(0);
        }
        Some(min)
    }

    /// Lowers the distance of a stored vertex and records its new predecessor.
    ///
    /// Only applies when the vertex is present and `distance` is strictly
    /// smaller than its current one (every finite value beats `Infinite`).
    /// Returns whether the entry was updated.
    pub fn decrease_key(&mut self, vertex: usize, distance: u64, predecessor: usize) -> bool {
        let slot = match self.position(vertex) {
            Some(slot) => slot,
            None => return false,
        };

        let candidate = Distance::Finite(distance);
        if candidate >= self.entries[slot].distance {
            return false;
        }

        let entry = &mut self.entries[slot];
        entry.distance = candidate;
        entry.predecessor = Some(predecessor);
        self.sift_up(slot);
        true
    }

    /// Checks the heap order and that the position table exactly inverts the
    /// entry array. Intended for tests and debug assertions.
    pub fn is_consistent(&self) -> bool {
        for slot in 1..self.entries.len() {
            if self.entries[(slot - 1) / 2].distance > self.entries[slot].distance {
                return false;
            }
        }

        for (slot, entry) in self.entries.iter().enumerate() {
            if self.positions.get(entry.vertex).copied().flatten() != Some(slot) {
                return false;
            }
        }

        let stored = self.positions.iter().filter(|p| p.is_some()).count();
        stored == self.entries.len()
    }

    fn position(&self, vertex: usize) -> Option<usize> {
        self.positions.get(vertex).copied().flatten()
    }

    /// The only primitive that moves entries between slots
    fn swap(&mut self, a: usize, b: usize) {
        self.entries.swap(a, b);
        self.positions[self.entries[a].vertex] = Some(a);
        self.positions[self.entries[b].vertex] = Some(b);
    }

    /// Pulls the entry at `slot` toward the root while it beats its parent
    fn sift_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if self.entries[slot].distance < self.entries[parent].distance {
                self.swap(slot, parent);
                slot = parent;
            } else {
                break;
            }
        }
        debug_assert!(self.positions[self.entries[slot].vertex] == Some(slot));
    }

    /// Pushes the entry at `slot` down below any smaller child
    fn sift_down(&mut self, mut slot: usize) {
        let len = self.entries.len();
        loop {
            let left = 2 * slot + 1;
            let right = 2 * slot + 2;
            let mut smallest = slot;

            if left < len && self.entries[left].distance < self.entries[smallest].distance {
                smallest = left;
            }
            if right < len && self.entries[right].distance < self.entries[smallest].distance {
                smallest = right;
            }

            if smallest == slot {
                break;
            }

            self.swap(slot, smallest);
            slot = smallest;
        }
    }
}

impl Default for IndexedMinHeap {
    fn default() -> Self {
        Self::new(0)
    }
}
