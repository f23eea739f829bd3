use std::fmt::{self, Debug, Formatter};
use std::mem;

use crate::queue::iterator::Values;

pub mod iterator;

mod algorithms;

/// A `QueueArena` hosts any number of text queues inside one growable slot
/// vector. Each queue is a cyclic doubly-linked list threaded through the
/// slots by index, with a payload-free sentinel slot as its boundary.
///
/// Because every queue lives in the same index space, moving elements
/// between queues (merging, splicing) is pure link rewiring and never
/// copies or reallocates a payload.
///
/// Queues are addressed through copyable [`QueueId`] handles. A handle
/// becomes *stale* once [`free_queue`] has released its queue; every
/// operation treats a stale handle as an absent queue and returns its
/// documented no-op result instead of panicking.
///
/// # Naming Conventions
///
/// - `first..=last`: a closed range of linked slots, both inclusive;
/// - `anchor`: a linked slot next to which another slot is inserted.
///
/// [`free_queue`]: QueueArena::free_queue
pub struct QueueArena {
    slots: Vec<Slot>,
    /// Head of the vacant-slot list, threaded through `next`.
    free: NodeKey,
    /// Occupied (non-vacant) slots, sentinels included.
    live: usize,
    limit: Option<usize>,
}

/// Index of a slot in the arena. `NONE` is the reserved absent key and
/// never indexes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeKey(u32);

impl NodeKey {
    pub(crate) const NONE: NodeKey = NodeKey(u32::MAX);

    #[inline]
    pub(crate) fn from_index(index: usize) -> Self {
        NodeKey(index as u32)
    }
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
    #[inline]
    pub(crate) fn is_none(self) -> bool {
        self.0 == u32::MAX
    }
    #[inline]
    pub(crate) fn is_some(self) -> bool {
        self.0 != u32::MAX
    }
}

pub(crate) struct Slot {
    pub(crate) next: NodeKey,
    pub(crate) prev: NodeKey,
    pub(crate) payload: Payload,
}

pub(crate) enum Payload {
    /// The slot is on the free list.
    Vacant,
    /// The slot heads a live queue and carries no text.
    Sentinel,
    /// The slot is a queue element owning one text value.
    Text(Box<str>),
}

/// Handle to one queue in a [`QueueArena`].
///
/// Ids are cheap to copy and remain valid until [`QueueArena::free_queue`].
/// Afterwards the id is stale: operations taking it return their absent
/// result (`None`, `0`, `false`, or silence). A stale id whose slot is
/// later recycled for a new queue names that new queue; callers that free
/// queues must retire their copies of the id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QueueId(pub(crate) NodeKey);

/// Sort and merge direction, lexicographic on the element text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Ascending,
    Descending,
}

/// Names one queue taking part in a k-way merge. See
/// [`QueueArena::merge_all`].
#[derive(Debug, Clone, Copy)]
pub struct QueueGroup {
    pub queue: QueueId,
}

impl From<QueueId> for QueueGroup {
    fn from(queue: QueueId) -> Self {
        QueueGroup { queue }
    }
}

/// Error of the fallible arena operations.
///
/// Everything else in this crate reports absent queues and empty
/// structures through ordinary return values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The arena was created with [`QueueArena::with_limit`] and holds
    /// its maximum number of slots.
    Full,
    /// The handle does not name a live queue.
    UnknownQueue,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::Full => write!(f, "queue arena is full"),
            Error::UnknownQueue => write!(f, "handle does not name a live queue"),
        }
    }
}

impl std::error::Error for Error {}

/// A range of slots cut out of a ring, interior links intact, end links
/// sealed to `NONE`.
///
/// While detached, `first.prev` and `last.next` must not be read. Every
/// segment is reattached before the operation that cut it returns.
#[derive(Clone, Copy)]
pub(crate) struct Segment {
    pub(crate) first: NodeKey,
    pub(crate) last: NodeKey,
}

// private methods
impl QueueArena {
    #[inline]
    pub(crate) fn slot(&self, key: NodeKey) -> &Slot {
        &self.slots[key.index()]
    }
    #[inline]
    pub(crate) fn slot_mut(&mut self, key: NodeKey) -> &mut Slot {
        &mut self.slots[key.index()]
    }

    /// Text of an element slot. Must not be called on a sentinel or a
    /// vacant slot.
    #[inline]
    pub(crate) fn text(&self, node: NodeKey) -> &str {
        match &self.slot(node).payload {
            Payload::Text(text) => text,
            _ => unreachable!("slot {} holds no text", node.0),
        }
    }

    /// Take a slot from the free list, or grow the slot vector by one.
    ///
    /// Fails with [`Error::Full`] when the arena limit is reached, leaving
    /// the arena untouched.
    pub(crate) fn alloc_slot(&mut self, payload: Payload) -> Result<NodeKey, Error> {
        if let Some(limit) = self.limit {
            if self.live >= limit {
                return Err(Error::Full);
            }
        }
        let key = if self.free.is_some() {
            let key = self.free;
            self.free = self.slot(key).next;
            let slot = self.slot_mut(key);
            slot.next = NodeKey::NONE;
            slot.prev = NodeKey::NONE;
            slot.payload = payload;
            key
        } else {
            // `NONE` is reserved, so at most u32::MAX slots can exist.
            if self.slots.len() >= u32::MAX as usize {
                return Err(Error::Full);
            }
            let key = NodeKey::from_index(self.slots.len());
            self.slots.push(Slot {
                next: NodeKey::NONE,
                prev: NodeKey::NONE,
                payload,
            });
            key
        };
        self.live += 1;
        Ok(key)
    }

    /// Return an unlinked slot to the free list and take its payload.
    pub(crate) fn free_slot(&mut self, key: NodeKey) -> Payload {
        let free = self.free;
        let slot = self.slot_mut(key);
        let payload = mem::replace(&mut slot.payload, Payload::Vacant);
        slot.prev = NodeKey::NONE;
        slot.next = free;
        self.free = key;
        self.live -= 1;
        payload
    }

    /// Unlink an element slot and return its text, recycling the slot.
    pub(crate) fn release(&mut self, node: NodeKey) -> String {
        self.detach_node(node);
        match self.free_slot(node) {
            Payload::Text(text) => text.into_string(),
            _ => unreachable!("slot {} holds no text", node.0),
        }
    }

    #[inline]
    pub(crate) fn connect(&mut self, prev: NodeKey, next: NodeKey) {
        self.slot_mut(prev).next = next;
        self.slot_mut(next).prev = prev;
    }

    /// Attach a single slot `node` between `prev` and `next`.
    ///
    /// `prev` and `next` must be adjacent slots of one ring (checked only
    /// under `debug_assertions`). If they are not, the ring becomes
    /// ill-formed.
    pub(crate) fn attach_node(&mut self, prev: NodeKey, next: NodeKey, node: NodeKey) {
        #[cfg(debug_assertions)]
        self.assert_adjacent(prev, next);
        self.connect(prev, node);
        self.connect(node, next);
        #[cfg(debug_assertions)]
        {
            self.assert_adjacent(prev, node);
            self.assert_adjacent(node, next);
        }
    }

    /// Detach a single slot from its ring. The slot's own links are
    /// sealed to `NONE`.
    ///
    /// `node` must currently be linked; detaching an unlinked slot makes
    /// the ring ill-formed.
    pub(crate) fn detach_node(&mut self, node: NodeKey) {
        let next = self.slot(node).next;
        let prev = self.slot(node).prev;
        self.connect(prev, next);
        let slot = self.slot_mut(node);
        slot.next = NodeKey::NONE;
        slot.prev = NodeKey::NONE;
    }

    #[inline]
    pub(crate) fn link_after(&mut self, anchor: NodeKey, node: NodeKey) {
        let next = self.slot(anchor).next;
        self.attach_node(anchor, next, node);
    }

    #[inline]
    pub(crate) fn link_before(&mut self, anchor: NodeKey, node: NodeKey) {
        let prev = self.slot(anchor).prev;
        self.attach_node(prev, anchor, node);
    }

    /// Move a linked slot directly after `anchor`. Moving a slot to where
    /// it already stands is a no-op.
    pub(crate) fn move_after(&mut self, node: NodeKey, anchor: NodeKey) {
        if node == anchor || self.slot(anchor).next == node {
            return;
        }
        self.detach_node(node);
        self.link_after(anchor, node);
    }

    /// Move a linked slot directly before `anchor`. Moving a slot to
    /// where it already stands is a no-op.
    pub(crate) fn move_before(&mut self, node: NodeKey, anchor: NodeKey) {
        if node == anchor || self.slot(anchor).prev == node {
            return;
        }
        self.detach_node(node);
        self.link_before(anchor, node);
    }

    /// Cut the closed range `first..=last` out of its ring.
    ///
    /// `first..=last` must be a valid range of one ring (`first` not to
    /// the right of `last`) and must not contain the sentinel; otherwise
    /// the ring becomes ill-formed.
    pub(crate) fn detach_range(&mut self, first: NodeKey, last: NodeKey) -> Segment {
        let prev = self.slot(first).prev;
        let next = self.slot(last).next;
        self.connect(prev, next);
        self.slot_mut(first).prev = NodeKey::NONE;
        self.slot_mut(last).next = NodeKey::NONE;
        Segment { first, last }
    }

    /// Attach a detached segment between `prev` and `next`.
    ///
    /// `prev` and `next` must be adjacent slots of one ring (checked only
    /// under `debug_assertions`).
    pub(crate) fn attach_range(&mut self, prev: NodeKey, next: NodeKey, segment: Segment) {
        #[cfg(debug_assertions)]
        self.assert_adjacent(prev, next);
        self.connect(prev, segment.first);
        self.connect(segment.last, next);
    }

    #[inline]
    pub(crate) fn attach_after(&mut self, anchor: NodeKey, segment: Segment) {
        let next = self.slot(anchor).next;
        self.attach_range(anchor, next, segment);
    }

    #[inline]
    pub(crate) fn attach_before(&mut self, anchor: NodeKey, segment: Segment) {
        let prev = self.slot(anchor).prev;
        self.attach_range(prev, anchor, segment);
    }

    /// Count the elements of the ring headed by `sentinel`.
    pub(crate) fn count(&self, sentinel: NodeKey) -> usize {
        let mut len = 0;
        let mut cur = self.slot(sentinel).next;
        while cur != sentinel {
            len += 1;
            cur = self.slot(cur).next;
        }
        len
    }

    #[cfg(debug_assertions)]
    fn assert_adjacent(&self, prev: NodeKey, next: NodeKey) {
        assert_eq!(self.slot(prev).next, next);
        assert_eq!(self.slot(next).prev, prev);
    }
}

impl QueueArena {
    /// Create an arena with no slot limit.
    ///
    /// # Examples
    /// ```
    /// use cyclic_queue::QueueArena;
    /// let arena = QueueArena::new();
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: NodeKey::NONE,
            live: 0,
            limit: None,
        }
    }

    /// Create an arena that refuses to occupy more than `limit` slots at
    /// a time, sentinels included. Once the limit is reached,
    /// [`new_queue`] and the push operations fail with [`Error::Full`]
    /// until slots are released again.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::{Error, QueueArena};
    ///
    /// let mut arena = QueueArena::with_limit(2);
    /// let queue = arena.new_queue().unwrap();
    /// arena.push_back(queue, "a").unwrap();
    /// assert_eq!(arena.push_back(queue, "b"), Err(Error::Full));
    /// assert_eq!(arena.len(queue), 1);
    /// ```
    ///
    /// [`new_queue`]: QueueArena::new_queue
    #[inline]
    pub fn with_limit(limit: usize) -> Self {
        Self {
            slots: Vec::new(),
            free: NodeKey::NONE,
            live: 0,
            limit: Some(limit),
        }
    }

    /// Create an empty queue and return its handle.
    ///
    /// Fails only when the arena cannot occupy another slot.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::QueueArena;
    ///
    /// let mut arena = QueueArena::new();
    /// let queue = arena.new_queue().unwrap();
    /// assert!(arena.is_empty(queue));
    /// ```
    pub fn new_queue(&mut self) -> Result<QueueId, Error> {
        let key = self.alloc_slot(Payload::Sentinel)?;
        self.connect(key, key);
        Ok(QueueId(key))
    }

    /// Release every element of the queue, then the queue itself. The
    /// handle is stale afterwards.
    ///
    /// Freeing an already-freed or otherwise stale queue is a no-op, so
    /// the call is idempotent.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::QueueArena;
    ///
    /// let mut arena = QueueArena::new();
    /// let queue = arena.new_queue().unwrap();
    /// arena.push_back(queue, "a").unwrap();
    ///
    /// arena.free_queue(queue);
    /// assert!(!arena.is_queue(queue));
    /// arena.free_queue(queue); // no-op
    /// ```
    pub fn free_queue(&mut self, queue: QueueId) {
        if !self.is_queue(queue) {
            return;
        }
        self.clear(queue);
        self.free_slot(queue.0);
    }

    /// Returns `true` if the handle names a live queue.
    #[inline]
    pub fn is_queue(&self, queue: QueueId) -> bool {
        self.slots
            .get(queue.0.index())
            .map_or(false, |slot| matches!(slot.payload, Payload::Sentinel))
    }

    /// Returns `true` if the queue is empty. A stale handle counts as
    /// empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::QueueArena;
    ///
    /// let mut arena = QueueArena::new();
    /// let queue = arena.new_queue().unwrap();
    /// assert!(arena.is_empty(queue));
    ///
    /// arena.push_front(queue, "foo").unwrap();
    /// assert!(!arena.is_empty(queue));
    /// ```
    #[inline]
    pub fn is_empty(&self, queue: QueueId) -> bool {
        !self.is_queue(queue) || self.slot(queue.0).next == queue.0
    }

    /// Returns `true` if the queue holds exactly one element. A stale
    /// handle holds none.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    #[inline]
    pub fn is_singular(&self, queue: QueueId) -> bool {
        if !self.is_queue(queue) {
            return false;
        }
        let front = self.slot(queue.0).next;
        front != queue.0 && front == self.slot(queue.0).prev
    }

    /// Returns the number of elements in the queue, or 0 for a stale
    /// handle.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time: the queue carries
    /// no size field, so the count is taken by traversal every time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::QueueArena;
    ///
    /// let mut arena = QueueArena::new();
    /// let queue = arena.new_queue().unwrap();
    ///
    /// arena.push_front(queue, "b").unwrap();
    /// assert_eq!(arena.len(queue), 1);
    ///
    /// arena.push_front(queue, "a").unwrap();
    /// assert_eq!(arena.len(queue), 2);
    /// ```
    pub fn len(&self, queue: QueueId) -> usize {
        if !self.is_queue(queue) {
            return 0;
        }
        self.count(queue.0)
    }

    /// Removes all elements from the queue, keeping the queue itself
    /// alive.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::QueueArena;
    ///
    /// let mut arena = QueueArena::new();
    /// let queue = arena.new_queue().unwrap();
    ///
    /// arena.push_front(queue, "b").unwrap();
    /// arena.push_front(queue, "a").unwrap();
    ///
    /// arena.clear(queue);
    /// assert!(arena.is_empty(queue));
    /// assert!(arena.is_queue(queue));
    /// ```
    pub fn clear(&mut self, queue: QueueId) {
        if !self.is_queue(queue) {
            return;
        }
        let sentinel = queue.0;
        let mut cur = self.slot(sentinel).next;
        while cur != sentinel {
            let next = self.slot(cur).next;
            self.free_slot(cur);
            cur = next;
        }
        self.connect(sentinel, sentinel);
    }

    /// Provides a reference to the front element's text, or `None` if the
    /// queue is empty or stale.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::QueueArena;
    ///
    /// let mut arena = QueueArena::new();
    /// let queue = arena.new_queue().unwrap();
    /// assert_eq!(arena.front(queue), None);
    ///
    /// arena.push_front(queue, "a").unwrap();
    /// assert_eq!(arena.front(queue), Some("a"));
    /// ```
    #[inline]
    pub fn front(&self, queue: QueueId) -> Option<&str> {
        if self.is_empty(queue) {
            return None;
        }
        Some(self.text(self.slot(queue.0).next))
    }

    /// Provides a reference to the back element's text, or `None` if the
    /// queue is empty or stale.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::QueueArena;
    ///
    /// let mut arena = QueueArena::new();
    /// let queue = arena.new_queue().unwrap();
    /// assert_eq!(arena.back(queue), None);
    ///
    /// arena.push_back(queue, "a").unwrap();
    /// assert_eq!(arena.back(queue), Some("a"));
    /// ```
    #[inline]
    pub fn back(&self, queue: QueueId) -> Option<&str> {
        if self.is_empty(queue) {
            return None;
        }
        Some(self.text(self.slot(queue.0).prev))
    }

    /// Adds an element with a copy of `text` at the front of the queue.
    ///
    /// On failure the queue is not touched: a stale handle fails with
    /// [`Error::UnknownQueue`], a full arena with [`Error::Full`].
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::QueueArena;
    ///
    /// let mut arena = QueueArena::new();
    /// let queue = arena.new_queue().unwrap();
    ///
    /// arena.push_front(queue, "b").unwrap();
    /// arena.push_front(queue, "a").unwrap();
    /// assert_eq!(arena.front(queue), Some("a"));
    /// ```
    pub fn push_front(&mut self, queue: QueueId, text: &str) -> Result<(), Error> {
        if !self.is_queue(queue) {
            return Err(Error::UnknownQueue);
        }
        let node = self.alloc_slot(Payload::Text(text.into()))?;
        self.link_after(queue.0, node);
        Ok(())
    }

    /// Adds an element with a copy of `text` at the back of the queue.
    ///
    /// On failure the queue is not touched: a stale handle fails with
    /// [`Error::UnknownQueue`], a full arena with [`Error::Full`].
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::QueueArena;
    ///
    /// let mut arena = QueueArena::new();
    /// let queue = arena.new_queue().unwrap();
    ///
    /// arena.push_back(queue, "a").unwrap();
    /// arena.push_back(queue, "b").unwrap();
    /// assert_eq!(arena.back(queue), Some("b"));
    /// ```
    pub fn push_back(&mut self, queue: QueueId, text: &str) -> Result<(), Error> {
        if !self.is_queue(queue) {
            return Err(Error::UnknownQueue);
        }
        let node = self.alloc_slot(Payload::Text(text.into()))?;
        self.link_before(queue.0, node);
        Ok(())
    }

    /// Removes the front element and returns its text, or `None` if the
    /// queue is empty or stale.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::QueueArena;
    ///
    /// let mut arena = QueueArena::new();
    /// let queue = arena.new_queue().unwrap();
    /// assert_eq!(arena.pop_front(queue), None);
    ///
    /// arena.push_front(queue, "a").unwrap();
    /// arena.push_front(queue, "c").unwrap();
    /// assert_eq!(arena.pop_front(queue), Some("c".to_string()));
    /// assert_eq!(arena.pop_front(queue), Some("a".to_string()));
    /// assert_eq!(arena.pop_front(queue), None);
    /// ```
    pub fn pop_front(&mut self, queue: QueueId) -> Option<String> {
        if self.is_empty(queue) {
            return None;
        }
        let node = self.slot(queue.0).next;
        Some(self.release(node))
    }

    /// Removes the back element and returns its text, or `None` if the
    /// queue is empty or stale.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::QueueArena;
    ///
    /// let mut arena = QueueArena::new();
    /// let queue = arena.new_queue().unwrap();
    /// assert_eq!(arena.pop_back(queue), None);
    ///
    /// arena.push_back(queue, "a").unwrap();
    /// arena.push_back(queue, "c").unwrap();
    /// assert_eq!(arena.pop_back(queue), Some("c".to_string()));
    /// ```
    pub fn pop_back(&mut self, queue: QueueId) -> Option<String> {
        if self.is_empty(queue) {
            return None;
        }
        let node = self.slot(queue.0).prev;
        Some(self.release(node))
    }

    /// Provides a forward iterator over the queue's texts. A stale handle
    /// yields an empty iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::QueueArena;
    ///
    /// let mut arena = QueueArena::new();
    /// let queue = arena.new_queue().unwrap();
    ///
    /// arena.push_back(queue, "a").unwrap();
    /// arena.push_back(queue, "b").unwrap();
    ///
    /// let mut values = arena.values(queue);
    /// assert_eq!(values.next(), Some("a"));
    /// assert_eq!(values.next(), Some("b"));
    /// assert_eq!(values.next(), None);
    /// ```
    #[inline]
    pub fn values(&self, queue: QueueId) -> Values<'_> {
        Values::new(self, queue)
    }
}

impl Debug for QueueArena {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueueArena")
            .field("slots", &self.slots.len())
            .field("live", &self.live)
            .finish()
    }
}

impl Default for QueueArena {
    fn default() -> Self {
        Self::new()
    }
}
