use crate::queue::{NodeKey, Order, QueueArena, QueueGroup, QueueId};

impl QueueArena {
    /// Sorts the queue's elements by their text in the given [`Order`],
    /// in place and stably: elements with equal text keep their relative
    /// order.
    ///
    /// The ring is broken into a `next`-linked chain, sorted bottom-up by
    /// merging runs off an explicit run stack, and relinked into a ring
    /// in one final pass. Returns the number of elements (0 for a stale
    /// handle).
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n* log *n*) time and
    /// *O*(log *n*) memory for the run stack.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::{Order, QueueArena};
    ///
    /// let mut arena = QueueArena::new();
    /// let queue = arena.new_queue().unwrap();
    /// for text in ["pear", "fig", "kiwi", "fig", "date"] {
    ///     arena.push_back(queue, text).unwrap();
    /// }
    ///
    /// assert_eq!(arena.sort(queue, Order::Ascending), 5);
    ///
    /// let values: Vec<&str> = arena.values(queue).collect();
    /// assert_eq!(values, ["date", "fig", "fig", "kiwi", "pear"]);
    /// ```
    pub fn sort(&mut self, queue: QueueId, order: Order) -> usize {
        if !self.is_queue(queue) {
            return 0;
        }
        let sentinel = queue.0;
        let first = self.slot(sentinel).next;
        if first == sentinel {
            return 0;
        }
        if self.slot(first).next == sentinel {
            return 1;
        }
        let head = self.take_chain(sentinel);
        let sorted = self.sort_chain(head, order);
        self.relink_chain(sentinel, sorted)
    }

    /// Merges the elements of `src` into `dst`, leaving `src` empty but
    /// live. If both queues were ordered by `order`, the result is too,
    /// and ties take the `dst` element first.
    ///
    /// Returns the number of elements in `dst` afterwards. A stale handle
    /// on either side leaves the other queue untouched and returns its
    /// length; merging a queue into itself is a no-op.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n* + *m*) time, and in
    /// *O*(1) link updates when `dst` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::{Order, QueueArena};
    ///
    /// let mut arena = QueueArena::new();
    /// let dst = arena.new_queue().unwrap();
    /// let src = arena.new_queue().unwrap();
    /// for text in ["a", "c", "e"] {
    ///     arena.push_back(dst, text).unwrap();
    /// }
    /// for text in ["b", "d"] {
    ///     arena.push_back(src, text).unwrap();
    /// }
    ///
    /// assert_eq!(arena.merge(dst, src, Order::Ascending), 5);
    ///
    /// let values: Vec<&str> = arena.values(dst).collect();
    /// assert_eq!(values, ["a", "b", "c", "d", "e"]);
    /// assert!(arena.is_empty(src));
    /// assert!(arena.is_queue(src));
    /// ```
    pub fn merge(&mut self, dst: QueueId, src: QueueId, order: Order) -> usize {
        match (self.is_queue(dst), self.is_queue(src)) {
            (false, false) => return 0,
            (true, false) => return self.len(dst),
            (false, true) => return self.len(src),
            (true, true) => {}
        }
        if dst == src || self.is_empty(src) {
            return self.len(dst);
        }
        if self.is_empty(dst) {
            // The whole of `src` moves over in one splice.
            let first = self.slot(src.0).next;
            let last = self.slot(src.0).prev;
            let segment = self.detach_range(first, last);
            self.attach_before(dst.0, segment);
            return self.len(dst);
        }
        let left = self.take_chain(dst.0);
        let right = self.take_chain(src.0);
        let merged = self.merge_chain(left, right, order);
        self.relink_chain(dst.0, merged)
    }

    /// Merges every queue in `groups` into the first one, folding left to
    /// right with [`merge`](QueueArena::merge), and returns the length of
    /// the first queue afterwards.
    ///
    /// An empty slice, or a stale handle in the first group, returns 0
    /// without touching anything. Later stale or repeated handles are
    /// skipped by the pairwise rules.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::{Order, QueueArena, QueueGroup};
    ///
    /// let mut arena = QueueArena::new();
    /// let mut groups = Vec::new();
    /// for texts in [&["b", "e"][..], &["a", "f"], &["c", "d"]] {
    ///     let queue = arena.new_queue().unwrap();
    ///     for text in texts {
    ///         arena.push_back(queue, text).unwrap();
    ///     }
    ///     groups.push(QueueGroup::from(queue));
    /// }
    ///
    /// assert_eq!(arena.merge_all(&groups, Order::Ascending), 6);
    ///
    /// let values: Vec<&str> = arena.values(groups[0].queue).collect();
    /// assert_eq!(values, ["a", "b", "c", "d", "e", "f"]);
    /// ```
    pub fn merge_all(&mut self, groups: &[QueueGroup], order: Order) -> usize {
        let (first, rest) = match groups.split_first() {
            Some(pair) => pair,
            None => return 0,
        };
        if !self.is_queue(first.queue) {
            return 0;
        }
        let mut total = self.len(first.queue);
        for group in rest {
            total = self.merge(first.queue, group.queue, order);
        }
        total
    }

    // private methods

    /// Unhook the queue's elements as a `NONE`-terminated `next` chain,
    /// leaving the sentinel as an empty ring. `prev` links in the chain
    /// are stale until [`relink_chain`](QueueArena::relink_chain).
    fn take_chain(&mut self, sentinel: NodeKey) -> NodeKey {
        let head = self.slot(sentinel).next;
        if head == sentinel {
            return NodeKey::NONE;
        }
        let tail = self.slot(sentinel).prev;
        self.slot_mut(tail).next = NodeKey::NONE;
        self.connect(sentinel, sentinel);
        head
    }

    /// Bottom-up merge sort over a `next` chain. Singleton runs are
    /// pushed onto `pending` and merged once per trailing one bit of the
    /// consumed count, so the stack holds one run per set bit, at most
    /// log *n* of them.
    fn sort_chain(&mut self, head: NodeKey, order: Order) -> NodeKey {
        let mut pending: Vec<NodeKey> = Vec::new();
        let mut consumed: usize = 0;
        let mut cur = head;
        while cur.is_some() {
            let next = self.slot(cur).next;
            self.slot_mut(cur).next = NodeKey::NONE;
            pending.push(cur);
            let mut bits = consumed;
            while bits & 1 == 1 {
                let right = pending.pop().unwrap_or(NodeKey::NONE);
                let left = pending.pop().unwrap_or(NodeKey::NONE);
                pending.push(self.merge_chain(left, right, order));
                bits >>= 1;
            }
            consumed += 1;
            cur = next;
        }
        let mut run = pending.pop().unwrap_or(NodeKey::NONE);
        while let Some(left) = pending.pop() {
            run = self.merge_chain(left, run, order);
        }
        run
    }

    /// Stable two-chain merge: ties take the `left` element. Either chain
    /// may be `NONE`.
    fn merge_chain(&mut self, left: NodeKey, right: NodeKey, order: Order) -> NodeKey {
        if left.is_none() {
            return right;
        }
        if right.is_none() {
            return left;
        }
        let (head, mut a, mut b) = if self.keeps_before(left, right, order) {
            (left, self.slot(left).next, right)
        } else {
            (right, left, self.slot(right).next)
        };
        let mut tail = head;
        loop {
            if a.is_none() {
                self.slot_mut(tail).next = b;
                break;
            }
            if b.is_none() {
                self.slot_mut(tail).next = a;
                break;
            }
            if self.keeps_before(a, b, order) {
                self.slot_mut(tail).next = a;
                tail = a;
                a = self.slot(a).next;
            } else {
                self.slot_mut(tail).next = b;
                tail = b;
                b = self.slot(b).next;
            }
        }
        head
    }

    #[inline]
    fn keeps_before(&self, a: NodeKey, b: NodeKey, order: Order) -> bool {
        match order {
            Order::Ascending => self.text(a) <= self.text(b),
            Order::Descending => self.text(a) >= self.text(b),
        }
    }

    /// Rebuild `prev` links along a `next` chain and close it into the
    /// sentinel's ring. Returns the chain length.
    fn relink_chain(&mut self, sentinel: NodeKey, head: NodeKey) -> usize {
        let mut count = 0;
        let mut prev = sentinel;
        let mut cur = head;
        while cur.is_some() {
            let next = self.slot(cur).next;
            self.connect(prev, cur);
            prev = cur;
            cur = next;
            count += 1;
        }
        self.connect(prev, sentinel);
        count
    }
}
